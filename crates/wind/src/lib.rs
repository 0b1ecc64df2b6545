//! Wind-triangle solver for a single flight phase.
//!
//! Given a wind observation, a true heading, and a true airspeed, derives the
//! crosswind and headwind components, the wind correction angle (WCA), and
//! the resulting ground speed. Above a 10° correction angle the along-track
//! airspeed component shrinks noticeably, so the solver substitutes an
//! effective TAS of `tas · cos(wca)` for the ground-speed step; this is a
//! deliberate refinement over the naive wind triangle and the threshold is
//! part of the numeric contract.

use flightcalc_core::angles::{normalize_deg, to_degrees, to_radians};
use serde::{Deserialize, Serialize};

/// Threshold above which the effective-TAS correction kicks in (degrees).
const EFFECTIVE_TAS_WCA_DEG: f64 = 10.0;

/// A wind report in the "from" convention: `direction_deg` is the compass
/// direction the wind blows from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindObservation {
    pub direction_deg: f64,
    pub speed_kt: f64,
}

impl WindObservation {
    pub fn new(direction_deg: f64, speed_kt: f64) -> Self {
        Self {
            direction_deg,
            speed_kt,
        }
    }

    /// Calm wind, useful as a neutral element in tests and defaults.
    pub fn calm() -> Self {
        Self {
            direction_deg: 0.0,
            speed_kt: 0.0,
        }
    }
}

/// Solution of the wind triangle for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSolution {
    /// Crosswind component in knots; positive means wind from the right.
    pub crosswind_kt: f64,
    /// Headwind component in knots; positive means a headwind.
    pub headwind_kt: f64,
    /// Wind correction angle in degrees; positive means correcting right.
    pub correction_angle_deg: f64,
    /// The along-track airspeed used for the ground-speed step. Equal to the
    /// input TAS when the correction angle stays at or below 10°.
    pub effective_tas_kt: f64,
    /// Ground speed in knots.
    pub ground_speed_kt: f64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WindError {
    /// The crosswind component exceeds the airspeed, so no heading holds the
    /// intended track; the correction angle is mathematically undefined.
    #[error(
        "crosswind component {crosswind_kt:.1} kt exceeds true airspeed {tas_kt:.1} kt; the heading cannot be held"
    )]
    UnattainableHeading { crosswind_kt: f64, tas_kt: f64 },
    #[error("true airspeed must be positive (got {0:.1} kt)")]
    NonPositiveAirspeed(f64),
}

/// Solve the wind triangle for one phase.
///
/// Inputs are normalized to [0, 360) before use. Fails when the airspeed is
/// not positive or when the crosswind component exceeds the airspeed.
pub fn solve(
    wind: &WindObservation,
    true_heading_deg: f64,
    tas_kt: f64,
) -> Result<WindSolution, WindError> {
    if tas_kt <= 0.0 {
        return Err(WindError::NonPositiveAirspeed(tas_kt));
    }

    let wind_dir = normalize_deg(wind.direction_deg);
    let heading = normalize_deg(true_heading_deg);
    let relative_wind = to_radians(wind_dir - heading);

    let crosswind = wind.speed_kt * relative_wind.sin();
    // Wind from dead ahead (relative angle 0) is a full headwind.
    let headwind = wind.speed_kt * relative_wind.cos();

    let sine_ratio = crosswind / tas_kt;
    if !(-1.0..=1.0).contains(&sine_ratio) {
        return Err(WindError::UnattainableHeading {
            crosswind_kt: crosswind,
            tas_kt,
        });
    }
    let wca = to_degrees(sine_ratio.asin());

    let effective_tas = if wca.abs() > EFFECTIVE_TAS_WCA_DEG {
        tas_kt * to_radians(wca).cos()
    } else {
        tas_kt
    };

    // Law of cosines; the clamp guards against floating-point underflow
    // producing a negative radicand near zero ground speed.
    let radicand = effective_tas * effective_tas + wind.speed_kt * wind.speed_kt
        - 2.0 * effective_tas * wind.speed_kt * relative_wind.cos();
    let ground_speed = radicand.max(0.0).sqrt();

    Ok(WindSolution {
        crosswind_kt: crosswind,
        headwind_kt: headwind,
        correction_angle_deg: wca,
        effective_tas_kt: effective_tas,
        ground_speed_kt: ground_speed,
    })
}
