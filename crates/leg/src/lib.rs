//! Multi-phase leg profile builder.
//!
//! Composes up to three wind-triangle solutions (climb, cruise, descent)
//! into a single leg profile: magnetic and compass headings, per-phase
//! ground speed and duration, and the leg's total ETA and fuel figures.

pub mod deviation;

use flightcalc_core::angles::normalize_deg;
use flightcalc_wind::{self as wind, WindError, WindObservation};
use serde::{Deserialize, Serialize};

use crate::deviation::DeviationEntry;

/// Performance inputs for a climb or descent phase.
///
/// Fuel is taken from manufacturer data, not derived from a flow rate.
/// A phase participates in the profile only when [`PhaseInput::is_complete`]
/// holds; otherwise it is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseInput {
    pub tas_kt: f64,
    pub distance_nm: f64,
    pub fuel_used: f64,
    /// Wind for this phase; `None` inherits the leg's cruise wind.
    #[serde(default)]
    pub wind: Option<WindObservation>,
}

impl PhaseInput {
    /// A phase is complete when airspeed and distance are positive and the
    /// fuel figure is non-negative.
    pub fn is_complete(&self) -> bool {
        self.tas_kt > 0.0 && self.distance_nm > 0.0 && self.fuel_used >= 0.0
    }
}

/// Carry-over state from earlier legs plus the departure clock time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightParams {
    /// Departure clock time as a 4-digit `HHMM` string.
    #[serde(default)]
    pub departure_time: Option<String>,
    /// Minutes already flown before this leg.
    #[serde(default)]
    pub elapsed_minutes: Option<f64>,
    /// Distance already flown before this leg (nautical miles).
    #[serde(default)]
    pub elapsed_distance_nm: Option<f64>,
    /// Fuel already burned before this leg.
    #[serde(default)]
    pub previous_fuel_used: Option<f64>,
}

/// Inputs describing one leg of a flight plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegInput {
    pub true_heading_deg: f64,
    pub cruise_tas_kt: f64,
    pub cruise_wind: WindObservation,
    /// Magnetic variation, WMM sign convention: positive is east.
    pub magnetic_variation_deg: f64,
    pub distance_nm: f64,
    /// Cruise fuel flow per hour.
    pub fuel_flow: f64,
    #[serde(default)]
    pub climb: Option<PhaseInput>,
    #[serde(default)]
    pub descent: Option<PhaseInput>,
    #[serde(default)]
    pub params: Option<FlightParams>,
}

/// Derived figures for one phase of the leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub distance_nm: f64,
    pub ground_speed_kt: f64,
    pub time_hr: f64,
    pub fuel_used: f64,
}

/// Computed projection of a [`LegInput`]; recomputed wholesale, never
/// patched field by field.
///
/// ETA and fuel fields stay `None` when the leg distance is not positive or
/// a phase ground speed degenerates to zero, so callers can tell "not
/// applicable" from an actual zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseResult {
    pub crosswind_kt: f64,
    pub headwind_kt: f64,
    pub correction_angle_deg: f64,
    pub magnetic_course_deg: f64,
    pub magnetic_heading_deg: f64,
    pub compass_course_deg: f64,
    /// Cruise ground speed in knots.
    pub ground_speed_kt: f64,
    /// Total leg time in hours across all phases.
    pub eta_hr: Option<f64>,
    /// Fuel attributable to this leg alone.
    pub leg_fuel: Option<f64>,
    /// Cumulative fuel including what was burned before this leg.
    pub fuel_used: Option<f64>,
    pub climb: Option<PhaseResult>,
    pub cruise: Option<PhaseResult>,
    pub descent: Option<PhaseResult>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LegError {
    #[error("wind triangle unsolvable: {0}")]
    Wind(#[from] WindError),
}

/// Build the full course profile for one leg.
///
/// The deviation table is an external collaborator; a missing or unusable
/// table degrades the compass course to the magnetic heading.
pub fn build_profile(
    leg: &LegInput,
    deviation_table: Option<&[DeviationEntry]>,
) -> Result<CourseResult, LegError> {
    let cruise_solution = wind::solve(&leg.cruise_wind, leg.true_heading_deg, leg.cruise_tas_kt)?;

    let magnetic_course = normalize_deg(leg.true_heading_deg - leg.magnetic_variation_deg);
    let magnetic_heading = normalize_deg(
        leg.true_heading_deg + cruise_solution.correction_angle_deg - leg.magnetic_variation_deg,
    );
    let compass_course = deviation_table
        .and_then(|table| deviation::resolve(table, magnetic_heading))
        .unwrap_or(magnetic_heading);

    let mut result = CourseResult {
        crosswind_kt: cruise_solution.crosswind_kt,
        headwind_kt: cruise_solution.headwind_kt,
        correction_angle_deg: cruise_solution.correction_angle_deg,
        magnetic_course_deg: magnetic_course,
        magnetic_heading_deg: magnetic_heading,
        compass_course_deg: compass_course,
        ground_speed_kt: cruise_solution.ground_speed_kt,
        eta_hr: None,
        leg_fuel: None,
        fuel_used: None,
        climb: None,
        cruise: None,
        descent: None,
    };

    if leg.distance_nm <= 0.0 {
        return Ok(result);
    }

    let climb = solve_phase(leg.climb.as_ref(), leg)?;
    let descent = solve_phase(leg.descent.as_ref(), leg)?;

    let climb_distance = climb.as_ref().map_or(0.0, |p| p.distance_nm);
    let descent_distance = descent.as_ref().map_or(0.0, |p| p.distance_nm);
    let cruise_distance = (leg.distance_nm - climb_distance - descent_distance).max(0.0);

    // A phase with zero ground speed never reaches its end; time and fuel
    // stay undefined rather than infinite.
    let stalled = cruise_solution.ground_speed_kt <= 0.0
        || climb.as_ref().is_some_and(|p| p.ground_speed_kt <= 0.0)
        || descent.as_ref().is_some_and(|p| p.ground_speed_kt <= 0.0);
    if stalled {
        return Ok(result);
    }

    let climb = climb.map(finish_phase);
    let descent = descent.map(finish_phase);
    let cruise_time = cruise_distance / cruise_solution.ground_speed_kt;
    let cruise_fuel = leg.fuel_flow * cruise_time;
    let cruise = PhaseResult {
        distance_nm: cruise_distance,
        ground_speed_kt: cruise_solution.ground_speed_kt,
        time_hr: cruise_time,
        fuel_used: cruise_fuel,
    };

    let eta_hr = climb.as_ref().map_or(0.0, |p| p.time_hr)
        + cruise.time_hr
        + descent.as_ref().map_or(0.0, |p| p.time_hr);

    let params = leg.params.as_ref();
    let previous_fuel = params.and_then(|p| p.previous_fuel_used);
    let base_fuel = previous_fuel.unwrap_or_else(|| {
        params
            .and_then(|p| p.elapsed_minutes)
            .map_or(0.0, |minutes| leg.fuel_flow * minutes / 60.0)
    });
    let total_fuel = base_fuel
        + climb.as_ref().map_or(0.0, |p| p.fuel_used)
        + cruise.fuel_used
        + descent.as_ref().map_or(0.0, |p| p.fuel_used);

    result.eta_hr = Some(eta_hr);
    result.fuel_used = Some(total_fuel);
    result.leg_fuel = Some(total_fuel - previous_fuel.unwrap_or(0.0));
    result.climb = climb;
    result.cruise = Some(cruise);
    result.descent = descent;
    Ok(result)
}

/// Partially solved phase: geometry resolved, time not yet derived.
struct SolvedPhase {
    distance_nm: f64,
    ground_speed_kt: f64,
    fuel_used: f64,
}

fn solve_phase(phase: Option<&PhaseInput>, leg: &LegInput) -> Result<Option<SolvedPhase>, LegError> {
    let Some(phase) = phase.filter(|p| p.is_complete()) else {
        return Ok(None);
    };
    let phase_wind = phase.wind.unwrap_or(leg.cruise_wind);
    let solution = wind::solve(&phase_wind, leg.true_heading_deg, phase.tas_kt)?;
    Ok(Some(SolvedPhase {
        distance_nm: phase.distance_nm,
        ground_speed_kt: solution.ground_speed_kt,
        fuel_used: phase.fuel_used,
    }))
}

fn finish_phase(phase: SolvedPhase) -> PhaseResult {
    PhaseResult {
        distance_nm: phase.distance_nm,
        ground_speed_kt: phase.ground_speed_kt,
        time_hr: phase.distance_nm / phase.ground_speed_kt,
        fuel_used: phase.fuel_used,
    }
}
