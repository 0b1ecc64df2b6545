//! Core units, angles, and clock helpers for the Flight Plan Calculator workspace.

/// Shared constants for navigation arithmetic.
pub mod constants {
    /// Minutes per 24-hour day, the modulus for clock-time wraparound.
    pub const MINUTES_PER_DAY: i64 = 24 * 60;
    /// Kilometres per nautical mile.
    pub const KM_PER_NM: f64 = 1.852;
    /// Statute miles per nautical mile.
    pub const MI_PER_NM: f64 = 1.150_779;
}

/// Bearing and angle helpers.
///
/// All bearings in the engine are degrees in the "from north, clockwise"
/// compass convention, kept in [0, 360).
pub mod angles {
    /// Normalize a bearing in degrees to the range [0, 360).
    #[inline]
    pub fn normalize_deg(deg: f64) -> f64 {
        let wrapped = deg % 360.0;
        if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn to_radians(deg: f64) -> f64 {
        deg.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn to_degrees(rad: f64) -> f64 {
        rad.to_degrees()
    }
}

/// Airspeed unit conversions.
///
/// The engine computes exclusively in knots, nautical miles, and hours;
/// these helpers normalize foreign units at the configuration boundary.
pub mod units {
    use super::constants::{KM_PER_NM, MI_PER_NM};

    /// Convert kilometres per hour to knots.
    #[inline]
    pub fn kmh_to_kt(v: f64) -> f64 {
        v / KM_PER_NM
    }

    /// Convert knots to kilometres per hour.
    #[inline]
    pub fn kt_to_kmh(v: f64) -> f64 {
        v * KM_PER_NM
    }

    /// Convert statute miles per hour to knots.
    #[inline]
    pub fn mph_to_kt(v: f64) -> f64 {
        v / MI_PER_NM
    }

    /// Convert knots to statute miles per hour.
    #[inline]
    pub fn kt_to_mph(v: f64) -> f64 {
        v * MI_PER_NM
    }
}

/// Clock-time arithmetic over 4-digit `HHMM` strings.
pub mod clock {
    use super::constants::MINUTES_PER_DAY;

    /// Error raised for strings that are not a valid zero-padded `HHMM` time.
    #[derive(Debug, thiserror::Error, PartialEq, Eq)]
    pub enum ClockError {
        #[error("clock time '{0}' is not a 4-digit HHMM string")]
        Malformed(String),
        #[error("clock time '{0}' is out of range (hours 00-23, minutes 00-59)")]
        OutOfRange(String),
    }

    /// Parse a zero-padded `HHMM` string into minutes since midnight.
    pub fn parse_hhmm(hhmm: &str) -> Result<i64, ClockError> {
        if hhmm.len() != 4 || !hhmm.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ClockError::Malformed(hhmm.to_string()));
        }
        let hours: i64 = hhmm[..2].parse().map_err(|_| ClockError::Malformed(hhmm.to_string()))?;
        let minutes: i64 = hhmm[2..].parse().map_err(|_| ClockError::Malformed(hhmm.to_string()))?;
        if hours > 23 || minutes > 59 {
            return Err(ClockError::OutOfRange(hhmm.to_string()));
        }
        Ok(hours * 60 + minutes)
    }

    /// Render minutes since midnight as a zero-padded `HHMM` string.
    pub fn format_hhmm(minutes_since_midnight: i64) -> String {
        let wrapped = minutes_since_midnight.rem_euclid(MINUTES_PER_DAY);
        format!("{:02}{:02}", wrapped / 60, wrapped % 60)
    }

    /// Add a (possibly negative) minute delta to an `HHMM` clock time,
    /// wrapping around the 24-hour day.
    pub fn add_minutes(hhmm: &str, delta_min: i64) -> Result<String, ClockError> {
        let base = parse_hhmm(hhmm)?;
        Ok(format_hhmm(base + delta_min))
    }
}
