//! Configuration models and loaders for the Flight Plan Calculator.
//!
//! Aircraft catalogs are TOML files (or directories of TOML files) and
//! plan manifests are single YAML or TOML documents. Airspeeds may be
//! given in knots, km/h, or mph; they are normalized to knots here, at the
//! boundary, so the engine only ever sees knots.

use std::fs::File;
use std::path::{Path, PathBuf};

use flightcalc_core::units;
use serde::Deserialize;
use thiserror::Error;

/// Airspeed units accepted in catalogs.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpeedUnit {
    #[default]
    #[serde(rename = "kt")]
    Knots,
    #[serde(rename = "kmh")]
    KilometresPerHour,
    #[serde(rename = "mph")]
    MilesPerHour,
}

/// A speed with its unit; defaults to knots when the unit is omitted.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SpeedConfig {
    pub value: f64,
    #[serde(default)]
    pub unit: SpeedUnit,
}

impl SpeedConfig {
    /// Normalize to knots.
    pub fn to_knots(self) -> f64 {
        match self.unit {
            SpeedUnit::Knots => self.value,
            SpeedUnit::KilometresPerHour => units::kmh_to_kt(self.value),
            SpeedUnit::MilesPerHour => units::mph_to_kt(self.value),
        }
    }
}

/// Climb or descent performance row from the aircraft's handbook.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PhaseConfig {
    pub speed: SpeedConfig,
    pub distance_nm: f64,
    pub fuel_used: f64,
}

/// One row of a compass deviation card.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct DeviationRow {
    pub for_heading_deg: f64,
    pub steer_heading_deg: f64,
}

/// Aircraft performance record parsed from the catalog.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AircraftConfig {
    pub name: String,
    pub cruise_speed: SpeedConfig,
    /// Cruise fuel flow per hour, in the operator's fuel unit of choice.
    pub fuel_flow: f64,
    #[serde(default)]
    pub climb: Option<PhaseConfig>,
    #[serde(default)]
    pub descent: Option<PhaseConfig>,
    #[serde(default)]
    pub deviation_table: Vec<DeviationRow>,
}

/// Wind entry in a plan manifest ("from" convention).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct WindConfig {
    pub direction_deg: f64,
    pub speed: SpeedConfig,
}

/// Named checkpoint along a leg.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WaypointConfig {
    pub name: String,
    pub distance_nm: f64,
}

/// One leg of a plan manifest.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LegConfig {
    pub true_heading_deg: f64,
    pub distance_nm: f64,
    pub magnetic_variation_deg: f64,
    pub wind: WindConfig,
    #[serde(default)]
    pub climb_wind: Option<WindConfig>,
    #[serde(default)]
    pub descent_wind: Option<WindConfig>,
    #[serde(default)]
    pub waypoints: Vec<WaypointConfig>,
}

/// A flight-plan manifest.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlanConfig {
    pub name: String,
    pub aircraft: String,
    /// Departure clock time as a 4-digit `HHMM` string.
    #[serde(default)]
    pub departure_time: Option<String>,
    pub legs: Vec<LegConfig>,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("aircraft '{0}' not found in catalog")]
    UnknownAircraft(String),
}

/// Load aircraft records from a TOML/YAML file or a directory of TOML files.
pub fn load_aircraft<P: AsRef<Path>>(path: P) -> Result<Vec<AircraftConfig>, ConfigError> {
    load_records(path)
}

/// Load a single plan manifest from a YAML or TOML file.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlanConfig, ConfigError> {
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Pick an aircraft by name (case-insensitive), defaulting to the catalog's
/// first entry when no name is given.
pub fn select_aircraft<'a>(
    catalog: &'a [AircraftConfig],
    name: Option<&str>,
) -> Result<&'a AircraftConfig, ConfigError> {
    match name {
        Some(name) => catalog
            .iter()
            .find(|aircraft| aircraft.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownAircraft(name.to_string())),
        None => catalog
            .first()
            .ok_or_else(|| ConfigError::UnknownAircraft("<empty catalog>".to_string())),
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
