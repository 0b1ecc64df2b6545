//! Waypoint itinerary synthesizer.
//!
//! Takes a leg profile plus named distance checkpoints, inserts synthetic
//! phase-transition and terminal checkpoints, and produces a time-ordered
//! itinerary with cumulative time, cumulative fuel, per-segment deltas, and
//! clock-time ETAs. Time integrates ground speed piecewise across the
//! climb/cruise/descent distance bands; a segment between two waypoints may
//! span several bands. Minutes are rounded once, at output, so rounding
//! error never compounds across waypoints.

use std::cmp::Ordering;

use flightcalc_core::clock;
use flightcalc_leg::{FlightParams, PhaseResult};
use serde::{Deserialize, Serialize};

/// Synthetic checkpoint marking the end of the climb phase.
pub const TOP_OF_CLIMB: &str = "Top of climb";
/// Synthetic checkpoint marking the start of the descent phase.
pub const BEGIN_DESCENT: &str = "Begin descent";
/// Terminal checkpoint name when no descent phase is flown.
pub const ARRIVAL: &str = "Arrival";
/// Terminal checkpoint name when a descent phase ends the leg.
pub const LANDED: &str = "Landed";

/// A named progress checkpoint, `distance_nm` measured from the leg start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub distance_nm: f64,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, distance_nm: f64) -> Self {
        Self {
            name: name.into(),
            distance_nm,
        }
    }
}

/// One row of the synthesized itinerary.
///
/// `distance_nm` is plan-relative when the flight params carry an elapsed
/// distance, leg-relative otherwise. Fuel fields stay `None` when no fuel
/// data was available to allocate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointResult {
    pub name: String,
    pub distance_nm: f64,
    pub time_since_last_min: i64,
    pub cumulative_time_min: i64,
    pub eta: Option<String>,
    pub fuel_used: Option<f64>,
    pub fuel_since_last: Option<f64>,
}

/// Optional context refining the synthesized itinerary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItineraryOptions<'a> {
    /// Fuel flow per hour for the cruise band, used when no dedicated
    /// cruise flow is given.
    pub fuel_flow: Option<f64>,
    /// Departure time and carry-over state from earlier legs.
    pub params: Option<&'a FlightParams>,
    /// Total leg distance; anchors the descent checkpoint and the terminal
    /// checkpoint.
    pub leg_distance_nm: Option<f64>,
    pub climb: Option<&'a PhaseResult>,
    /// Dedicated cruise fuel flow, preferred over `fuel_flow`.
    pub cruise_fuel_flow: Option<f64>,
    pub descent: Option<&'a PhaseResult>,
}

/// Build the time-ordered itinerary for one leg.
///
/// Returns an empty vector when the cruise ground speed is not positive:
/// with no forward progress, time over a waypoint is undefined rather than
/// infinite. The caller's waypoint slice is never mutated; checkpoints are
/// merged into a fresh sequence.
pub fn build_itinerary(
    waypoints: &[Waypoint],
    cruise_ground_speed_kt: f64,
    options: &ItineraryOptions<'_>,
) -> Vec<WaypointResult> {
    if cruise_ground_speed_kt <= 0.0 {
        return Vec::new();
    }

    // Degenerate phases (zero distance or stalled ground speed) cannot be
    // integrated over and are ignored.
    let climb = options
        .climb
        .filter(|p| p.distance_nm > 0.0 && p.ground_speed_kt > 0.0);
    let descent = options
        .descent
        .filter(|p| p.distance_nm > 0.0 && p.ground_speed_kt > 0.0)
        .filter(|_| options.leg_distance_nm.is_some());

    let entries = merge_checkpoints(waypoints, climb, descent, options.leg_distance_nm);
    let bands = build_bands(cruise_ground_speed_kt, climb, descent, options);

    let params = options.params;
    let elapsed_min = params.and_then(|p| p.elapsed_minutes).unwrap_or(0.0);
    let elapsed_distance = params.and_then(|p| p.elapsed_distance_nm).unwrap_or(0.0);
    let previous_fuel = params.and_then(|p| p.previous_fuel_used).unwrap_or(0.0);
    let departure_time = params.and_then(|p| p.departure_time.as_deref());

    let fuel_available = options.cruise_fuel_flow.or(options.fuel_flow).is_some()
        || climb.is_some()
        || descent.is_some();

    let mut results = Vec::with_capacity(entries.len());
    let mut cursor_nm = 0.0;
    let mut total_time_hr = 0.0;
    let mut total_fuel = 0.0;

    for entry in entries {
        let (segment_hr, segment_fuel) = integrate(&bands, cursor_nm, entry.distance_nm);
        cursor_nm = cursor_nm.max(entry.distance_nm);
        total_time_hr += segment_hr;
        total_fuel += segment_fuel;

        let leg_relative_min = (total_time_hr * 60.0).round();
        let cumulative_time_min = (elapsed_min + leg_relative_min).round() as i64;
        let eta = departure_time
            .and_then(|time| clock::add_minutes(time, cumulative_time_min).ok());

        results.push(WaypointResult {
            name: entry.name,
            distance_nm: elapsed_distance + entry.distance_nm,
            time_since_last_min: (segment_hr * 60.0).round() as i64,
            cumulative_time_min,
            eta,
            fuel_used: fuel_available.then_some(previous_fuel + total_fuel),
            fuel_since_last: fuel_available.then_some(segment_fuel),
        });
    }

    results
}

struct Entry {
    name: String,
    distance_nm: f64,
}

/// Stable-sort the caller's waypoints and weave in the synthetic
/// checkpoints by distance.
fn merge_checkpoints(
    waypoints: &[Waypoint],
    climb: Option<&PhaseResult>,
    descent: Option<&PhaseResult>,
    leg_distance_nm: Option<f64>,
) -> Vec<Entry> {
    let mut entries: Vec<Entry> = waypoints
        .iter()
        .map(|wp| Entry {
            name: wp.name.clone(),
            distance_nm: wp.distance_nm,
        })
        .collect();
    entries.sort_by(|a, b| {
        a.distance_nm
            .partial_cmp(&b.distance_nm)
            .unwrap_or(Ordering::Equal)
    });

    if let Some(climb) = climb {
        insert_by_distance(&mut entries, TOP_OF_CLIMB, climb.distance_nm);
    }
    if let (Some(descent), Some(total)) = (descent, leg_distance_nm) {
        insert_by_distance(&mut entries, BEGIN_DESCENT, total - descent.distance_nm);
    }
    if let Some(total) = leg_distance_nm {
        let beyond_last = entries.last().is_none_or(|last| total > last.distance_nm);
        if beyond_last {
            let name = if descent.is_some() { LANDED } else { ARRIVAL };
            entries.push(Entry {
                name: name.to_string(),
                distance_nm: total,
            });
        }
    }
    entries
}

/// Insert a checkpoint before the first waypoint with a greater distance.
fn insert_by_distance(entries: &mut Vec<Entry>, name: &str, distance_nm: f64) {
    let position = entries
        .iter()
        .position(|entry| entry.distance_nm > distance_nm)
        .unwrap_or(entries.len());
    entries.insert(
        position,
        Entry {
            name: name.to_string(),
            distance_nm,
        },
    );
}

/// Fuel allocation rule for one ground-speed band.
enum Allocation {
    /// Phase fuel spread proportionally over the phase distance.
    Proportional { phase_distance_nm: f64, fuel: f64 },
    /// Fuel flow per hour applied to time spent in the band.
    Flow(f64),
}

struct Band {
    /// Exclusive upper distance bound; the last band is unbounded.
    end_nm: f64,
    ground_speed_kt: f64,
    allocation: Allocation,
}

fn build_bands(
    cruise_ground_speed_kt: f64,
    climb: Option<&PhaseResult>,
    descent: Option<&PhaseResult>,
    options: &ItineraryOptions<'_>,
) -> Vec<Band> {
    let cruise_flow = options.cruise_fuel_flow.or(options.fuel_flow).unwrap_or(0.0);

    let climb_end = climb.map_or(0.0, |p| p.distance_nm);
    let mut bands = Vec::with_capacity(3);
    if let Some(climb) = climb {
        bands.push(Band {
            end_nm: climb.distance_nm,
            ground_speed_kt: climb.ground_speed_kt,
            allocation: Allocation::Proportional {
                phase_distance_nm: climb.distance_nm,
                fuel: climb.fuel_used,
            },
        });
    }
    match (descent, options.leg_distance_nm) {
        (Some(descent), Some(total)) => {
            // Descent cannot start before the climb ends.
            let descent_start = (total - descent.distance_nm).max(climb_end);
            bands.push(Band {
                end_nm: descent_start,
                ground_speed_kt: cruise_ground_speed_kt,
                allocation: Allocation::Flow(cruise_flow),
            });
            bands.push(Band {
                end_nm: f64::INFINITY,
                ground_speed_kt: descent.ground_speed_kt,
                allocation: Allocation::Proportional {
                    phase_distance_nm: descent.distance_nm,
                    fuel: descent.fuel_used,
                },
            });
        }
        _ => {
            bands.push(Band {
                end_nm: f64::INFINITY,
                ground_speed_kt: cruise_ground_speed_kt,
                allocation: Allocation::Flow(cruise_flow),
            });
        }
    }
    bands
}

/// Integrate time and fuel over `[from_nm, to_nm]` across the bands.
fn integrate(bands: &[Band], from_nm: f64, to_nm: f64) -> (f64, f64) {
    let mut time_hr = 0.0;
    let mut fuel = 0.0;
    let mut cursor = from_nm;

    for band in bands {
        if cursor >= to_nm {
            break;
        }
        let upper = to_nm.min(band.end_nm);
        if upper <= cursor {
            continue;
        }
        let covered = upper - cursor;
        let band_time = covered / band.ground_speed_kt;
        time_hr += band_time;
        fuel += match band.allocation {
            Allocation::Proportional {
                phase_distance_nm,
                fuel,
            } => covered / phase_distance_nm * fuel,
            Allocation::Flow(flow) => band_time * flow,
        };
        cursor = upper;
    }

    (time_hr, fuel)
}
