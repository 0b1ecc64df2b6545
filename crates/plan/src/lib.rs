//! Flight plan records and the multi-leg propagator.
//!
//! A plan is an ordered sequence of legs. Each leg after the first receives
//! its elapsed time, elapsed distance, and previous fuel from the prior
//! leg's computed totals; editing a leg therefore re-derives every
//! downstream leg, strictly in plan order, and never touches legs upstream
//! of the edit.

use std::collections::BTreeMap;

use flightcalc_itinerary::{ItineraryOptions, Waypoint, WaypointResult, build_itinerary};
use flightcalc_leg::deviation::DeviationEntry;
use flightcalc_leg::{CourseResult, FlightParams, LegError, LegInput, build_profile};
use serde::{Deserialize, Serialize};

/// One leg of a flight plan: its inputs, its progress checkpoints, and the
/// last computed projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlanLeg {
    pub input: LegInput,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    /// Freshly recomputed whenever this or any upstream leg changes.
    #[serde(default)]
    pub result: Option<CourseResult>,
}

/// An ordered, named sequence of legs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub name: String,
    pub legs: Vec<FlightPlanLeg>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlanError {
    #[error("leg {index}: {source}")]
    Leg {
        index: usize,
        #[source]
        source: LegError,
    },
    #[error("leg index {index} out of bounds for a plan with {len} legs")]
    OutOfBounds { index: usize, len: usize },
}

impl FlightPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            legs: Vec::new(),
        }
    }

    /// Append a leg and compute it, seeding its carry-over state from the
    /// previously last leg.
    pub fn add_leg(
        &mut self,
        input: LegInput,
        waypoints: Vec<Waypoint>,
        deviation_table: Option<&[DeviationEntry]>,
    ) -> Result<(), PlanError> {
        self.legs.push(FlightPlanLeg {
            input,
            waypoints,
            result: None,
        });
        let from = self.legs.len().saturating_sub(2);
        self.recompute_from(from, deviation_table)
    }

    /// Recompute leg `index` and every leg after it, in plan order.
    ///
    /// Each downstream leg's `elapsed_minutes`, `elapsed_distance_nm`, and
    /// `previous_fuel_used` are overwritten from the prior leg's freshly
    /// computed totals before that leg itself is recomputed.
    pub fn recompute_from(
        &mut self,
        index: usize,
        deviation_table: Option<&[DeviationEntry]>,
    ) -> Result<(), PlanError> {
        if index >= self.legs.len() {
            return Err(PlanError::OutOfBounds {
                index,
                len: self.legs.len(),
            });
        }

        for i in index..self.legs.len() {
            let profile = build_profile(&self.legs[i].input, deviation_table)
                .map_err(|source| PlanError::Leg { index: i, source })?;

            if i + 1 < self.legs.len() {
                let carry = carry_over(&self.legs[i].input, &profile);
                let next = self.legs[i + 1]
                    .input
                    .params
                    .get_or_insert_with(FlightParams::default);
                next.elapsed_minutes = Some(carry.elapsed_minutes);
                next.elapsed_distance_nm = Some(carry.elapsed_distance_nm);
                next.previous_fuel_used = Some(carry.previous_fuel_used);
                next.departure_time = carry.departure_time;
            }

            self.legs[i].result = Some(profile);
        }
        Ok(())
    }

    /// Synthesize the itinerary for one leg from its last computed profile.
    ///
    /// `None` when the index is out of bounds or the leg has not been
    /// computed yet.
    pub fn leg_itinerary(&self, index: usize) -> Option<Vec<WaypointResult>> {
        let leg = self.legs.get(index)?;
        let result = leg.result.as_ref()?;
        let options = ItineraryOptions {
            fuel_flow: Some(leg.input.fuel_flow),
            params: leg.input.params.as_ref(),
            leg_distance_nm: Some(leg.input.distance_nm),
            climb: result.climb.as_ref(),
            cruise_fuel_flow: None,
            descent: result.descent.as_ref(),
        };
        Some(build_itinerary(
            &leg.waypoints,
            result.ground_speed_kt,
            &options,
        ))
    }
}

struct CarryOver {
    elapsed_minutes: f64,
    elapsed_distance_nm: f64,
    previous_fuel_used: f64,
    departure_time: Option<String>,
}

/// Totals handed from a computed leg to its successor. A leg whose profile
/// could not produce time or fuel (zero distance, stalled phase) passes its
/// own carry-over state through unchanged.
fn carry_over(input: &LegInput, profile: &CourseResult) -> CarryOver {
    let params = input.params.as_ref();
    let prior_elapsed = params.and_then(|p| p.elapsed_minutes).unwrap_or(0.0);
    let prior_distance = params.and_then(|p| p.elapsed_distance_nm).unwrap_or(0.0);
    let prior_fuel = params.and_then(|p| p.previous_fuel_used).unwrap_or(0.0);

    CarryOver {
        elapsed_minutes: profile
            .eta_hr
            .map_or(prior_elapsed, |eta| (prior_elapsed + eta * 60.0).round()),
        elapsed_distance_nm: prior_distance + input.distance_nm.max(0.0),
        previous_fuel_used: profile.fuel_used.unwrap_or(prior_fuel),
        departure_time: params.and_then(|p| p.departure_time.clone()),
    }
}

/// Storage boundary for plans. The engine itself holds no state between
/// calls; durable persistence lives behind this trait.
pub trait PlanStore {
    fn load(&self, name: &str) -> Option<FlightPlan>;
    fn store(&mut self, plan: &FlightPlan);
    fn remove(&mut self, name: &str) -> bool;
    fn names(&self) -> Vec<String>;
}

/// In-memory store, sufficient for tests and single-run CLI use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plans: BTreeMap<String, FlightPlan>,
}

impl PlanStore for MemoryStore {
    fn load(&self, name: &str) -> Option<FlightPlan> {
        self.plans.get(name).cloned()
    }

    fn store(&mut self, plan: &FlightPlan) {
        self.plans.insert(plan.name.clone(), plan.clone());
    }

    fn remove(&mut self, name: &str) -> bool {
        self.plans.remove(name).is_some()
    }

    fn names(&self) -> Vec<String> {
        self.plans.keys().cloned().collect()
    }
}
