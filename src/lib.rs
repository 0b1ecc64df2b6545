//! Flight-leg calculation engine for personal flight planning.
//!
//! The heavy lifting lives in the workspace member crates; this facade
//! re-exports them under stable paths so front-ends (CLI, future GUI or
//! web shells) share one dependency.

pub use flightcalc_core::{angles, clock, constants, units};

pub use flightcalc_config as config;
pub use flightcalc_export as export;
pub use flightcalc_itinerary as itinerary;
pub use flightcalc_leg as leg;
pub use flightcalc_plan as plan;
pub use flightcalc_wind as wind;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
