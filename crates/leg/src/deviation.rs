//! Compass deviation table resolver.
//!
//! Deviation tables pair a magnetic heading (`for_heading_deg`) with the
//! compass heading actually steered (`steer_heading_deg`). The resolver
//! interpolates linearly between the bracketing entries; headings outside
//! the table wrap around through north.

use serde::{Deserialize, Serialize};

/// One row of a compass deviation table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationEntry {
    pub for_heading_deg: f64,
    pub steer_heading_deg: f64,
}

/// Resolve the compass heading to steer for a magnetic heading.
///
/// Returns `None` when the table is unusable (fewer than two entries, or
/// entries not strictly ascending); callers fall back to the magnetic
/// heading in that case.
pub fn resolve(table: &[DeviationEntry], magnetic_heading_deg: f64) -> Option<f64> {
    if table.len() < 2 {
        return None;
    }
    if table
        .windows(2)
        .any(|pair| pair[1].for_heading_deg <= pair[0].for_heading_deg)
    {
        return None;
    }

    let heading = magnetic_heading_deg.rem_euclid(360.0);
    let first = table[0];
    let last = table[table.len() - 1];

    if heading < first.for_heading_deg || heading > last.for_heading_deg {
        // Interpolate across the north wraparound between the last and
        // first entries.
        let span = first.for_heading_deg + 360.0 - last.for_heading_deg;
        let offset = if heading >= last.for_heading_deg {
            heading - last.for_heading_deg
        } else {
            heading + 360.0 - last.for_heading_deg
        };
        let deviation = deviation_of(&last) + (deviation_of(&first) - deviation_of(&last)) * offset / span;
        return Some((heading + deviation).rem_euclid(360.0));
    }

    let upper = table
        .iter()
        .position(|entry| entry.for_heading_deg >= heading)?;
    if table[upper].for_heading_deg == heading {
        return Some(table[upper].steer_heading_deg.rem_euclid(360.0));
    }
    let lower = &table[upper - 1];
    let upper = &table[upper];
    let fraction = (heading - lower.for_heading_deg) / (upper.for_heading_deg - lower.for_heading_deg);
    let deviation = deviation_of(lower) + (deviation_of(upper) - deviation_of(lower)) * fraction;
    Some((heading + deviation).rem_euclid(360.0))
}

/// Signed deviation of an entry, folded to [-180, 180) so interpolation is
/// unaffected by the 0/360 discontinuity of the raw steer value.
fn deviation_of(entry: &DeviationEntry) -> f64 {
    (entry.steer_heading_deg - entry.for_heading_deg + 180.0).rem_euclid(360.0) - 180.0
}
