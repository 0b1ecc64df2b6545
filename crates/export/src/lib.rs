//! Export helpers for CSV navigation logs and JSON plan sidecars.

pub mod navlog {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use flightcalc_itinerary::WaypointResult;

    const HEADER: &str =
        "leg,name,distance_nm,time_since_last_min,cumulative_time_min,eta,fuel_used,fuel_since_last";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard navigation-log CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the navigation-log exporter. Optional fields are
    /// rendered as empty cells, not zeros.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub leg: usize,
        pub name: &'a str,
        pub distance_nm: f64,
        pub time_since_last_min: i64,
        pub cumulative_time_min: i64,
        pub eta: Option<&'a str>,
        pub fuel_used: Option<f64>,
        pub fuel_since_last: Option<f64>,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{:.1},{},{},{},{},{}",
                self.leg,
                self.name,
                self.distance_nm,
                self.time_since_last_min,
                self.cumulative_time_min,
                self.eta.unwrap_or(""),
                self.fuel_used.map(|v| format!("{v:.2}")).unwrap_or_default(),
                self.fuel_since_last
                    .map(|v| format!("{v:.2}"))
                    .unwrap_or_default(),
            )
        }
    }

    /// Write one leg's itinerary rows, tagged with the leg index.
    pub fn write_leg(
        writer: &mut dyn Write,
        leg: usize,
        rows: &[WaypointResult],
    ) -> io::Result<()> {
        for row in rows {
            Record {
                leg,
                name: &row.name,
                distance_nm: row.distance_nm,
                time_since_last_min: row.time_since_last_min,
                cumulative_time_min: row.cumulative_time_min,
                eta: row.eta.as_deref(),
                fuel_used: row.fuel_used,
                fuel_since_last: row.fuel_since_last,
            }
            .write_to(writer)?;
        }
        Ok(())
    }
}

pub mod sidecar {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use flightcalc_itinerary::WaypointResult;
    use flightcalc_plan::FlightPlan;
    use serde::{Deserialize, Serialize};
    use serde_json::to_writer_pretty;

    /// JSON envelope persisting a plan together with its synthesized
    /// itineraries. The plan records round-trip losslessly.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PlanSidecar {
        pub plan: FlightPlan,
        pub itineraries: Vec<Vec<WaypointResult>>,
    }

    /// Write the sidecar, creating parent directories as needed.
    pub fn write_plan(path: &Path, sidecar: &PlanSidecar) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, sidecar)?;
        Ok(())
    }

    /// Read a sidecar back.
    pub fn read_plan(path: &Path) -> io::Result<PlanSidecar> {
        let file = File::open(path)?;
        let sidecar = serde_json::from_reader(file)?;
        Ok(sidecar)
    }
}
