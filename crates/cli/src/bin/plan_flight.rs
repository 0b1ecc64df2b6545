use std::path::PathBuf;

use clap::Parser;
use flightplan_calculator::config::{
    self, AircraftConfig, LegConfig, PlanConfig, WindConfig, load_aircraft, load_plan,
};
use flightplan_calculator::export::{navlog, sidecar};
use flightplan_calculator::itinerary::Waypoint;
use flightplan_calculator::leg::deviation::DeviationEntry;
use flightplan_calculator::leg::{FlightParams, LegInput, PhaseInput};
use flightplan_calculator::plan::FlightPlan;
use flightplan_calculator::wind::WindObservation;

#[derive(Parser)]
#[command(author, version, about = "Compute headings, ETAs, and fuel for a flight plan")]
struct Cli {
    /// Plan manifest (YAML or TOML)
    #[arg(long)]
    plan: PathBuf,

    /// Aircraft catalog: a TOML file or a directory of TOML files
    #[arg(long, default_value = "configs/aircraft")]
    aircraft: PathBuf,

    /// Aircraft name override (defaults to the manifest's aircraft)
    #[arg(long)]
    aircraft_name: Option<String>,

    /// Departure time override as a 4-digit HHMM string
    #[arg(long)]
    departure: Option<String>,

    /// Write the navigation log as CSV to this path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a JSON sidecar with the plan and itineraries to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let manifest = load_plan(&cli.plan)?;
    let catalog = load_aircraft(&cli.aircraft)?;
    let aircraft = config::select_aircraft(
        &catalog,
        cli.aircraft_name.as_deref().or(Some(manifest.aircraft.as_str())),
    )?;

    let departure_time = cli.departure.clone().or_else(|| manifest.departure_time.clone());
    if let Some(time) = &departure_time {
        flightplan_calculator::clock::parse_hhmm(time)?;
    }

    let deviation_table = deviation_entries(aircraft);
    let deviation = (!deviation_table.is_empty()).then_some(deviation_table.as_slice());

    let plan = assemble_plan(&manifest, aircraft, departure_time.as_deref(), deviation)?;

    print_report(&plan, &manifest, aircraft);

    if let Some(output) = &cli.output {
        let mut writer = navlog::writer_for_path(output)?;
        navlog::write_header(writer.as_mut())?;
        for (index, _) in plan.legs.iter().enumerate() {
            if let Some(rows) = plan.leg_itinerary(index) {
                navlog::write_leg(writer.as_mut(), index + 1, &rows)?;
            }
        }
    }

    if let Some(json) = &cli.json {
        let itineraries = (0..plan.legs.len())
            .map(|index| plan.leg_itinerary(index).unwrap_or_default())
            .collect();
        sidecar::write_plan(
            json,
            &sidecar::PlanSidecar {
                plan: plan.clone(),
                itineraries,
            },
        )?;
    }

    Ok(())
}

fn assemble_plan(
    manifest: &PlanConfig,
    aircraft: &AircraftConfig,
    departure_time: Option<&str>,
    deviation: Option<&[DeviationEntry]>,
) -> anyhow::Result<FlightPlan> {
    let mut plan = FlightPlan::new(manifest.name.clone());
    for (index, leg_cfg) in manifest.legs.iter().enumerate() {
        let params = (index == 0).then(|| FlightParams {
            departure_time: departure_time.map(str::to_string),
            ..FlightParams::default()
        });
        let input = leg_input(leg_cfg, aircraft, params);
        let waypoints = leg_cfg
            .waypoints
            .iter()
            .map(|wp| Waypoint::new(wp.name.clone(), wp.distance_nm))
            .collect();
        plan.add_leg(input, waypoints, deviation)?;
    }
    Ok(plan)
}

fn leg_input(
    leg: &LegConfig,
    aircraft: &AircraftConfig,
    params: Option<FlightParams>,
) -> LegInput {
    LegInput {
        true_heading_deg: leg.true_heading_deg,
        cruise_tas_kt: aircraft.cruise_speed.to_knots(),
        cruise_wind: wind_observation(&leg.wind),
        magnetic_variation_deg: leg.magnetic_variation_deg,
        distance_nm: leg.distance_nm,
        fuel_flow: aircraft.fuel_flow,
        climb: phase_input(aircraft.climb.as_ref(), leg.climb_wind.as_ref()),
        descent: phase_input(aircraft.descent.as_ref(), leg.descent_wind.as_ref()),
        params,
    }
}

fn phase_input(
    phase: Option<&config::PhaseConfig>,
    wind: Option<&WindConfig>,
) -> Option<PhaseInput> {
    phase.map(|p| PhaseInput {
        tas_kt: p.speed.to_knots(),
        distance_nm: p.distance_nm,
        fuel_used: p.fuel_used,
        wind: wind.map(wind_observation),
    })
}

fn wind_observation(wind: &WindConfig) -> WindObservation {
    WindObservation::new(wind.direction_deg, wind.speed.to_knots())
}

fn deviation_entries(aircraft: &AircraftConfig) -> Vec<DeviationEntry> {
    aircraft
        .deviation_table
        .iter()
        .map(|row| DeviationEntry {
            for_heading_deg: row.for_heading_deg,
            steer_heading_deg: row.steer_heading_deg,
        })
        .collect()
}

fn print_report(plan: &FlightPlan, manifest: &PlanConfig, aircraft: &AircraftConfig) {
    println!("=== Flight Plan: {} ({}) ===", manifest.name, aircraft.name);
    for (index, leg) in plan.legs.iter().enumerate() {
        let Some(result) = &leg.result else { continue };
        println!("Leg {} ({:.1} NM)", index + 1, leg.input.distance_nm);
        println!(
            "  MC {:03.0}°  MH {:03.0}°  CH {:03.0}°  WCA {:+.1}°",
            result.magnetic_course_deg,
            result.magnetic_heading_deg,
            result.compass_course_deg,
            result.correction_angle_deg,
        );
        println!(
            "  GS {:.0} kt  headwind {:+.0} kt  crosswind {:+.0} kt",
            result.ground_speed_kt, result.headwind_kt, result.crosswind_kt,
        );
        match (result.eta_hr, result.leg_fuel) {
            (Some(eta), Some(fuel)) => {
                let (h, m) = split_hours(eta);
                println!("  ETE {}h {:02}m  fuel {:.1}", h, m, fuel);
            }
            _ => println!("  ETE n/a"),
        }
        if let Some(rows) = plan.leg_itinerary(index) {
            for row in rows {
                let eta = row.eta.as_deref().unwrap_or("----");
                let fuel = row
                    .fuel_used
                    .map(|v| format!("{v:.1}"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "    {:<16} {:6.1} NM  +{:3} min  T{:4} min  ETA {}  fuel {}",
                    row.name,
                    row.distance_nm,
                    row.time_since_last_min,
                    row.cumulative_time_min,
                    eta,
                    fuel,
                );
            }
        }
    }
}

fn split_hours(hours: f64) -> (i64, i64) {
    let total_minutes = (hours * 60.0).round() as i64;
    (total_minutes / 60, total_minutes % 60)
}
