use flightplan_calculator::export::{navlog, sidecar};
use flightplan_calculator::itinerary::Waypoint;
use flightplan_calculator::leg::{FlightParams, LegInput};
use flightplan_calculator::plan::FlightPlan;
use flightplan_calculator::wind::WindObservation;

fn sample_plan() -> FlightPlan {
    let mut plan = FlightPlan::new("export sample");
    let input = LegInput {
        true_heading_deg: 90.0,
        cruise_tas_kt: 120.0,
        cruise_wind: WindObservation::calm(),
        magnetic_variation_deg: 2.0,
        distance_nm: 60.0,
        fuel_flow: 12.0,
        climb: None,
        descent: None,
        params: Some(FlightParams {
            departure_time: Some("0900".to_string()),
            ..FlightParams::default()
        }),
    };
    plan.add_leg(
        input,
        vec![Waypoint::new("MID", 30.0), Waypoint::new("NEAR", 50.0)],
        None,
    )
    .expect("leg computes");
    plan
}

#[test]
fn navigation_log_csv_round_trips_through_a_reader() {
    let plan = sample_plan();
    let rows = plan.leg_itinerary(0).expect("itinerary");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("navlog.csv");
    {
        let mut writer = navlog::writer_for_path(&path).expect("writer");
        navlog::write_header(writer.as_mut()).expect("header");
        navlog::write_leg(writer.as_mut(), 1, &rows).expect("rows");
    }

    let mut reader = csv::Reader::from_path(&path).expect("csv back");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        [
            "leg",
            "name",
            "distance_nm",
            "time_since_last_min",
            "cumulative_time_min",
            "eta",
            "fuel_used",
            "fuel_since_last",
        ]
    );

    let records: Vec<csv::StringRecord> =
        reader.records().collect::<Result<_, _>>().expect("records");
    assert_eq!(records.len(), rows.len());
    assert_eq!(&records[0][1], "MID");
    assert_eq!(&records[0][4], "15");
    assert_eq!(&records[0][5], "0915");

    // The terminal checkpoint reaches the full leg distance.
    let last = records.last().unwrap();
    assert_eq!(&last[1], "Arrival");
    assert_eq!(&last[2], "60.0");
}

#[test]
fn csv_writer_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/out/navlog.csv");
    let mut writer = navlog::writer_for_path(&path).expect("writer");
    navlog::write_header(writer.as_mut()).expect("header");
    drop(writer);
    assert!(path.exists());
}

#[test]
fn json_sidecar_round_trips_the_plan_losslessly() {
    let plan = sample_plan();
    let itineraries = vec![plan.leg_itinerary(0).expect("itinerary")];

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("plan.json");
    sidecar::write_plan(
        &path,
        &sidecar::PlanSidecar {
            plan: plan.clone(),
            itineraries: itineraries.clone(),
        },
    )
    .expect("write sidecar");

    let loaded = sidecar::read_plan(&path).expect("read sidecar");
    assert_eq!(loaded.plan, plan);
    assert_eq!(loaded.itineraries, itineraries);
}

#[test]
fn library_version_is_exposed() {
    assert!(!flightplan_calculator::version().is_empty());
}
