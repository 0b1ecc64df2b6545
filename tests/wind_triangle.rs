use flightplan_calculator::wind::{WindError, WindObservation, solve};

#[test]
fn calm_wind_keeps_ground_speed_at_tas() {
    let solution = solve(&WindObservation::calm(), 45.0, 110.0).expect("calm wind solves");
    assert!(
        (solution.ground_speed_kt - 110.0).abs() < 1e-9,
        "GS ({:.3} kt) should equal TAS in calm conditions",
        solution.ground_speed_kt
    );
    assert_eq!(solution.correction_angle_deg, 0.0);
    assert_eq!(solution.headwind_kt, 0.0);
}

#[test]
fn direct_headwind_subtracts_from_ground_speed() {
    let wind = WindObservation::new(0.0, 20.0);
    let solution = solve(&wind, 0.0, 100.0).expect("headwind solves");
    assert!((solution.ground_speed_kt - 80.0).abs() < 1e-9);
    assert!((solution.headwind_kt - 20.0).abs() < 1e-9);
    assert!(solution.crosswind_kt.abs() < 1e-9);
    assert_eq!(solution.correction_angle_deg, 0.0);
}

#[test]
fn direct_tailwind_adds_to_ground_speed() {
    let wind = WindObservation::new(180.0, 20.0);
    let solution = solve(&wind, 0.0, 100.0).expect("tailwind solves");
    assert!((solution.ground_speed_kt - 120.0).abs() < 1e-9);
    assert!((solution.headwind_kt + 20.0).abs() < 1e-9, "tailwind is negative headwind");
}

#[test]
fn crosswind_from_the_right_is_positive_and_corrects_right() {
    let wind = WindObservation::new(90.0, 20.0);
    let solution = solve(&wind, 0.0, 100.0).expect("crosswind solves");
    assert!((solution.crosswind_kt - 20.0).abs() < 1e-9);
    assert!(
        solution.correction_angle_deg > 0.0,
        "correction should be into the wind (right)"
    );
}

#[test]
fn large_correction_angle_uses_effective_tas() {
    // asin(20/100) ≈ 11.5°, above the 10° threshold. With the effective-TAS
    // refinement a pure crosswind leaves the along-track speed at TAS.
    let wind = WindObservation::new(90.0, 20.0);
    let solution = solve(&wind, 0.0, 100.0).expect("crosswind solves");
    assert!(solution.correction_angle_deg > 10.0);
    assert!(solution.effective_tas_kt < 100.0);
    assert!(
        (solution.ground_speed_kt - 100.0).abs() < 1e-6,
        "pure crosswind with effective TAS should leave GS at TAS (got {:.4})",
        solution.ground_speed_kt
    );
}

#[test]
fn small_correction_angle_keeps_raw_tas() {
    // asin(10/100) ≈ 5.7°, below the threshold.
    let wind = WindObservation::new(90.0, 10.0);
    let solution = solve(&wind, 0.0, 100.0).expect("crosswind solves");
    assert!(solution.correction_angle_deg < 10.0);
    assert_eq!(solution.effective_tas_kt, 100.0);
    assert!((solution.ground_speed_kt - (100.0_f64 * 100.0 + 100.0).sqrt()).abs() < 1e-9);
}

#[test]
fn bearings_are_normalized_before_solving() {
    let wrapped = solve(&WindObservation::new(450.0, 20.0), -360.0, 100.0).expect("solves");
    let plain = solve(&WindObservation::new(90.0, 20.0), 0.0, 100.0).expect("solves");
    assert!((wrapped.ground_speed_kt - plain.ground_speed_kt).abs() < 1e-9);
    assert!((wrapped.correction_angle_deg - plain.correction_angle_deg).abs() < 1e-9);
}

#[test]
fn excessive_crosswind_is_a_domain_error() {
    let wind = WindObservation::new(90.0, 120.0);
    match solve(&wind, 0.0, 100.0) {
        Err(WindError::UnattainableHeading { crosswind_kt, tas_kt }) => {
            assert!((crosswind_kt - 120.0).abs() < 1e-9);
            assert_eq!(tas_kt, 100.0);
        }
        other => panic!("expected UnattainableHeading, got {other:?}"),
    }
}

#[test]
fn non_positive_airspeed_is_rejected() {
    let err = solve(&WindObservation::calm(), 0.0, 0.0).expect_err("zero TAS");
    assert_eq!(err, WindError::NonPositiveAirspeed(0.0));
}
