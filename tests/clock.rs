use flightplan_calculator::clock::{ClockError, add_minutes, format_hhmm, parse_hhmm};

#[test]
fn midnight_wraparound() {
    assert_eq!(add_minutes("2345", 15).unwrap(), "0000");
    assert_eq!(add_minutes("2345", 30).unwrap(), "0015");
}

#[test]
fn negative_deltas_wrap_backwards() {
    assert_eq!(add_minutes("0010", -30).unwrap(), "2340");
    assert_eq!(add_minutes("0000", -1).unwrap(), "2359");
}

#[test]
fn zero_delta_is_identity() {
    assert_eq!(add_minutes("1234", 0).unwrap(), "1234");
}

#[test]
fn add_then_subtract_round_trips() {
    for delta in [-725, -60, -1, 0, 1, 59, 360, 1439] {
        let forward = add_minutes("0915", delta).unwrap();
        assert_eq!(
            add_minutes(&forward, -delta).unwrap(),
            "0915",
            "delta {delta} should round-trip"
        );
    }
}

#[test]
fn multi_day_deltas_reduce_modulo_24h() {
    assert_eq!(add_minutes("0600", 24 * 60).unwrap(), "0600");
    assert_eq!(add_minutes("0600", 3 * 24 * 60 + 90).unwrap(), "0730");
}

#[test]
fn malformed_times_are_rejected() {
    assert_eq!(parse_hhmm("935"), Err(ClockError::Malformed("935".to_string())));
    assert_eq!(parse_hhmm("09h5"), Err(ClockError::Malformed("09h5".to_string())));
    assert_eq!(parse_hhmm("24150"), Err(ClockError::Malformed("24150".to_string())));
    assert_eq!(parse_hhmm("2460"), Err(ClockError::OutOfRange("2460".to_string())));
    assert_eq!(parse_hhmm("9960"), Err(ClockError::OutOfRange("9960".to_string())));
}

#[test]
fn formatting_is_zero_padded() {
    assert_eq!(format_hhmm(5), "0005");
    assert_eq!(format_hhmm(60), "0100");
    assert_eq!(format_hhmm(23 * 60 + 59), "2359");
    assert_eq!(format_hhmm(-10), "2350");
}
