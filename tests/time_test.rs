use chrono::{DateTime, Datelike, Duration, Local, TimeZone, Utc};
use coingecko_market_rs::common::{format_history_date, parse_api_datetime};
use coingecko_market_rs::{epoch_to_time, time_to_epoch_seconds};

#[test]
fn test_epoch_seconds_and_millis_give_same_instant() {
    let from_seconds = epoch_to_time(1552349953.0).expect("valid seconds");
    let from_millis = epoch_to_time(1552349953000.0).expect("valid millis");

    assert_eq!(from_seconds, from_millis);
    assert_eq!(from_seconds.with_timezone(&Utc).year(), 2019);
    assert_eq!(from_seconds.timestamp(), 1552349953);
}

#[test]
fn test_epoch_digit_threshold() {
    // 11 digits: still seconds
    let eleven = epoch_to_time(99999999999.0).expect("valid seconds");
    assert_eq!(eleven.with_timezone(&Utc).year(), 5138);

    // 12 digits: milliseconds
    let twelve = epoch_to_time(100000000000.0).expect("valid millis");
    assert_eq!(twelve.timestamp(), 100000000);
    assert_eq!(twelve.with_timezone(&Utc).year(), 1973);
}

#[test]
fn test_epoch_fraction_counts_toward_length() {
    // "1700000000.75" is 13 characters long: read as milliseconds
    let time = epoch_to_time(1700000000.75).expect("valid millis");
    assert_eq!(time.timestamp_millis(), 1700000001);
    assert_eq!(time.with_timezone(&Utc).year(), 1970);

    // Short fractional values stay seconds
    let time = epoch_to_time(1700000.5).expect("valid seconds");
    assert_eq!(time.timestamp_millis(), 1700000500);

    // The sign counts too: "-1500000000" is 11 characters
    let time = epoch_to_time(-1500000000.0).expect("valid seconds");
    assert_eq!(time.timestamp(), -1500000000);
}

#[test]
fn test_epoch_rejects_non_finite() {
    assert!(epoch_to_time(f64::NAN).is_none());
    assert!(epoch_to_time(f64::INFINITY).is_none());
}

#[test]
fn test_epoch_round_trip_within_one_second() {
    let samples = [
        Local::now(),
        Local.with_ymd_and_hms(2019, 3, 12, 0, 19, 13).unwrap(),
        Local.timestamp_millis_opt(1704164645999).unwrap(),
        Local.timestamp_opt(0, 0).unwrap() + Duration::milliseconds(1500),
    ];

    for time in samples {
        let round_trip = epoch_to_time(time_to_epoch_seconds(&time) as f64).expect("valid epoch");
        let drift = (time - round_trip).num_milliseconds().abs();
        assert!(drift < 1000, "{} drifted {}ms", time, drift);
    }
}

#[test]
fn test_time_to_epoch_seconds_truncates_toward_zero() {
    let after = Utc.timestamp_millis_opt(1_700_000_000_900).unwrap();
    assert_eq!(time_to_epoch_seconds(&after), 1_700_000_000);

    let before = Utc.timestamp_millis_opt(-1_500).unwrap();
    assert_eq!(time_to_epoch_seconds(&before), -1);
}

#[test]
fn test_parse_api_datetime() {
    let parsed = parse_api_datetime("2021-11-10T14:24:11.849Z").expect("RFC 3339");
    assert_eq!(parsed.timestamp_millis(), 1636554251849);

    let with_offset = parse_api_datetime("2024-01-02T03:04:05+00:00").expect("RFC 3339");
    assert_eq!(with_offset.timestamp(), 1704164645);

    assert!(parse_api_datetime("yesterday").is_none());
}

#[test]
fn test_format_history_date_has_no_padding() {
    let date: DateTime<Utc> = Utc.with_ymd_and_hms(2019, 3, 2, 23, 0, 0).unwrap();
    assert_eq!(format_history_date(&date), "2-3-2019");

    let date = Utc.with_ymd_and_hms(2021, 12, 25, 0, 0, 0).unwrap();
    assert_eq!(format_history_date(&date), "25-12-2021");
}
