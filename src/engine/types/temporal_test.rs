use chrono::NaiveDate;

use crate::engine::types::{Date, Interval, Time, TimeTz, TimeUnit, Timestamp, Uuid};

#[test]
fn date_counts_days_from_unix_epoch() {
    assert_eq!(Date::new(0).to_string(), "1970-01-01");
    assert_eq!(Date::new(-1).to_string(), "1969-12-31");
    assert_eq!(Date::new(19_723).to_string(), "2024-01-01");
    let d = NaiveDate::from_ymd_opt(2000, 2, 29).expect("date");
    assert_eq!(Date::from_naive(d).to_naive(), Some(d));
}

#[test]
fn date_infinity_sentinels() {
    assert_eq!(Date::new(Date::POSITIVE_INFINITY).to_string(), "infinity");
    assert_eq!(Date::new(Date::NEGATIVE_INFINITY).to_string(), "-infinity");
    assert_eq!(Date::new(Date::POSITIVE_INFINITY).to_naive(), None);
}

#[test]
fn time_formats_fraction_only_when_present() {
    assert_eq!(Time::new(0).to_string(), "00:00:00");
    assert_eq!(Time::new(45_296_000_000).to_string(), "12:34:56");
    assert_eq!(Time::new(45_296_500_000).to_string(), "12:34:56.5");
    assert_eq!(Time::new(86_400_000_000).to_string(), "24:00:00");
    assert_eq!(Time::new(86_400_000_000).to_naive(), None);
}

#[test]
fn time_tz_bit_packing() {
    let t = TimeTz::new(3_600_000_000, 19_800);
    assert_eq!(TimeTz::from_bits(t.to_bits()), t);
    assert_eq!(t.to_string(), "01:00:00+05:30");
    let t = TimeTz::new(0, -7 * 3600);
    assert_eq!(TimeTz::from_bits(t.to_bits()).to_string(), "00:00:00-07");
}

#[test]
fn timestamp_units() {
    let expected = "2021-01-01 00:00:00";
    assert_eq!(Timestamp::new(1_609_459_200, TimeUnit::Second).to_string(), expected);
    assert_eq!(Timestamp::new(1_609_459_200_000, TimeUnit::Millisecond).to_string(), expected);
    assert_eq!(Timestamp::micros(1_609_459_200_000_000).to_string(), expected);
    assert_eq!(
        Timestamp::new(1_609_459_200_000_000_000, TimeUnit::Nanosecond).to_string(),
        expected
    );
    assert_eq!(
        Timestamp::micros(1_609_459_200_123_456).to_string(),
        "2021-01-01 00:00:00.123456"
    );
    assert_eq!(Timestamp::micros(Timestamp::POSITIVE_INFINITY).to_string(), "infinity");
}

#[test]
fn interval_display() {
    assert_eq!(Interval::new(14, 3, 0).to_string(), "1 year 2 months 3 days");
    assert_eq!(Interval::new(0, 1, 3_723_000_000).to_string(), "1 day 01:02:03");
    assert_eq!(Interval::new(0, 0, 0).to_string(), "00:00:00");
    assert_eq!(Interval::new(-1, 0, 0).to_string(), "-1 month");
}

#[test]
fn uuid_flips_top_bit() {
    let text = "00112233-4455-6677-8899-aabbccddeeff";
    let uuid = Uuid(0x00112233_4455_6677_8899_aabbccddeeff);
    assert_eq!(uuid.to_string(), text);
    let stored = uuid.to_stored();
    assert!(stored < 0);
    assert_eq!(Uuid::from_stored(stored), uuid);
}
