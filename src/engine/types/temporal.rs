//! Fixed-width temporal encodings and their conversions to `chrono` types.
//!
//! All values are stored relative to the Unix epoch (1970-01-01 00:00:00 UTC);
//! the conversions return `None` when the stored integer falls outside what
//! `chrono` can represent (including the engine's +/- infinity sentinels).

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::engine::types::logical_type::TimeUnit;

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub days: i32,
}

impl Date {
    pub const POSITIVE_INFINITY: i32 = i32::MAX;
    pub const NEGATIVE_INFINITY: i32 = -i32::MAX;

    pub fn new(days: i32) -> Self {
        Self { days }
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self::new(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        if self.days == Self::POSITIVE_INFINITY || self.days == Self::NEGATIVE_INFINITY {
            return None;
        }
        NaiveDate::from_num_days_from_ce_opt(self.days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days {
            Self::POSITIVE_INFINITY => f.write_str("infinity"),
            Self::NEGATIVE_INFINITY => f.write_str("-infinity"),
            _ => match self.to_naive() {
                Some(d) => write!(f, "{}", d.format("%Y-%m-%d")),
                None => write!(f, "{} days", self.days),
            },
        }
    }
}

/// Time of day in microseconds since midnight. `24:00:00` is a legal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    pub micros: i64,
}

impl Time {
    pub fn new(micros: i64) -> Self {
        Self { micros }
    }

    pub fn to_naive(&self) -> Option<NaiveTime> {
        if !(0..MICROS_PER_DAY).contains(&self.micros) {
            return None;
        }
        let secs = (self.micros / MICROS_PER_SECOND) as u32;
        let nanos = ((self.micros % MICROS_PER_SECOND) * 1_000) as u32;
        NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
    }
}

fn write_clock(f: &mut fmt::Formatter<'_>, micros: i64) -> fmt::Result {
    if micros < 0 {
        f.write_str("-")?;
    }
    let micros = micros.unsigned_abs();
    let secs = micros / MICROS_PER_SECOND as u64;
    let frac = micros % MICROS_PER_SECOND as u64;
    write!(f, "{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)?;
    if frac != 0 {
        let digits = format!("{frac:06}");
        write!(f, ".{}", digits.trim_end_matches('0'))?;
    }
    Ok(())
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clock(f, self.micros)
    }
}

/// Time of day with a UTC offset, packed by the engine into one u64:
/// micros in the upper 40 bits, `MAX_OFFSET - offset_seconds` in the lower 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeTz {
    pub micros: i64,
    pub offset_seconds: i32,
}

impl TimeTz {
    pub const OFFSET_BITS: u32 = 24;
    pub const MAX_OFFSET: i32 = 16 * 60 * 60 - 1;

    pub fn new(micros: i64, offset_seconds: i32) -> Self {
        Self {
            micros,
            offset_seconds,
        }
    }

    pub fn from_bits(bits: u64) -> Self {
        let encoded_offset = (bits & ((1u64 << Self::OFFSET_BITS) - 1)) as i32;
        Self {
            micros: (bits >> Self::OFFSET_BITS) as i64,
            offset_seconds: Self::MAX_OFFSET - encoded_offset,
        }
    }

    pub fn to_bits(&self) -> u64 {
        ((self.micros as u64) << Self::OFFSET_BITS) | (Self::MAX_OFFSET - self.offset_seconds) as u64
    }
}

impl fmt::Display for TimeTz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clock(f, self.micros)?;
        let sign = if self.offset_seconds < 0 { '-' } else { '+' };
        let offset = self.offset_seconds.unsigned_abs();
        write!(f, "{sign}{:02}", offset / 3600)?;
        let minutes = (offset / 60) % 60;
        let seconds = offset % 60;
        if minutes != 0 || seconds != 0 {
            write!(f, ":{minutes:02}")?;
        }
        if seconds != 0 {
            write!(f, ":{seconds:02}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    pub value: i64,
    pub unit: TimeUnit,
}

impl Timestamp {
    pub const POSITIVE_INFINITY: i64 = i64::MAX;
    pub const NEGATIVE_INFINITY: i64 = -i64::MAX;

    pub fn new(value: i64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub fn micros(value: i64) -> Self {
        Self::new(value, TimeUnit::Microsecond)
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if self.value == Self::POSITIVE_INFINITY || self.value == Self::NEGATIVE_INFINITY {
            return None;
        }
        match self.unit {
            TimeUnit::Second => DateTime::from_timestamp(self.value, 0),
            TimeUnit::Millisecond => DateTime::from_timestamp_millis(self.value),
            TimeUnit::Microsecond => DateTime::from_timestamp_micros(self.value),
            TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(self.value)),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Self::POSITIVE_INFINITY => f.write_str("infinity"),
            Self::NEGATIVE_INFINITY => f.write_str("-infinity"),
            raw => match self.to_datetime() {
                Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
                None => write!(f, "{raw}"),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub months: i32,
    pub days: i32,
    pub micros: i64,
}

impl Interval {
    pub const WIDTH: usize = 16;

    pub fn new(months: i32, days: i32, micros: i64) -> Self {
        Self {
            months,
            days,
            micros,
        }
    }
}

fn write_part(
    f: &mut fmt::Formatter<'_>,
    first: &mut bool,
    amount: i32,
    unit: &str,
) -> fmt::Result {
    if amount == 0 {
        return Ok(());
    }
    if !*first {
        f.write_str(" ")?;
    }
    *first = false;
    let plural = if amount.abs() == 1 { "" } else { "s" };
    write!(f, "{amount} {unit}{plural}")
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        write_part(f, &mut first, self.months / 12, "year")?;
        write_part(f, &mut first, self.months % 12, "month")?;
        write_part(f, &mut first, self.days, "day")?;
        if self.micros != 0 || first {
            if !first {
                f.write_str(" ")?;
            }
            write_clock(f, self.micros)?;
        }
        Ok(())
    }
}

/// UUIDs are stored as a HUGEINT with the top bit flipped so that signed
/// comparison matches the textual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uuid(pub u128);

impl Uuid {
    const SIGN_FLIP: u128 = 1u128 << 127;

    pub fn from_stored(raw: i128) -> Self {
        Uuid((raw as u128) ^ Self::SIGN_FLIP)
    }

    pub fn to_stored(&self) -> i128 {
        (self.0 ^ Self::SIGN_FLIP) as i128
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = format!("{:032x}", self.0);
        write!(
            f,
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}
