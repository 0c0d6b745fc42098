//! Scalar conversions from raw stream bytes to model values.
//!
//! The container streams encode scalars in a handful of house formats: day numbers
//! relative to a fixed epoch, durations in tenths of minutes, currency at 100x scale,
//! UTF-16LE strings terminated by a NUL pair. This module is the single place those
//! conversions live; the field decoder and the entity readers call through here and
//! never touch the raw encodings themselves.
//!
//! All readers are total: a truncated buffer or an out-of-range code yields `None`
//! (or a documented fallback), never a panic. That matches the decode posture of the
//! rest of the crate, where one bad field leaves a gap instead of failing the read.
//!
//! # Examples
//!
//! ```rust
//! use mppscope::file::convert;
//! use mppscope::model::{Duration, TimeUnit};
//!
//! // Raw durations are tenths of minutes: 4800 tenths = 8 hours = 1 working day.
//! let duration = convert::duration_value(4800.0, TimeUnit::Days);
//! assert_eq!(duration, Duration::new(1.0, TimeUnit::Days));
//! ```

use uguid::Guid;
use widestring::U16String;

use crate::{
    file::io::{read_le, MppIO},
    model::{Duration, ProjectDefaults, TimeUnit, Timestamp},
};

/// The format's day-number epoch, 1983-12-31T00:00:00, in Unix milliseconds.
pub const EPOCH_OFFSET_MS: i64 = 441_676_800_000;

/// Milliseconds per day.
const DAY_MS: i64 = 86_400_000;

/// Milliseconds per tenth of a minute.
const TENTH_MINUTE_MS: i64 = 6_000;

/// Low five bits of a duration units code select the unit.
const DURATION_UNITS_MASK: u16 = 0x1F;

/// Read one little-endian value at `offset`, or `None` past the end.
fn read_at<T: MppIO>(data: &[u8], offset: usize) -> Option<T> {
    data.get(offset..).and_then(|slice| read_le(slice).ok())
}

/// Read a timestamp stored as a `u16` time of day in tenths of minutes followed by a
/// `u16` day number.
///
/// Day 0 and 0xFFFF mean "no timestamp". Day numbers below 100 appear in the wild
/// with a valid time component and are treated as day 0. A time of 0xFFFF is
/// midnight.
#[must_use]
pub fn timestamp(data: &[u8], offset: usize) -> Option<Timestamp> {
    let days = read_at::<u16>(data, offset + 2)?;
    if days == 0 || days == 0xFFFF {
        return None;
    }
    let days = if days < 100 { 0 } else { i64::from(days) };

    let time = match read_at::<u16>(data, offset)? {
        0xFFFF => 0,
        value => i64::from(value),
    };

    Some(Timestamp::from_unix_millis(
        EPOCH_OFFSET_MS + days * DAY_MS + time * TENTH_MINUTE_MS,
    ))
}

/// Read a date stored as a `u16` day number. 0xFFFF means "no date".
#[must_use]
pub fn date(data: &[u8], offset: usize) -> Option<Timestamp> {
    let days = read_at::<u16>(data, offset)?;
    if days == 0xFFFF {
        return None;
    }
    Some(Timestamp::from_unix_millis(
        EPOCH_OFFSET_MS + i64::from(days) * DAY_MS,
    ))
}

/// Read a time of day stored as a `u16` in tenths of minutes, as minutes since
/// midnight.
#[must_use]
pub fn time_of_day_minutes(data: &[u8], offset: usize) -> Option<u32> {
    read_at::<u16>(data, offset).map(|value| u32::from(value) / 10)
}

/// Read a calendar period duration stored as a `u16` in tenths of minutes, as
/// milliseconds.
#[must_use]
pub fn period_duration_millis(data: &[u8], offset: usize) -> Option<i64> {
    read_at::<u16>(data, offset).map(|value| i64::from(value) * TENTH_MINUTE_MS)
}

/// Scale a raw duration value in tenths of minutes to the given unit.
///
/// Working units assume the product's stock calendar (8-hour day, 5-day week,
/// 4-week month); use [`adjusted_duration`] when project defaults are available.
#[must_use]
pub fn duration_value(value: f64, units: TimeUnit) -> Duration {
    let scaled = match units {
        TimeUnit::Minutes | TimeUnit::ElapsedMinutes => value / 10.0,
        TimeUnit::Hours | TimeUnit::ElapsedHours => value / 600.0,
        TimeUnit::Days => value / 4_800.0,
        TimeUnit::ElapsedDays => value / 14_400.0,
        TimeUnit::Weeks => value / 24_000.0,
        TimeUnit::ElapsedWeeks => value / 100_800.0,
        TimeUnit::Months => value / 96_000.0,
        TimeUnit::ElapsedMonths => value / 432_000.0,
        _ => value,
    };
    Duration::new(scaled, units)
}

/// Scale a raw duration in tenths of minutes to the given unit using the project's
/// working-time defaults for day, week and month lengths.
///
/// A raw value of -1 means "no duration". Elapsed units always use calendar time.
#[must_use]
pub fn adjusted_duration(
    defaults: &ProjectDefaults,
    duration: i32,
    units: TimeUnit,
) -> Option<Duration> {
    if duration == -1 {
        return None;
    }
    let value = f64::from(duration);

    let result = match units {
        TimeUnit::Days => {
            let units_per_day = f64::from(defaults.minutes_per_day) * 10.0;
            let total = if units_per_day == 0.0 {
                0.0
            } else {
                value / units_per_day
            };
            Duration::new(total, units)
        }
        TimeUnit::Weeks => {
            let units_per_week = f64::from(defaults.minutes_per_week) * 10.0;
            let total = if units_per_week == 0.0 {
                0.0
            } else {
                value / units_per_week
            };
            Duration::new(total, units)
        }
        TimeUnit::Months => {
            let units_per_month =
                f64::from(defaults.minutes_per_day) * f64::from(defaults.days_per_month) * 10.0;
            let total = if units_per_month == 0.0 {
                0.0
            } else {
                value / units_per_month
            };
            Duration::new(total, units)
        }
        _ => duration_value(value, units),
    };
    Some(result)
}

/// Decode a duration units code.
///
/// The low five bits select the unit; code 21 means "use the project default" and
/// unknown codes fall back to days.
#[must_use]
pub fn duration_units(code: u16, project_default: TimeUnit) -> TimeUnit {
    match code & DURATION_UNITS_MASK {
        3 => TimeUnit::Minutes,
        4 => TimeUnit::ElapsedMinutes,
        5 => TimeUnit::Hours,
        6 => TimeUnit::ElapsedHours,
        7 => TimeUnit::Days,
        8 => TimeUnit::ElapsedDays,
        9 => TimeUnit::Weeks,
        10 => TimeUnit::ElapsedWeeks,
        11 => TimeUnit::Months,
        12 => TimeUnit::ElapsedMonths,
        19 => TimeUnit::Percent,
        20 => TimeUnit::ElapsedPercent,
        21 => project_default,
        _ => TimeUnit::Days,
    }
}

/// Decode a work time units byte: 0 means "not set", otherwise the value is the
/// unit ordinal plus one.
#[must_use]
pub fn work_units(value: u8) -> Option<TimeUnit> {
    if value == 0 {
        return None;
    }
    Some(TimeUnit::from_ordinal(i32::from(value) - 1))
}

/// Decode a rate time units word: the value is the unit ordinal plus one.
#[must_use]
pub fn rate_units(value: u16) -> TimeUnit {
    TimeUnit::from_ordinal(i32::from(value) - 1)
}

/// Read a work amount stored as an 8-byte double in tenths of minutes at 100x
/// scale, as hours.
#[must_use]
pub fn work(data: &[u8], offset: usize) -> Option<Duration> {
    double(data, offset).map(|value| Duration::new(value / 60_000.0, TimeUnit::Hours))
}

/// Read an 8-byte IEEE 754 double. NaN normalizes to 0.
#[must_use]
pub fn double(data: &[u8], offset: usize) -> Option<f64> {
    read_at::<f64>(data, offset).map(|value| if value.is_nan() { 0.0 } else { value })
}

/// Read a currency amount stored as a double at 100x scale.
#[must_use]
pub fn currency(data: &[u8], offset: usize) -> Option<f64> {
    double(data, offset).map(|value| value / 100.0)
}

/// Read a percentage stored as a `u16`. Values outside 0..=100 mean "not set".
#[must_use]
pub fn percentage(data: &[u8], offset: usize) -> Option<f64> {
    let value = read_at::<u16>(data, offset)?;
    if value > 100 {
        return None;
    }
    Some(f64::from(value))
}

/// Read a 16-byte GUID in little-endian wire order. The all-zero GUID means
/// "not set".
#[must_use]
pub fn guid(data: &[u8], offset: usize) -> Option<Guid> {
    let bytes: [u8; 16] = data.get(offset..offset + 16)?.try_into().ok()?;
    if bytes == [0_u8; 16] {
        return None;
    }
    Some(Guid::from_bytes(bytes))
}

/// Read a UTF-16LE string terminated by a NUL pair or the end of the buffer.
///
/// The code units are copied out rather than reinterpreted in place, since blob
/// offsets carry no alignment guarantee.
#[must_use]
pub fn unicode_string(data: &[u8], offset: usize) -> String {
    let Some(slice) = data.get(offset..) else {
        return String::new();
    };

    let units: Vec<u16> = slice
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .collect();

    U16String::from_vec(units).to_string_lossy()
}

/// Read a single-byte string terminated by a NUL or the end of the buffer.
#[must_use]
pub fn ascii_string(data: &[u8], offset: usize) -> String {
    let Some(slice) = data.get(offset..) else {
        return String::new();
    };
    let end = slice.iter().position(|&byte| byte == 0).unwrap_or(slice.len());
    String::from_utf8_lossy(&slice[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use uguid::guid;

    use super::*;

    #[test]
    fn timestamp_day_and_time() {
        // Day 7475 after 1983-12-31 is 2004-06-18; 5100 tenths of minutes is 08:30.
        #[rustfmt::skip]
        let data: [u8; 4] = [
            0xEC, 0x13,     // time: 5100
            0x33, 0x1D,     // days: 7475
        ];
        let result = timestamp(&data, 0).unwrap();
        assert_eq!(result.to_string(), "2004-06-18T08:30:00");
    }

    #[test]
    fn timestamp_absent_days() {
        assert_eq!(timestamp(&[0x00, 0x00, 0x00, 0x00], 0), None);
        assert_eq!(timestamp(&[0x00, 0x00, 0xFF, 0xFF], 0), None);
    }

    #[test]
    fn timestamp_small_day_keeps_time() {
        // Day 50 is below the plausibility floor and treated as day 0.
        #[rustfmt::skip]
        let data: [u8; 4] = [
            0x58, 0x02,     // time: 600 tenths = 01:00
            0x32, 0x00,     // days: 50
        ];
        let result = timestamp(&data, 0).unwrap();
        assert_eq!(result.to_string(), "1983-12-31T01:00:00");
    }

    #[test]
    fn timestamp_midnight_marker() {
        #[rustfmt::skip]
        let data: [u8; 4] = [
            0xFF, 0xFF,     // time: not set, midnight
            0x33, 0x1D,     // days: 7475
        ];
        let result = timestamp(&data, 0).unwrap();
        assert_eq!(result.to_string(), "2004-06-18T00:00:00");
    }

    #[test]
    fn timestamp_truncated() {
        assert_eq!(timestamp(&[0x01, 0x02], 0), None);
    }

    #[test]
    fn date_day_number() {
        let result = date(&[0x01, 0x00], 0).unwrap();
        assert_eq!(result.to_string(), "1984-01-01T00:00:00");
        assert_eq!(date(&[0xFF, 0xFF], 0), None);
    }

    #[test]
    fn time_of_day_tenths() {
        // 5100 tenths of minutes = 510 minutes = 08:30.
        assert_eq!(time_of_day_minutes(&[0xEC, 0x13], 0), Some(510));
    }

    #[test]
    fn duration_divisors() {
        assert_eq!(duration_value(4800.0, TimeUnit::Days).value, 1.0);
        assert_eq!(duration_value(600.0, TimeUnit::Hours).value, 1.0);
        assert_eq!(duration_value(100_800.0, TimeUnit::ElapsedWeeks).value, 1.0);
        assert_eq!(duration_value(50.0, TimeUnit::Percent).value, 50.0);
    }

    #[test]
    fn adjusted_duration_uses_defaults() {
        let defaults = ProjectDefaults::default();
        let result = adjusted_duration(&defaults, 9600, TimeUnit::Days).unwrap();
        assert_eq!(result, Duration::new(2.0, TimeUnit::Days));

        let result = adjusted_duration(&defaults, 96_000, TimeUnit::Months).unwrap();
        assert_eq!(result, Duration::new(1.0, TimeUnit::Months));

        // A 10-hour day shortens the divisor.
        let long_days = ProjectDefaults {
            minutes_per_day: 600,
            ..ProjectDefaults::default()
        };
        let result = adjusted_duration(&long_days, 9600, TimeUnit::Days).unwrap();
        assert_eq!(result, Duration::new(1.6, TimeUnit::Days));
    }

    #[test]
    fn adjusted_duration_not_set() {
        let defaults = ProjectDefaults::default();
        assert_eq!(adjusted_duration(&defaults, -1, TimeUnit::Days), None);
    }

    #[test]
    fn adjusted_duration_elapsed_ignores_defaults() {
        let defaults = ProjectDefaults {
            minutes_per_day: 600,
            ..ProjectDefaults::default()
        };
        let result = adjusted_duration(&defaults, 14_400, TimeUnit::ElapsedDays).unwrap();
        assert_eq!(result, Duration::new(1.0, TimeUnit::ElapsedDays));
    }

    #[test]
    fn duration_units_codes() {
        let fallback = TimeUnit::Weeks;
        assert_eq!(duration_units(3, fallback), TimeUnit::Minutes);
        assert_eq!(duration_units(7, fallback), TimeUnit::Days);
        assert_eq!(duration_units(19, fallback), TimeUnit::Percent);
        assert_eq!(duration_units(21, fallback), TimeUnit::Weeks);
        assert_eq!(duration_units(0, fallback), TimeUnit::Days);
        // Only the low five bits matter.
        assert_eq!(duration_units(0x25, fallback), TimeUnit::Hours);
    }

    #[test]
    fn work_units_byte() {
        assert_eq!(work_units(0), None);
        assert_eq!(work_units(3), Some(TimeUnit::Days));
        assert_eq!(rate_units(2), TimeUnit::Hours);
    }

    #[test]
    fn work_divides_into_hours() {
        let data = 480_000.0_f64.to_le_bytes();
        let result = work(&data, 0).unwrap();
        assert_eq!(result, Duration::new(8.0, TimeUnit::Hours));
    }

    #[test]
    fn double_normalizes_nan() {
        let data = f64::NAN.to_le_bytes();
        assert_eq!(double(&data, 0), Some(0.0));
    }

    #[test]
    fn currency_is_stored_at_hundred_x() {
        let data = 150_000.0_f64.to_le_bytes();
        assert_eq!(currency(&data, 0), Some(1500.0));
    }

    #[test]
    fn percentage_range() {
        assert_eq!(percentage(&[50, 0], 0), Some(50.0));
        assert_eq!(percentage(&[100, 0], 0), Some(100.0));
        assert_eq!(percentage(&[101, 0], 0), None);
        assert_eq!(percentage(&[0xFF, 0xFF], 0), None);
    }

    #[test]
    fn guid_wire_order() {
        #[rustfmt::skip]
        let data: [u8; 16] = [
            0x33, 0x22, 0x11, 0x00,
            0x55, 0x44,
            0x77, 0x66,
            0x88, 0x99,
            0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF,
        ];
        assert_eq!(
            guid(&data, 0),
            Some(guid!("00112233-4455-6677-8899-aabbccddeeff"))
        );
    }

    #[test]
    fn guid_zero_is_absent() {
        assert_eq!(guid(&[0_u8; 16], 0), None);
        assert_eq!(guid(&[0_u8; 8], 0), None);
    }

    #[test]
    fn unicode_string_nul_terminated() {
        #[rustfmt::skip]
        let data: [u8; 14] = [
            b'D', 0x00, b'e', 0x00, b's', 0x00, b'i', 0x00, b'g', 0x00, b'n', 0x00,
            0x00, 0x00, // terminator
        ];
        assert_eq!(unicode_string(&data, 0), "Design");
    }

    #[test]
    fn unicode_string_runs_to_end_without_terminator() {
        let data = [b'O', 0x00, b'k', 0x00];
        assert_eq!(unicode_string(&data, 0), "Ok");
        assert_eq!(unicode_string(&data, 2), "k");
        assert_eq!(unicode_string(&data, 8), "");
    }

    #[test]
    fn ascii_string_nul_terminated() {
        assert_eq!(ascii_string(b"Design\0junk", 0), "Design");
        assert_eq!(ascii_string(b"Design", 0), "Design");
        assert_eq!(ascii_string(b"Design", 20), "");
    }
}
