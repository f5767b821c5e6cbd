//! GPS week/time-of-week to UTC conversion.
//!
//! GPS time runs without leap seconds from the 1980-01-06 epoch. UTC is
//! recovered by subtracting the GPS-UTC offset in force at that instant.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use nmea_model::{ConversionConfig, TimeKey};

/// UTC dates from which GPS-UTC grew to the given number of seconds.
const LEAP_SECONDS: [(i32, u32, u32, i64); 18] = [
    (1981, 7, 1, 1),
    (1982, 7, 1, 2),
    (1983, 7, 1, 3),
    (1985, 7, 1, 4),
    (1988, 1, 1, 5),
    (1990, 1, 1, 6),
    (1991, 1, 1, 7),
    (1992, 7, 1, 8),
    (1993, 7, 1, 9),
    (1994, 7, 1, 10),
    (1996, 1, 1, 11),
    (1997, 7, 1, 12),
    (1999, 1, 1, 13),
    (2006, 1, 1, 14),
    (2009, 1, 1, 15),
    (2012, 7, 1, 16),
    (2015, 7, 1, 17),
    (2017, 1, 1, 18),
];

fn gps_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1980, 1, 6)?.and_hms_opt(0, 0, 0)
}

/// GPS-UTC offset in seconds for an instant expressed in GPS time.
fn leap_offset(gps: NaiveDateTime) -> i64 {
    LEAP_SECONDS
        .iter()
        .rev()
        .find_map(|&(year, month, day, offset)| {
            let effective = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?
                + TimeDelta::seconds(offset);
            (gps >= effective).then_some(offset)
        })
        .unwrap_or(0)
}

/// Undo week overflow and 10-bit week-number rollover.
///
/// A time-of-week at or past one week moves into the following week, then
/// weeks below the baseline are lifted by the rollover period.
pub fn normalize_week(key: TimeKey, config: &ConversionConfig) -> TimeKey {
    let mut week = key.week;
    let mut time_of_week = key.time_of_week;
    if time_of_week >= config.seconds_per_week {
        time_of_week -= config.seconds_per_week;
        week = week.saturating_add(1);
    }
    let floor = config.baseline_week.ceil() as i64;
    if config.week_rollover > 0 && week < floor {
        let rollover = i128::from(config.week_rollover);
        let deficit = i128::from(floor) - i128::from(week);
        let periods = (deficit + rollover - 1) / rollover;
        week = i64::try_from(i128::from(week) + periods * rollover).unwrap_or(i64::MAX);
    }
    TimeKey::new(week, time_of_week)
}

/// Converts a GPS time key to a UTC timestamp rounded to the millisecond.
pub fn gps_to_utc(key: TimeKey, config: &ConversionConfig) -> Option<NaiveDateTime> {
    if !key.time_of_week.is_finite() {
        return None;
    }
    let key = normalize_week(key, config);
    let millis = (key.time_of_week * 1000.0).round() as i64;
    let gps = gps_epoch()?
        .checked_add_signed(TimeDelta::try_weeks(key.week)?)?
        .checked_add_signed(TimeDelta::try_milliseconds(millis)?)?;
    gps.checked_sub_signed(TimeDelta::seconds(leap_offset(gps)))
}

/// `hhmmss.sss`
pub fn format_utc_time(utc: NaiveDateTime) -> String {
    utc.format("%H%M%S%.3f").to_string()
}

/// `ddmmyy`
pub fn format_utc_date(utc: NaiveDateTime) -> String {
    utc.format("%d%m%y").to_string()
}
