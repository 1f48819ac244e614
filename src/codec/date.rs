use chrono::{NaiveDate, NaiveTime};

/// Sort key shared by undated cells (`-` or empty) and unparseable tokens.
/// Undated routes sort as earliest under ascending key order.
pub const UNDATED: i64 = 0;

/// Decodes a `D/M/YYYY` token (one- or two-digit day and month accepted).
///
/// Tokens that do not split into exactly three slash-separated numeric parts,
/// and calendar-invalid dates such as `31/2/2021`, are `None`: treated as
/// missing rather than rolled over into a neighboring month.
pub fn parse(token: &str) -> Option<NaiveDate> {
    let mut parts = token.trim().split('/');

    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Sort key for a raw date cell: midnight-UTC millisecond timestamp, or
/// [`UNDATED`] when there is nothing usable to decode.
pub fn sort_key(token: &str) -> i64 {
    match parse(token) {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc().timestamp_millis(),
        None => UNDATED,
    }
}
