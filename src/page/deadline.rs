//! Next-day deadline for the date-offset countdown widget

use chrono::{DateTime, Days, SecondsFormat, TimeZone, Utc};

/// Hour of day the next-day deadline falls on
pub const DEFAULT_DEADLINE_HOUR: u32 = 9;

/// Tomorrow at `hour:00:00` in `now`'s time zone.
///
/// Returns `None` for an hour past 23 or when that local time does not
/// exist (a DST gap). An ambiguous local time resolves to the earlier instant.
pub fn next_deadline<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32) -> Option<DateTime<Tz>> {
    let tomorrow = now.date_naive().checked_add_days(Days::new(1))?;
    let local = tomorrow.and_hms_opt(hour, 0, 0)?;
    now.timezone().from_local_datetime(&local).earliest()
}

/// Whole seconds from `now` until `deadline`, zero if it has passed
pub fn seconds_until<Tz: TimeZone>(now: &DateTime<Tz>, deadline: &DateTime<Tz>) -> i64 {
    deadline
        .clone()
        .signed_duration_since(now.clone())
        .num_seconds()
        .max(0)
}

/// UTC timestamp for the widget's `data-date` attribute, e.g. `2026-10-20T06:00:00.000Z`
pub fn data_date<Tz: TimeZone>(deadline: &DateTime<Tz>) -> String {
    deadline
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
