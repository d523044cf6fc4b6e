use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// Upstream reports a same-slot conflict as a human-readable message, e.g.
// "Client is already booked on 1/2/2020". There is no structured error code
// to match on, so the whole brittle pattern lives in this one function.
static CONFLICT_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"already booked on (\d{1,2})/(\d{1,2})/(\d{4})").unwrap());

/// A stale-past-appointment conflict parsed out of an upstream error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleConflict {
    pub month: u32,
    pub day: u32,
    pub year: i32,
    pub date: NaiveDate,
}

/// Classify an upstream booking error. Returns a descriptor only when the
/// message names a same-slot conflict on a date strictly before `today`;
/// future-dated conflicts and every other failure shape return `None`.
pub fn classify(message: &str, today: NaiveDate) -> Option<StaleConflict> {
    let caps = CONFLICT_DATE_RE.captures(message)?;

    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    (date < today).then_some(StaleConflict {
        month,
        day,
        year,
        date,
    })
}
