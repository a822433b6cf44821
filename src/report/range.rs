use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use crate::model::{DateLike, Scoped};

/// Milliseconds in a 365.25-day year.
const MILLIS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Inclusive reporting window. The end date covers its whole calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Midnight at the start of `from`.
    pub fn start(&self) -> NaiveDateTime {
        self.from.and_time(NaiveTime::MIN)
    }

    /// 23:59:59.999 on `to`.
    pub fn end(&self) -> NaiveDateTime {
        let end_of_day =
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        self.to.and_time(end_of_day)
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start() <= at && at <= self.end()
    }

    /// A record with no readable date is never in range.
    pub fn contains_date(&self, date: Option<&DateLike>) -> bool {
        date.and_then(DateLike::to_datetime)
            .is_some_and(|at| self.contains(at))
    }

    /// Length of the window in 365.25-day years. Never negative.
    pub fn years(&self) -> f64 {
        years_between(self.start(), self.end())
    }

    /// `YYYY-MM-DD` pair used in export names and headers.
    pub fn labels(&self) -> (String, String) {
        (
            self.from.format("%Y-%m-%d").to_string(),
            self.to.format("%Y-%m-%d").to_string(),
        )
    }
}

/// Elapsed 365.25-day years from `start` to `end`, clamped at zero.
pub fn years_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let delta: TimeDelta = end - start;
    let years = delta.num_milliseconds() as f64 / MILLIS_PER_YEAR;
    if years.is_finite() && years > 0.0 {
        years
    } else {
        0.0
    }
}

/// Filter `records` down to those whose date falls inside `range`.
pub fn in_range<'a, T, F>(records: &'a [T], date_of: F, range: &DateRange) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<&DateLike>,
{
    records
        .iter()
        .filter(|r| range.contains_date(date_of(*r)))
        .collect()
}

/// Organization scoping with the legacy fallback: a record that carries no
/// organization id is visible to every organization.
pub fn in_scope<T: Scoped>(record: &T, organization_id: Option<&str>) -> bool {
    match (organization_id, record.organization_id()) {
        (Some(wanted), Some(own)) => own.to_string() == wanted,
        _ => true,
    }
}
