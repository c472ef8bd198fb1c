use std::collections::BTreeSet;

use crate::{
    date::CalendarDate,
    limit::LimitPolicy,
    weekday::{Weekday, WeekdaySet},
};

/// Yields every occurrence of one weekday on or after a given date.
///
/// The first date yielded is the "sentinel": the start date itself when it
/// already falls on the weekday, and otherwise the next date that does. Every
/// date after that is exactly one week later than the one before it.
#[derive(Clone, Debug)]
pub struct WeeklyByDay {
    next: Option<CalendarDate>,
}

impl WeeklyByDay {
    pub fn new(start: CalendarDate, weekday: Weekday) -> WeeklyByDay {
        let offset = start.weekday().days_until(weekday);
        WeeklyByDay { next: start.add_days(i64::from(offset)) }
    }
}

impl Iterator for WeeklyByDay {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<CalendarDate> {
        let cur = self.next?;
        self.next = cur.add_days(7);
        Some(cur)
    }
}

impl std::iter::FusedIterator for WeeklyByDay {}

/// Merges the occurrences of every weekday in `weekdays` into one ascending
/// and duplicate free sequence, bounded by `policy`.
///
/// Each weekday is bounded by the same policy on its own. For an end date,
/// that is already the final answer. For a count of `n`, each weekday
/// contributes up to `n` dates, and only the first `n` dates of the merged
/// sequence are kept.
pub(crate) fn weekly(
    start: CalendarDate,
    weekdays: WeekdaySet,
    policy: &LimitPolicy,
) -> Vec<CalendarDate> {
    let mut merged = BTreeSet::new();
    for weekday in weekdays.iter() {
        merged.extend(policy.take(WeeklyByDay::new(start, weekday)));
    }
    let mut dates: Vec<CalendarDate> = merged.into_iter().collect();
    let total = dates.len();
    policy.truncate(&mut dates);
    log::debug!(
        "merged {total} occurrences of {weekdays} starting at {start}, \
         kept {kept}",
        kept = dates.len(),
    );
    dates
}
