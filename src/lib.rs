/*!
Compute concrete calendar dates from simple recurrence rules.

A recurrence is described by three things: a start date, a rule (every day,
every week on some weekdays, or every month) and a limit (a number of
occurrences or an inclusive end date). The result is a `Schedule`: the
generated dates, in order, grouped by the month they fall in.

```
use recur::{CalendarDate, RecurrenceLimit, Weekday};

let start: CalendarDate = "2024-02-01".parse()?;
let schedule = recur::weekly(
    start,
    [Weekday::Thursday, Weekday::Saturday],
    RecurrenceLimit::Count(4),
)?;
let dates: Vec<String> = schedule.dates().map(|d| d.to_string()).collect();
assert_eq!(dates, ["2024-02-01", "2024-02-03", "2024-02-08", "2024-02-10"]);

# Ok::<(), Box<dyn std::error::Error>>(())
```

All computation happens on civil dates. Anything with a time or a time zone
(such as a `jiff::Zoned`) is first reduced to the date it observes in its own
time zone.

Monthly recurrences never clamp. A recurrence on the 31st skips the months
without a 31st, and a recurrence on the fifth Thursday skips the months
without a fifth Thursday. Skipped months don't count toward a count limit.
*/

pub use crate::{
    date::{CalendarDate, MAX_YEAR, MIN_YEAR, Month, YearMonth},
    error::Error,
    generate::{
        Daily, MAX_SKIPPED_MONTHS, MonthlyByDate, MonthlyByWeekday,
        MonthlyMode, WeeklyByDay,
    },
    limit::{LimitPolicy, RecurrenceLimit},
    rule::Rule,
    schedule::{MonthSchedule, Schedule},
    weekday::{Weekday, WeekdaySet},
};

mod date;
mod error;
mod generate;
mod limit;
mod rule;
mod schedule;
mod weekday;

/// Returns every day starting at `start`, bounded by `limit`.
pub fn daily(
    start: impl Into<CalendarDate>,
    limit: RecurrenceLimit,
) -> Result<Schedule, Error> {
    let start = start.into();
    let policy = LimitPolicy::new(limit)?;
    let dates = policy.take(Daily::new(start));
    log::debug!("generated {} daily dates from {start}", dates.len());
    Ok(Schedule::from_dates(dates))
}

/// Returns every date on or after `start` that falls on one of the given
/// weekdays, bounded by `limit`.
///
/// Repeated weekdays are ignored. A count limit applies to the combined
/// sequence of dates, not to each weekday. So `Count(4)` for Thursdays and
/// Saturdays gives four dates total.
///
/// This returns an error if no weekdays are given.
pub fn weekly(
    start: impl Into<CalendarDate>,
    weekdays: impl IntoIterator<Item = Weekday>,
    limit: RecurrenceLimit,
) -> Result<Schedule, Error> {
    let start = start.into();
    let policy = LimitPolicy::new(limit)?;
    let weekdays: WeekdaySet = weekdays.into_iter().collect();
    if weekdays.is_empty() {
        return Err(Error::invalid(
            "at least one weekday is required for a weekly recurrence",
        ));
    }
    let dates = generate::weekly(start, weekdays, &policy);
    Ok(Schedule::from_dates(dates))
}

/// Returns `start` and then one date per following month, picked according
/// to `mode`, bounded by `limit`.
///
/// Months that don't contain a qualifying date are skipped. This returns an
/// error only for an invalid limit, or when a monthly search skips more than
/// `MAX_SKIPPED_MONTHS` months in a row (which indicates a bug).
pub fn monthly(
    start: impl Into<CalendarDate>,
    mode: MonthlyMode,
    limit: RecurrenceLimit,
) -> Result<Schedule, Error> {
    let start = start.into();
    let policy = LimitPolicy::new(limit)?;
    let dates = match mode {
        MonthlyMode::ByDate => policy.try_take(MonthlyByDate::new(start))?,
        MonthlyMode::ByWeekday => {
            policy.try_take(MonthlyByWeekday::new(start))?
        }
    };
    log::debug!(
        "generated {} monthly dates by {mode} from {start}",
        dates.len(),
    );
    Ok(Schedule::from_dates(dates))
}
