/*!
Lazy generators of recurrence dates.

Every generator here is an `Iterator` that yields dates in strictly ascending
order, starting at (or shortly after) a start date and continuing until the
supported range of dates is exhausted. None of them know anything about
limits. Bounding a generator is the job of `LimitPolicy::take` (or
`LimitPolicy::try_take` for the monthly generators, which can fail).
*/

pub use self::{
    daily::Daily,
    monthly::{MonthlyByDate, MonthlyByWeekday, MonthlyMode},
    weekly::WeeklyByDay,
};

pub(crate) use self::weekly::weekly;

mod daily;
mod monthly;
mod weekly;

/// The maximum number of consecutive months a monthly generator will skip
/// while searching for a month containing its next occurrence.
///
/// No valid pattern ever needs more than a handful. A by-date pattern on the
/// 31st skips at most one month in a row, and a "fifth weekday" pattern at
/// most a few. Going past this limit is reported as an error.
pub const MAX_SKIPPED_MONTHS: u32 = 12;
