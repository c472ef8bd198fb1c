use {anyhow::Context, jiff::ToSpan};

use recur::{CalendarDate, MonthlyMode, RecurrenceLimit, Weekday, WeekdaySet};

use crate::args::{self, Configurable, Usage};

/// A date given on the command line.
///
/// This accepts the relative names `today`, `tomorrow` and `yesterday`
/// (relative to the current time in the system time zone), along with
/// anything `CalendarDate` knows how to parse.
#[derive(Clone, Copy, Debug)]
pub struct FlexibleDate(CalendarDate);

impl FlexibleDate {
    pub const ARG_START: Usage = Usage::arg(
        "<start>",
        "The first date of the recurrence (defaults to today).",
        r#"
The first date of the recurrence (defaults to today).

This may be `today`, `tomorrow` or `yesterday`, an ISO 8601 date like
`2024-02-01`, a civil datetime like `2024-02-01T17:30` or a zoned datetime
like `2024-02-01T17:30-05[America/New_York]`. Any time or time zone is
discarded after determining the date it refers to.

The start date is always the first date generated, except for weekly
recurrences when it doesn't fall on one of the requested weekdays.
"#,
    );

    /// Returns the current date in the system time zone.
    pub fn today() -> FlexibleDate {
        FlexibleDate(CalendarDate::from(&*crate::NOW))
    }

    pub fn get(&self) -> CalendarDate {
        self.0
    }
}

impl std::str::FromStr for FlexibleDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<FlexibleDate> {
        let days = match &*s.to_ascii_lowercase() {
            "today" => 0,
            "tomorrow" => 1,
            "yesterday" => -1,
            _ => {
                let date = s
                    .parse::<CalendarDate>()
                    .with_context(|| format!("invalid date `{s}`"))?;
                return Ok(FlexibleDate(date));
            }
        };
        let zdt = crate::NOW.checked_add(days.days()).with_context(|| {
            format!("`{s}` is out of the range of supported dates")
        })?;
        Ok(FlexibleDate(CalendarDate::from(zdt)))
    }
}

/// How a recurrence stops: either after some number of dates or after an end
/// date.
///
/// Exactly one of these must be given.
#[derive(Clone, Debug, Default)]
pub struct Termination {
    limit: Option<RecurrenceLimit>,
}

impl Termination {
    const USAGE_UNTIL: Usage = Usage::flag(
        "-u/--until <date>",
        "Repeat a recurrence until this date (inclusive).",
        r#"
Repeat a recurrence until this date (inclusive).

This accepts the same formats as <start>. When the end date comes before the
start date, no dates are generated.

This flag conflicts with `-c/--count`. Exactly one of them must be given.
"#,
    );

    const USAGE_COUNT: Usage = Usage::flag(
        "-c/--count <number>",
        "Repeat a recurrence to generate this number of dates.",
        r#"
Repeat a recurrence to generate this number of dates.

The number must be at least 1. Months skipped by a monthly recurrence don't
count toward this number. For weekly recurrences on more than one weekday,
this is the total number of dates across all weekdays.

This flag conflicts with `-u/--until`. Exactly one of them must be given.
"#,
    );

    /// Returns the limit given on the command line, or an error if neither
    /// `-c/--count` nor `-u/--until` was given.
    pub fn limit(&self) -> anyhow::Result<RecurrenceLimit> {
        self.limit
            .context("one of -c/--count or -u/--until must be given")
    }
}

impl Configurable for Termination {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Short('u') | Long("until") => {
                anyhow::ensure!(
                    !matches!(self.limit, Some(RecurrenceLimit::Count(_))),
                    "the -u/--until flag cannot be used with -c/--count",
                );
                let until: FlexibleDate = args::parse(p, "-u/--until")?;
                self.limit = Some(RecurrenceLimit::Until(until.get()));
            }
            Short('c') | Long("count") => {
                anyhow::ensure!(
                    !matches!(self.limit, Some(RecurrenceLimit::Until(_))),
                    "the -c/--count flag cannot be used with -u/--until",
                );
                let count: i64 = args::parse(p, "-c/--count")?;
                self.limit = Some(RecurrenceLimit::Count(count));
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Termination::USAGE_COUNT, Termination::USAGE_UNTIL]
    }
}

/// The weekdays of a weekly recurrence.
#[derive(Clone, Debug, Default)]
pub struct Weekdays {
    set: WeekdaySet,
}

impl Weekdays {
    const USAGE: Usage = Usage::flag(
        "-w/--week-day <weekday-list>",
        "The days of the week on which to recur.",
        r#"
The days of the week on which to recur.

Any day of the week may be given. They can be specified in the following way
(without regard for case):

Sunday, Sun, SU

Monday, Mon, MO

Tuesday, Tues, Tue, TU

Wednesday, Wed, WE

Thursday, Thurs, Thu, TH

Friday, Fri, FR

Saturday, Sat, SA

Multiple weekdays can be specified with repeated use of this flag, or by
separating them with a comma. For example, `thu,sat`. Giving the same weekday
more than once has no effect.

At least one weekday is required.
"#,
    );

    /// Returns every weekday given, or an error if there weren't any.
    pub fn get(&self) -> anyhow::Result<WeekdaySet> {
        anyhow::ensure!(
            !self.set.is_empty(),
            "at least one -w/--week-day is required",
        );
        Ok(self.set)
    }
}

impl Configurable for Weekdays {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Short('w') | Long("week-day") => {
                let seq: CommaSequence<Weekday> =
                    args::parse(p, "-w/--week-day")?;
                self.set.extend(seq.iter().copied());
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Weekdays::USAGE]
    }
}

/// How a monthly recurrence picks a date in each month.
#[derive(Clone, Debug, Default)]
pub struct MonthlyBy {
    mode: MonthlyMode,
}

impl MonthlyBy {
    const USAGE: Usage = Usage::flag(
        "-b/--by <mode>",
        "Recur on the same day of the month (`date`) or weekday (`weekday`).",
        r#"
Recur on the same day of the month (`date`) or weekday (`weekday`).

With `date`, the default, each date has the same day of the month as the start
date. Months without that day are skipped. So a recurrence starting on
January 31 skips February, April, June, September and November.

With `weekday`, each date is the same weekday as the start date, at the same
position within its month. So a recurrence starting on the second Tuesday of a
month continues on the second Tuesday of every month. A recurrence starting on
the fifth occurrence of a weekday skips the months that have only four.
"#,
    );

    pub fn get(&self) -> MonthlyMode {
        self.mode
    }
}

impl Configurable for MonthlyBy {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Short('b') | Long("by") => {
                self.mode = args::parse(p, "-b/--by")?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[MonthlyBy::USAGE]
    }
}

/// How a schedule is printed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Output {
    /// A heading for each month followed by its dates, one per line.
    #[default]
    Text,
    /// One JSON object per month, one per line.
    Json,
}

impl Output {
    const USAGE: Usage = Usage::flag(
        "--json",
        "Print one JSON object per month instead of text.",
        r#"
Print one JSON object per month instead of text.

Each line of output is an object with `year`, `month` and `dates` keys. For
example:

{"year":2024,"month":"February","dates":["2024-02-01","2024-02-03"]}
"#,
    );
}

impl Configurable for Output {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Long("json") => *self = Output::Json,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Output::USAGE]
    }
}

/// A comma separated sequence of values.
#[derive(Clone, Debug)]
pub struct CommaSequence<T>(Vec<T>);

impl<T> CommaSequence<T> {
    /// Returns an iterator over every item in this sequence.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T> std::str::FromStr for CommaSequence<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<CommaSequence<T>> {
        let mut seq = vec![];
        for item in s.split(",").map(|item| item.trim()) {
            if item.is_empty() {
                continue;
            }
            seq.push(item.parse::<T>().map_err(|err| {
                anyhow::Error::msg(format!(
                    "failed to parse `{item}` within sequence `{s}`: {err}",
                ))
            })?);
        }
        anyhow::ensure!(!seq.is_empty(), "empty sequences are not allowed");
        Ok(CommaSequence(seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_sequence() {
        use recur::Weekday::*;

        let seq: CommaSequence<Weekday> = "thu,SAT, thu".parse().unwrap();
        let days: Vec<Weekday> = seq.iter().copied().collect();
        assert_eq!(days, vec![Thursday, Saturday, Thursday]);

        insta::assert_snapshot!(
            "thu,,".parse::<CommaSequence<Weekday>>().unwrap().iter().count(),
            @"1",
        );
        insta::assert_snapshot!(
            ",".parse::<CommaSequence<Weekday>>().unwrap_err(),
            @"empty sequences are not allowed",
        );
        insta::assert_snapshot!(
            "thu,fry".parse::<CommaSequence<Weekday>>().unwrap_err(),
            @"failed to parse `fry` within sequence `thu,fry`: unrecognized weekday: `fry`",
        );
    }

    #[test]
    fn flexible_date_absolute() {
        let date: FlexibleDate = "2024-02-29".parse().unwrap();
        assert_eq!(date.get(), CalendarDate::new(2024, 2, 29).unwrap());
        let err = "2023-02-29".parse::<FlexibleDate>().unwrap_err();
        assert!(format!("{err:#}").starts_with("invalid date `2023-02-29`: "));
    }
}
