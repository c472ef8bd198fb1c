use crate::{
    date::{CalendarDate, YearMonth},
    error::Error,
    generate::{MAX_SKIPPED_MONTHS, WeeklyByDay},
    limit::LimitPolicy,
    weekday::Weekday,
};

/// How a monthly recurrence picks its date within each month.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MonthlyMode {
    /// The same day of the month as the start date. e.g., "the 31st of
    /// every month."
    #[default]
    ByDate,
    /// The same ordinal weekday as the start date. e.g., "the first Thursday
    /// of every month."
    ByWeekday,
}

impl std::str::FromStr for MonthlyMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<MonthlyMode, Error> {
        Ok(match &*s.to_ascii_lowercase() {
            "date" | "by-date" => MonthlyMode::ByDate,
            "weekday" | "by-weekday" => MonthlyMode::ByWeekday,
            unk => {
                return Err(Error::invalid(format!(
                    "unrecognized monthly mode `{unk}` \
                     (valid modes are `date` and `weekday`)",
                )));
            }
        })
    }
}

impl std::fmt::Display for MonthlyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            MonthlyMode::ByDate => write!(f, "date"),
            MonthlyMode::ByWeekday => write!(f, "weekday"),
        }
    }
}

/// Yields the start date and then the same day of the month in every
/// following month that has it.
///
/// A month without that day (e.g., February for a start date on the 30th) is
/// skipped. The day is never clamped to the end of the month.
#[derive(Clone, Debug)]
pub struct MonthlyByDate {
    day: i8,
    search: MonthSearch,
}

impl MonthlyByDate {
    pub fn new(start: CalendarDate) -> MonthlyByDate {
        MonthlyByDate { day: start.day(), search: MonthSearch::new(start) }
    }
}

impl Iterator for MonthlyByDate {
    type Item = Result<CalendarDate, Error>;

    fn next(&mut self) -> Option<Result<CalendarDate, Error>> {
        let day = self.day;
        self.search.next_with(|ym| ym.with_day(day))
    }
}

impl std::iter::FusedIterator for MonthlyByDate {}

/// Yields the start date and then the same ordinal weekday in every
/// following month that has it.
///
/// The ordinal is the position of the start date among all occurrences of its
/// weekday in its month. So a start date on the second Tuesday of a month
/// yields the second Tuesday of every month. Only a fifth occurrence can be
/// missing from a month, and such months are skipped.
#[derive(Clone, Debug)]
pub struct MonthlyByWeekday {
    weekday: Weekday,
    /// The 1-based position of the weekday to select within each month.
    nth: usize,
    search: MonthSearch,
}

impl MonthlyByWeekday {
    pub fn new(start: CalendarDate) -> MonthlyByWeekday {
        let weekday = start.weekday();
        let nth = occurrences(start.year_month(), weekday)
            .into_iter()
            .take_while(|&date| date < start)
            .count()
            + 1;
        MonthlyByWeekday { weekday, nth, search: MonthSearch::new(start) }
    }

    /// Returns the 1-based ordinal of the weekday this generator selects.
    pub fn ordinal(&self) -> usize {
        self.nth
    }
}

impl Iterator for MonthlyByWeekday {
    type Item = Result<CalendarDate, Error>;

    fn next(&mut self) -> Option<Result<CalendarDate, Error>> {
        let (weekday, nth) = (self.weekday, self.nth);
        self.search
            .next_with(|ym| occurrences(ym, weekday).get(nth - 1).copied())
    }
}

impl std::iter::FusedIterator for MonthlyByWeekday {}

/// Returns every date in the given month that falls on `weekday`.
fn occurrences(ym: YearMonth, weekday: Weekday) -> Vec<CalendarDate> {
    LimitPolicy::until(ym.last()).take(WeeklyByDay::new(ym.first(), weekday))
}

/// A bounded month by month search shared by the monthly generators.
///
/// Month `k` is always computed as the start month plus `k` months, and never
/// from the previous occurrence. Otherwise a skipped or shortened month would
/// change every month after it.
#[derive(Clone, Debug)]
struct MonthSearch {
    origin: YearMonth,
    /// The offset, from `origin`, of the next month to check.
    offset: i32,
    /// The most recently yielded date, or the start date if nothing has been
    /// yielded yet.
    last: CalendarDate,
    done: bool,
}

impl MonthSearch {
    fn new(start: CalendarDate) -> MonthSearch {
        MonthSearch {
            origin: start.year_month(),
            offset: 0,
            last: start,
            done: false,
        }
    }

    /// Check months, in order, until `pick` returns a date for one of them.
    ///
    /// This ends iteration when the supported range of dates runs out, and
    /// reports an error (once) after `MAX_SKIPPED_MONTHS` consecutive months
    /// without a date.
    fn next_with(
        &mut self,
        mut pick: impl FnMut(YearMonth) -> Option<CalendarDate>,
    ) -> Option<Result<CalendarDate, Error>> {
        if self.done {
            return None;
        }
        let mut skipped = 0;
        loop {
            let Some(ym) = self.origin.checked_add(self.offset) else {
                self.done = true;
                return None;
            };
            self.offset += 1;
            if let Some(date) = pick(ym) {
                self.last = date;
                return Some(Ok(date));
            }
            skipped += 1;
            log::debug!("skipping {ym}, which has no qualifying date");
            if skipped > MAX_SKIPPED_MONTHS {
                self.done = true;
                return Some(Err(Error::MonthSearchExhausted {
                    after: self.last,
                    skipped,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::limit::RecurrenceLimit;

    use super::*;

    fn date(year: i16, month: i8, day: i8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn count(n: i64) -> LimitPolicy {
        LimitPolicy::new(RecurrenceLimit::Count(n)).unwrap()
    }

    #[test]
    fn by_date_first_of_month() {
        let dates =
            count(5).try_take(MonthlyByDate::new(date(2024, 2, 1))).unwrap();
        insta::assert_debug_snapshot!(dates, @r"
        [
            2024-02-01,
            2024-03-01,
            2024-04-01,
            2024-05-01,
            2024-06-01,
        ]
        ");
    }

    #[test]
    fn by_date_skips_short_months() {
        let dates =
            count(5).try_take(MonthlyByDate::new(date(2024, 1, 31))).unwrap();
        insta::assert_debug_snapshot!(dates, @r"
        [
            2024-01-31,
            2024-03-31,
            2024-05-31,
            2024-07-31,
            2024-08-31,
        ]
        ");
        assert!(dates.iter().all(|d| d.day() == 31));
    }

    #[test]
    fn by_date_skip_does_not_shift_later_months() {
        let dates =
            count(3).try_take(MonthlyByDate::new(date(2023, 1, 29))).unwrap();
        assert_eq!(
            dates,
            vec![date(2023, 1, 29), date(2023, 3, 29), date(2023, 4, 29)],
        );

        // But in a leap year, February has a 29th.
        let dates =
            count(2).try_take(MonthlyByDate::new(date(2024, 1, 29))).unwrap();
        assert_eq!(dates, vec![date(2024, 1, 29), date(2024, 2, 29)]);
    }

    #[test]
    fn by_date_leap_day() {
        let dates =
            count(3).try_take(MonthlyByDate::new(date(2024, 2, 29))).unwrap();
        assert_eq!(
            dates,
            vec![date(2024, 2, 29), date(2024, 3, 29), date(2024, 4, 29)],
        );
    }

    #[test]
    fn by_date_until() {
        let policy = LimitPolicy::until(date(2024, 5, 31));
        let dates =
            policy.try_take(MonthlyByDate::new(date(2024, 1, 31))).unwrap();
        assert_eq!(
            dates,
            vec![date(2024, 1, 31), date(2024, 3, 31), date(2024, 5, 31)],
        );
    }

    #[test]
    fn by_weekday_first_thursday() {
        let it = MonthlyByWeekday::new(date(2024, 2, 1));
        assert_eq!(it.ordinal(), 1);
        let dates = count(5).try_take(it).unwrap();
        insta::assert_debug_snapshot!(dates, @r"
        [
            2024-02-01,
            2024-03-07,
            2024-04-04,
            2024-05-02,
            2024-06-06,
        ]
        ");
        for d in dates.iter() {
            assert_eq!(d.weekday(), Weekday::Thursday);
            assert!(d.day() <= 7);
        }
    }

    #[test]
    fn by_weekday_fifth_occurrence_skips_months() {
        let it = MonthlyByWeekday::new(date(2024, 2, 29));
        assert_eq!(it.ordinal(), 5);
        let dates = count(4).try_take(it).unwrap();
        insta::assert_debug_snapshot!(dates, @r"
        [
            2024-02-29,
            2024-05-30,
            2024-08-29,
            2024-10-31,
        ]
        ");
    }

    #[test]
    fn by_weekday_ordinal() {
        // 2024-03-12 is the second Tuesday of March 2024.
        let it = MonthlyByWeekday::new(date(2024, 3, 12));
        assert_eq!(it.ordinal(), 2);
        let dates = count(3).try_take(it).unwrap();
        assert_eq!(
            dates,
            vec![date(2024, 3, 12), date(2024, 4, 9), date(2024, 5, 14)],
        );
    }

    #[test]
    fn stops_at_end_of_range() {
        let dates =
            count(5).try_take(MonthlyByDate::new(date(9999, 11, 15))).unwrap();
        assert_eq!(dates, vec![date(9999, 11, 15), date(9999, 12, 15)]);
    }

    #[test]
    fn search_ceiling_is_an_error() {
        let start = date(2024, 1, 1);
        let mut search = MonthSearch::new(start);
        let err = search.next_with(|_| None).unwrap().unwrap_err();
        assert!(err.is_invariant_violation());
        assert_eq!(
            err,
            Error::MonthSearchExhausted {
                after: start,
                skipped: MAX_SKIPPED_MONTHS + 1,
            },
        );
        insta::assert_snapshot!(
            err,
            @"no qualifying month found in the 13 months following 2024-01-01 (this is a bug)",
        );
        // Once the ceiling is hit, the search is over.
        assert_eq!(search.next_with(|ym| Some(ym.first())), None);
    }

    #[test]
    fn mode_names() {
        assert_eq!("date".parse::<MonthlyMode>(), Ok(MonthlyMode::ByDate));
        for name in ["Weekday", "by-weekday"] {
            let mode = name.parse::<MonthlyMode>();
            assert_eq!(mode, Ok(MonthlyMode::ByWeekday));
        }
        insta::assert_snapshot!(
            "yearly".parse::<MonthlyMode>().unwrap_err(),
            @"unrecognized monthly mode `yearly` (valid modes are `date` and `weekday`)",
        );
        insta::assert_snapshot!(MonthlyMode::ByWeekday, @"weekday");
    }
}
