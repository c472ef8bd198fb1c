use jiff::{Zoned, civil};

use crate::{error::Error, weekday::Weekday};

/// The smallest year supported. This matches Jiff's minimum.
pub const MIN_YEAR: i16 = -9999;
/// The largest year supported. This matches Jiff's maximum.
pub const MAX_YEAR: i16 = 9999;

/// The number of days from 0000-03-01 to 1970-01-01.
const EPOCH_SHIFT: i64 = 719_468;
/// The number of days in a 400 year Gregorian cycle.
const DAYS_PER_ERA: i64 = 146_097;

/// A civil date in the proleptic Gregorian calendar.
///
/// A `CalendarDate` has no time of day and no time zone. Anything that does
/// carry those (a `jiff::Zoned`, a `jiff::civil::DateTime`) is truncated to
/// the date it observes in its own time zone when converted into a
/// `CalendarDate`. Conversions to and from Jiff happen only through the
/// `From` impls in this module. Everything else in this crate, including
/// computing the weekday, is done with the calendar algorithms below.
///
/// Dates are ordered chronologically.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct CalendarDate {
    // N.B. The field order matters for the derived `Ord` impl.
    year: i16,
    month: Month,
    day: i8,
}

impl CalendarDate {
    /// Create a new date from a year, a month number in the range `1..=12`
    /// and a day of the month.
    ///
    /// This returns an error if the year is outside of `MIN_YEAR..=MAX_YEAR`
    /// or if the day does not exist in the given month.
    pub fn new(year: i16, month: i8, day: i8) -> Result<CalendarDate, Error> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::invalid(format!(
                "year `{year}` is out of range \
                 (years must be in range {MIN_YEAR}..={MAX_YEAR})",
            )));
        }
        let ym = YearMonth { year, month: Month::from_number(month)? };
        ym.with_day(day).ok_or_else(|| {
            Error::invalid(format!(
                "day `{day}` does not exist in {ym} \
                 (days must be in range 1..={last})",
                last = ym.days_in_month(),
            ))
        })
    }

    pub fn year(self) -> i16 {
        self.year
    }

    pub fn month(self) -> Month {
        self.month
    }

    pub fn day(self) -> i8 {
        self.day
    }

    /// Returns the year and month that this date falls in.
    pub fn year_month(self) -> YearMonth {
        YearMonth { year: self.year, month: self.month }
    }

    /// Returns the day of the week for this date.
    pub fn weekday(self) -> Weekday {
        // 1970-01-01 was a Thursday.
        let offset = (self.to_epoch_days() + 4).rem_euclid(7);
        Weekday::from_sunday_zero_offset_unchecked(offset)
    }

    /// Add the given number of days to this date.
    ///
    /// This returns `None` only when the result falls outside of the
    /// supported range of years.
    pub fn add_days(self, days: i64) -> Option<CalendarDate> {
        CalendarDate::from_epoch_days(self.to_epoch_days().checked_add(days)?)
    }

    /// Add the given number of months to this date, keeping the day of the
    /// month fixed.
    ///
    /// Unlike most date libraries, this never clamps the day. If the target
    /// month has no day equal to this date's day (for example, adding one
    /// month to January 31), then there is no corresponding date and `None`
    /// is returned. `None` is also returned when the result falls outside of
    /// the supported range of years.
    pub fn add_months(self, months: i32) -> Option<CalendarDate> {
        self.year_month().checked_add(months)?.with_day(self.day)
    }

    /// Returns the number of days since 1970-01-01.
    ///
    /// This is Howard Hinnant's `days_from_civil`, operating on years that
    /// begin in March so that the leap day is the last day of the year.
    fn to_epoch_days(self) -> i64 {
        let month = i64::from(self.month.to_number());
        let year = i64::from(self.year) - i64::from(month <= 2);
        let era = year.div_euclid(400);
        let year_of_era = year - era * 400;
        let day_of_year =
            (153 * ((month + 9) % 12) + 2) / 5 + i64::from(self.day) - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4
            - year_of_era / 100
            + day_of_year;
        era * DAYS_PER_ERA + day_of_era - EPOCH_SHIFT
    }

    /// The inverse of `to_epoch_days`.
    fn from_epoch_days(days: i64) -> Option<CalendarDate> {
        let days = days.checked_add(EPOCH_SHIFT)?;
        let era = days.div_euclid(DAYS_PER_ERA);
        let day_of_era = days - era * DAYS_PER_ERA;
        let year_of_era = (day_of_era - day_of_era / 1460
            + day_of_era / 36524
            - day_of_era / 146_096)
            / 365;
        let leap_days = year_of_era / 4 - year_of_era / 100;
        let day_of_year = day_of_era - (365 * year_of_era + leap_days);
        let shifted_month = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
        let month = if shifted_month < 10 {
            shifted_month + 3
        } else {
            shifted_month - 9
        };
        let year = year_of_era + era * 400 + i64::from(month <= 2);

        let year = i16::try_from(year).ok()?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        // Both are always in range by construction above.
        let month = Month::from_number(i8::try_from(month).ok()?).ok()?;
        let day = i8::try_from(day).ok()?;
        Some(CalendarDate { year, month, day })
    }
}

impl std::fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (month, day) = (self.month.to_number(), self.day);
        if self.year < 0 {
            let year = -i32::from(self.year);
            write!(f, "-{year:06}-{month:02}-{day:02}")
        } else {
            write!(f, "{year:04}-{month:02}-{day:02}", year = self.year)
        }
    }
}

/// Parses a date in any of the formats Jiff recognizes for a civil date,
/// civil datetime or zoned datetime. The time and time zone, if present, are
/// discarded after determining the date they refer to.
impl std::str::FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<CalendarDate, Error> {
        // An RFC 9557 time zone annotation means we need to go through
        // `Zoned`. A civil datetime parse would otherwise silently drop it.
        if s.contains('[') {
            let zdt: Zoned = s.parse().map_err(|err| {
                Error::invalid(format!(
                    "failed to parse `{s}` as a zoned datetime: {err}"
                ))
            })?;
            return Ok(CalendarDate::from(&zdt));
        }
        let dt: civil::DateTime = s.parse().map_err(|err| {
            Error::invalid(format!("failed to parse `{s}` as a date: {err}"))
        })?;
        Ok(CalendarDate::from(dt))
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<civil::Date> for CalendarDate {
    fn from(date: civil::Date) -> CalendarDate {
        // Jiff's supported range of years is the same as ours, and every
        // Jiff date is valid. So there's nothing to check here.
        let month = Month::from_zero_offset_unchecked(date.month() - 1);
        CalendarDate { year: date.year(), month, day: date.day() }
    }
}

impl From<civil::DateTime> for CalendarDate {
    fn from(dt: civil::DateTime) -> CalendarDate {
        CalendarDate::from(dt.date())
    }
}

impl<'a> From<&'a Zoned> for CalendarDate {
    fn from(zdt: &'a Zoned) -> CalendarDate {
        CalendarDate::from(zdt.date())
    }
}

impl From<Zoned> for CalendarDate {
    fn from(zdt: Zoned) -> CalendarDate {
        CalendarDate::from(&zdt)
    }
}

impl From<CalendarDate> for civil::Date {
    fn from(date: CalendarDate) -> civil::Date {
        // This can't panic since a `CalendarDate` is always a valid date
        // within Jiff's range.
        civil::date(date.year, date.month.to_number(), date.day)
    }
}

/// A month of the year.
///
/// Months are numbered starting from zero. Use `Month::to_number` for the
/// conventional `1..=12` numbering.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, serde::Serialize,
)]
pub enum Month {
    January = 0,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Returns the month for a zero based offset, where `0` is January.
    pub fn from_zero_offset(offset: i8) -> Result<Month, Error> {
        usize::try_from(offset)
            .ok()
            .and_then(|i| Month::ALL.get(i).copied())
            .ok_or_else(|| {
                Error::invalid(format!(
                    "invalid month offset `{offset}` \
                     (offsets must be in range 0..=11)",
                ))
            })
    }

    /// Returns the month for its conventional number, where `1` is January.
    pub fn from_number(number: i8) -> Result<Month, Error> {
        if !(1..=12).contains(&number) {
            return Err(Error::invalid(format!(
                "invalid month `{number}` (months must be in range 1..=12)",
            )));
        }
        Month::from_zero_offset(number - 1)
    }

    /// Like `from_zero_offset`, but for callers that have already reduced
    /// the offset into `0..=11`.
    fn from_zero_offset_unchecked(offset: i8) -> Month {
        Month::ALL[usize::from(offset as u8)]
    }

    pub fn to_zero_offset(self) -> i8 {
        self as i8
    }

    pub fn to_number(self) -> i8 {
        self.to_zero_offset() + 1
    }

    /// Returns the English name of this month.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Returns the number of days in this month for the given year.
    pub fn days_in(self, year: i16) -> i8 {
        match self {
            Month::February if is_leap_year(year) => 29,
            Month::February => 28,
            Month::April
            | Month::June
            | Month::September
            | Month::November => 30,
            _ => 31,
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A particular month in a particular year.
///
/// This is the key that a `Schedule` groups dates by. It also acts as a
/// cursor for walking month by month, which avoids the trap of repeatedly
/// adding a month to a *date* (where a short month would otherwise change the
/// day for every month after it).
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, serde::Serialize,
)]
pub struct YearMonth {
    // N.B. The field order matters for the derived `Ord` impl.
    year: i16,
    month: Month,
}

impl YearMonth {
    pub fn year(self) -> i16 {
        self.year
    }

    pub fn month(self) -> Month {
        self.month
    }

    /// Returns the year-month that is the given number of months away.
    ///
    /// This returns `None` when the result falls outside of the supported
    /// range of years.
    pub fn checked_add(self, months: i32) -> Option<YearMonth> {
        let index = i32::from(self.year) * 12
            + i32::from(self.month.to_zero_offset());
        let index = index.checked_add(months)?;
        let year = i16::try_from(index.div_euclid(12)).ok()?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        // `rem_euclid(12)` is always in `0..=11`.
        let offset = index.rem_euclid(12) as i8;
        let month = Month::from_zero_offset_unchecked(offset);
        Some(YearMonth { year, month })
    }

    pub fn days_in_month(self) -> i8 {
        self.month.days_in(self.year)
    }

    /// Returns the first day of this month.
    pub fn first(self) -> CalendarDate {
        CalendarDate { year: self.year, month: self.month, day: 1 }
    }

    /// Returns the last day of this month.
    pub fn last(self) -> CalendarDate {
        let day = self.days_in_month();
        CalendarDate { year: self.year, month: self.month, day }
    }

    /// Returns the date in this month with the given day, if it exists.
    pub fn with_day(self, day: i8) -> Option<CalendarDate> {
        (1..=self.days_in_month()).contains(&day).then_some(CalendarDate {
            year: self.year,
            month: self.month,
            day,
        })
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}

fn is_leap_year(year: i16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i16, month: i8, day: i8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn weekday_known_dates() {
        assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
        assert_eq!(date(2000, 1, 1).weekday(), Weekday::Saturday);
        assert_eq!(date(2024, 2, 1).weekday(), Weekday::Thursday);
        assert_eq!(date(2024, 2, 29).weekday(), Weekday::Thursday);
        assert_eq!(date(2024, 3, 1).weekday(), Weekday::Friday);
        assert_eq!(date(2024, 1, 31).weekday(), Weekday::Wednesday);
        assert_eq!(date(1600, 3, 1).weekday(), Weekday::Wednesday);
    }

    // The weekday is computed without Jiff, so make sure the two agree over
    // a decent stretch of time on both sides of the epoch.
    #[test]
    fn weekday_agrees_with_jiff() {
        let mut cur = date(1899, 12, 1);
        let end = date(2101, 1, 31);
        while cur <= end {
            let jdate = civil::Date::from(cur);
            assert_eq!(cur.weekday(), Weekday::from(jdate.weekday()), "{cur}");
            assert_eq!(CalendarDate::from(jdate), cur);
            cur = cur.add_days(1).unwrap();
        }
    }

    #[test]
    fn add_days() {
        assert_eq!(date(2024, 2, 28).add_days(1), Some(date(2024, 2, 29)));
        assert_eq!(date(2023, 2, 28).add_days(1), Some(date(2023, 3, 1)));
        assert_eq!(date(2024, 12, 31).add_days(1), Some(date(2025, 1, 1)));
        assert_eq!(date(2024, 3, 1).add_days(-1), Some(date(2024, 2, 29)));
        assert_eq!(date(2024, 2, 1).add_days(7), Some(date(2024, 2, 8)));
        assert_eq!(date(2024, 2, 1).add_days(366), Some(date(2025, 2, 1)));

        assert_eq!(date(9999, 12, 31).add_days(1), None);
        assert_eq!(date(-9999, 1, 1).add_days(-1), None);
        assert_eq!(date(2024, 1, 1).add_days(i64::MAX), None);
    }

    #[test]
    fn add_months_never_clamps() {
        assert_eq!(date(2024, 1, 31).add_months(1), None);
        assert_eq!(date(2024, 1, 31).add_months(2), Some(date(2024, 3, 31)));
        assert_eq!(date(2024, 1, 30).add_months(1), None);
        assert_eq!(date(2024, 1, 29).add_months(1), Some(date(2024, 2, 29)));
        assert_eq!(date(2023, 1, 29).add_months(1), None);
        assert_eq!(date(2024, 11, 15).add_months(3), Some(date(2025, 2, 15)));
        assert_eq!(date(2024, 2, 15).add_months(-2), Some(date(2023, 12, 15)));
        assert_eq!(date(9999, 12, 1).add_months(1), None);
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(date(2024, 2, 1) < date(2024, 2, 2));
        assert!(date(2024, 1, 31) < date(2024, 2, 1));
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
        assert_eq!(date(2024, 2, 1), date(2024, 2, 1));
    }

    #[test]
    fn new_rejects_invalid_dates() {
        insta::assert_snapshot!(
            CalendarDate::new(2023, 2, 29).unwrap_err(),
            @"day `29` does not exist in February 2023 (days must be in range 1..=28)",
        );
        insta::assert_snapshot!(
            CalendarDate::new(2024, 13, 1).unwrap_err(),
            @"invalid month `13` (months must be in range 1..=12)",
        );
        insta::assert_snapshot!(
            CalendarDate::new(10000, 1, 1).unwrap_err(),
            @"year `10000` is out of range (years must be in range -9999..=9999)",
        );
        let err = CalendarDate::new(2024, 4, 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn normalizes_times_and_zones() {
        // Late in the evening in New York is already the next day in UTC,
        // but the civil date is what the datetime observes locally.
        let zdt: Zoned =
            "2024-02-01T23:30:00-05:00[America/New_York]".parse().unwrap();
        assert_eq!(CalendarDate::from(&zdt), date(2024, 2, 1));

        let dt = civil::date(2024, 2, 1).at(17, 45, 0, 0);
        assert_eq!(CalendarDate::from(dt), date(2024, 2, 1));
    }

    #[test]
    fn parse() {
        assert_eq!("2024-02-01".parse::<CalendarDate>(), Ok(date(2024, 2, 1)));
        assert_eq!(
            "2024-02-01T08:15:00".parse::<CalendarDate>(),
            Ok(date(2024, 2, 1)),
        );
        assert_eq!(
            "2024-02-01T23:30:00-05:00[America/New_York]"
                .parse::<CalendarDate>(),
            Ok(date(2024, 2, 1)),
        );
        assert!("2024-02-30".parse::<CalendarDate>().is_err());
        let err = "nope".parse::<CalendarDate>().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(date(2024, 2, 1), @"2024-02-01");
        insta::assert_snapshot!(date(33, 12, 9), @"0033-12-09");
        insta::assert_snapshot!(date(-44, 3, 15), @"-000044-03-15");
        let ym = date(2024, 2, 1).year_month();
        insta::assert_snapshot!(ym, @"February 2024");
    }

    #[test]
    fn year_month_cursor() {
        let feb = date(2024, 2, 10).year_month();
        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(feb.first(), date(2024, 2, 1));
        assert_eq!(feb.last(), date(2024, 2, 29));
        assert_eq!(feb.with_day(30), None);

        let next = feb.checked_add(11).unwrap();
        assert_eq!((next.year(), next.month()), (2025, Month::January));
        assert_eq!(next.days_in_month(), 31);
        let prev = feb.checked_add(-2).unwrap();
        assert_eq!((prev.year(), prev.month()), (2023, Month::December));

        assert_eq!(date(1900, 2, 1).year_month().days_in_month(), 28);
        assert_eq!(date(2000, 2, 1).year_month().days_in_month(), 29);
    }

    #[test]
    fn month_numbering() {
        assert_eq!(Month::January.to_zero_offset(), 0);
        assert_eq!(Month::December.to_number(), 12);
        assert_eq!(Month::from_zero_offset(1), Ok(Month::February));
        assert_eq!(Month::from_number(1), Ok(Month::January));
        assert!(Month::from_zero_offset(12).is_err());
        assert!(Month::from_zero_offset(-1).is_err());
    }
}
