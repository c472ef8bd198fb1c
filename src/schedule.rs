use crate::date::{CalendarDate, YearMonth};

/// Dates grouped by the month they fall in.
///
/// Groups are in ascending order of their month, and the dates in each group
/// are in strictly ascending order. Every date in a group falls in that
/// group's month, no group is empty and no date appears more than once in the
/// schedule.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Schedule {
    groups: Vec<MonthSchedule>,
}

/// The dates of a `Schedule` that fall in one particular month.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct MonthSchedule {
    #[serde(flatten)]
    key: YearMonth,
    dates: Vec<CalendarDate>,
}

impl Schedule {
    /// Build a schedule from dates in any order, possibly with duplicates.
    pub fn from_dates(mut dates: Vec<CalendarDate>) -> Schedule {
        dates.sort_unstable();
        dates.dedup();
        let groups = dates
            .chunk_by(|d1, d2| d1.year_month() == d2.year_month())
            .map(|chunk| MonthSchedule {
                key: chunk[0].year_month(),
                dates: chunk.to_vec(),
            })
            .collect();
        Schedule { groups }
    }

    /// Returns an iterator over each month of this schedule, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, MonthSchedule> {
        self.groups.iter()
    }

    /// Returns the dates for the given month, if there are any.
    pub fn get(&self, key: YearMonth) -> Option<&MonthSchedule> {
        let i = self.groups.binary_search_by_key(&key, |g| g.key).ok()?;
        Some(&self.groups[i])
    }

    /// Returns the number of months in this schedule.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns an iterator over every date in this schedule, in order.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.groups.iter().flat_map(|g| g.dates.iter().copied())
    }

    /// Returns the total number of dates in this schedule.
    pub fn date_count(&self) -> usize {
        self.groups.iter().map(|g| g.dates.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type IntoIter = std::slice::Iter<'a, MonthSchedule>;
    type Item = &'a MonthSchedule;

    fn into_iter(self) -> std::slice::Iter<'a, MonthSchedule> {
        self.groups.iter()
    }
}

impl MonthSchedule {
    pub fn year_month(&self) -> YearMonth {
        self.key
    }

    pub fn dates(&self) -> &[CalendarDate] {
        &self.dates
    }

    /// Returns just the day of the month of each date in this group.
    pub fn days_of_month(&self) -> Vec<i8> {
        self.dates.iter().map(|d| d.day()).collect()
    }
}
