use crate::date::CalendarDate;

/// Yields every day starting at a given date.
#[derive(Clone, Debug)]
pub struct Daily {
    next: Option<CalendarDate>,
}

impl Daily {
    pub fn new(start: CalendarDate) -> Daily {
        Daily { next: Some(start) }
    }
}

impl Iterator for Daily {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<CalendarDate> {
        let cur = self.next?;
        self.next = cur.add_days(1);
        Some(cur)
    }
}

impl std::iter::FusedIterator for Daily {}

#[cfg(test)]
mod tests {
    use crate::limit::{LimitPolicy, RecurrenceLimit};

    use super::*;

    fn date(year: i16, month: i8, day: i8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn consecutive() {
        let dates: Vec<_> = Daily::new(date(2024, 2, 27)).take(4).collect();
        insta::assert_debug_snapshot!(dates, @r"
        [
            2024-02-27,
            2024-02-28,
            2024-02-29,
            2024-03-01,
        ]
        ");
    }

    #[test]
    fn inclusive_until() {
        let policy = LimitPolicy::until(date(2024, 3, 1));
        let dates = policy.take(Daily::new(date(2024, 2, 1)));
        // 29 days of February plus March 1.
        assert_eq!(dates.len(), 30);
        assert_eq!(dates.first(), Some(&date(2024, 2, 1)));
        assert_eq!(dates.last(), Some(&date(2024, 3, 1)));
    }

    #[test]
    fn count() {
        let policy = LimitPolicy::new(RecurrenceLimit::Count(10)).unwrap();
        let dates = policy.take(Daily::new(date(2024, 12, 25)));
        assert_eq!(dates.len(), 10);
        for pair in dates.windows(2) {
            assert_eq!(pair[0].add_days(1), Some(pair[1]));
        }
    }

    #[test]
    fn stops_at_end_of_range() {
        let mut it = Daily::new(date(9999, 12, 30));
        assert_eq!(it.next(), Some(date(9999, 12, 30)));
        assert_eq!(it.next(), Some(date(9999, 12, 31)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
