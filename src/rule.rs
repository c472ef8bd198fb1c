use crate::{
    date::CalendarDate,
    error::Error,
    generate::MonthlyMode,
    limit::RecurrenceLimit,
    schedule::Schedule,
    weekday::WeekdaySet,
};

/// How often something recurs, independent of when it starts and stops.
///
/// This is useful for front ends that build a rule once (say, from command
/// line arguments) and evaluate it for some start date and limit later.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {
    /// Every day.
    Daily,
    /// Every week, on each of the given weekdays.
    Weekly(WeekdaySet),
    /// Every month, picking the date in each month by the given mode.
    Monthly(MonthlyMode),
}

impl Rule {
    /// Compute the schedule of this rule for the given start date and limit.
    ///
    /// This is equivalent to calling `recur::daily`, `recur::weekly` or
    /// `recur::monthly`.
    pub fn schedule(
        &self,
        start: CalendarDate,
        limit: RecurrenceLimit,
    ) -> Result<Schedule, Error> {
        match *self {
            Rule::Daily => crate::daily(start, limit),
            Rule::Weekly(weekdays) => {
                crate::weekly(start, weekdays.iter(), limit)
            }
            Rule::Monthly(mode) => crate::monthly(start, mode, limit),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Rule::Daily => write!(f, "daily"),
            Rule::Weekly(weekdays) => write!(f, "weekly on {weekdays}"),
            Rule::Monthly(mode) => write!(f, "monthly by {mode}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::weekday::Weekday;

    use super::*;

    #[test]
    fn display() {
        let days: WeekdaySet =
            [Weekday::Saturday, Weekday::Thursday].into_iter().collect();
        insta::assert_snapshot!(Rule::Daily, @"daily");
        insta::assert_snapshot!(Rule::Weekly(days), @"weekly on Thu,Sat");
        insta::assert_snapshot!(
            Rule::Monthly(MonthlyMode::ByWeekday),
            @"monthly by weekday",
        );
    }

    #[test]
    fn dispatches() {
        let start = CalendarDate::new(2024, 1, 31).unwrap();
        let limit = RecurrenceLimit::Count(3);
        let rule = Rule::Monthly(MonthlyMode::ByDate);
        assert_eq!(
            rule.schedule(start, limit),
            crate::monthly(start, MonthlyMode::ByDate, limit),
        );
        assert_eq!(
            Rule::Daily.schedule(start, limit).unwrap().date_count(),
            3,
        );
        let err = Rule::Weekly(WeekdaySet::empty())
            .schedule(start, limit)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
