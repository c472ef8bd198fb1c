use std::convert::Infallible;

use crate::{date::CalendarDate, error::Error};

/// How a recurrence is bounded.
///
/// The count is stored as given so that a non-positive count can be rejected
/// when a schedule is computed, instead of being silently treated as zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecurrenceLimit {
    /// Stop after this many occurrences.
    Count(i64),
    /// Stop after this date. The date itself is included.
    Until(CalendarDate),
}

/// A validated `RecurrenceLimit`, used to decide when a generator stops.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LimitPolicy {
    bound: Bound,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Bound {
    Count(usize),
    Until(CalendarDate),
}

impl LimitPolicy {
    /// Validate the given limit.
    ///
    /// This returns an error when the limit is a count less than `1`.
    pub fn new(limit: RecurrenceLimit) -> Result<LimitPolicy, Error> {
        match limit {
            RecurrenceLimit::Count(count) => {
                if count < 1 {
                    return Err(Error::invalid(format!(
                        "count value `{count}` is invalid \
                         (count must be greater than or equal to 1)",
                    )));
                }
                let count = usize::try_from(count).map_err(|_| {
                    Error::invalid(format!(
                        "count value `{count}` is too big for this platform",
                    ))
                })?;
                Ok(LimitPolicy { bound: Bound::Count(count) })
            }
            RecurrenceLimit::Until(end) => Ok(LimitPolicy::until(end)),
        }
    }

    /// A policy that accepts every date up to and including `end`.
    ///
    /// Unlike `LimitPolicy::new`, this can't fail.
    pub fn until(end: CalendarDate) -> LimitPolicy {
        LimitPolicy { bound: Bound::Until(end) }
    }

    /// Returns true when `candidate` should be emitted, given that
    /// `produced` dates have already been emitted.
    pub fn accepts(&self, candidate: CalendarDate, produced: usize) -> bool {
        match self.bound {
            Bound::Count(count) => produced < count,
            Bound::Until(end) => candidate <= end,
        }
    }

    /// Collect dates from a chronologically ascending generator until this
    /// policy rejects one.
    pub fn take<I>(&self, dates: I) -> Vec<CalendarDate>
    where
        I: IntoIterator<Item = CalendarDate>,
    {
        let dates = dates.into_iter().map(Ok::<_, Infallible>);
        let Ok(taken) = self.try_take(dates);
        taken
    }

    /// Like `take`, but for generators that can fail.
    ///
    /// Since generators are ascending, the first rejected date means every
    /// date after it would be rejected too. So we stop there. For a count,
    /// we stop *before* asking the generator for one more date than we need,
    /// so that a generator never does a month search whose result would just
    /// be thrown away.
    pub fn try_take<I, E>(&self, dates: I) -> Result<Vec<CalendarDate>, E>
    where
        I: IntoIterator<Item = Result<CalendarDate, E>>,
    {
        let mut it = dates.into_iter();
        let mut taken = vec![];
        while !self.is_exhausted(taken.len()) {
            let Some(candidate) = it.next().transpose()? else {
                log::trace!(
                    "generator ran out of dates after {} occurrences",
                    taken.len(),
                );
                break;
            };
            if !self.accepts(candidate, taken.len()) {
                log::trace!("{candidate} is past the end of {self:?}");
                break;
            }
            taken.push(candidate);
        }
        Ok(taken)
    }

    /// Re-applies this policy to an already sorted and deduplicated
    /// sequence of dates, possibly merged from several generators.
    pub fn truncate(&self, dates: &mut Vec<CalendarDate>) {
        match self.bound {
            Bound::Count(count) => dates.truncate(count),
            Bound::Until(end) => dates.retain(|&date| date <= end),
        }
    }

    fn is_exhausted(&self, produced: usize) -> bool {
        match self.bound {
            Bound::Count(count) => produced >= count,
            Bound::Until(_) => false,
        }
    }
}
