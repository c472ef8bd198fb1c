use crate::date::CalendarDate;

/// An error that can occur when computing a schedule.
///
/// There are only two kinds of errors. The first is bad input, which is
/// reported before any dates are generated. The second is a month search
/// that gave up after skipping too many months in a row. The latter should
/// never happen for any input: every month has at least four of each weekday
/// and at least 28 days. It exists so that a logic error surfaces as an error
/// instead of a loop that never ends.
///
/// An end date that falls before the start date is *not* an error. It just
/// produces an empty schedule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An argument was outside of its legal domain. For example, a count of
    /// zero or an empty set of weekdays.
    InvalidArgument(String),
    /// A monthly recurrence failed to find a qualifying month within
    /// `skipped` consecutive months following `after`.
    MonthSearchExhausted { after: CalendarDate, skipped: u32 },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Error {
        Error::InvalidArgument(message.into())
    }

    /// Returns true when this error was caused by bad input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(*self, Error::InvalidArgument(_))
    }

    /// Returns true when this error indicates a bug in recurrence generation
    /// rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(*self, Error::MonthSearchExhausted { .. })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::InvalidArgument(ref message) => write!(f, "{message}"),
            Error::MonthSearchExhausted { after, skipped } => write!(
                f,
                "no qualifying month found in the {skipped} months \
                 following {after} (this is a bug)",
            ),
        }
    }
}

impl std::error::Error for Error {}
