use jiff::civil;

use crate::error::Error;

/// A day of the week.
///
/// Weekdays are numbered starting at `Sunday = 0` through `Saturday = 6`.
/// That is the only numbering used in this crate. Jiff's `Weekday` is
/// accepted and produced through the `From` impls below, and no other
/// conversions happen anywhere else.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Weekday {
    Sunday = 0,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub(crate) const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Returns the weekday for the given offset, where `0` is Sunday and `6`
    /// is Saturday.
    pub fn from_sunday_zero_offset(offset: i8) -> Result<Weekday, Error> {
        if !(0..=6).contains(&offset) {
            return Err(Error::invalid(format!(
                "invalid weekday number `{offset}` \
                 (weekdays must be in range 0..=6, where 0 is Sunday)",
            )));
        }
        Ok(Weekday::from_sunday_zero_offset_unchecked(i64::from(offset)))
    }

    /// Like `from_sunday_zero_offset`, but wraps any offset into range.
    pub(crate) fn from_sunday_zero_offset_unchecked(offset: i64) -> Weekday {
        // `rem_euclid(7)` is always in `0..=6`.
        Weekday::ALL[offset.rem_euclid(7) as usize]
    }

    pub fn to_sunday_zero_offset(self) -> i8 {
        self as i8
    }

    /// Returns the number of days from this weekday until the next
    /// occurrence of `other`, in the range `0..=6`.
    ///
    /// When `self == other`, this returns `0` and not `7`.
    pub fn days_until(self, other: Weekday) -> i8 {
        let (from, to) =
            (self.to_sunday_zero_offset(), other.to_sunday_zero_offset());
        (to - from + 7) % 7
    }

    /// Returns the English name of this weekday.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Returns the three letter English abbreviation of this weekday.
    pub fn abbreviation(self) -> &'static str {
        &self.name()[..3]
    }
}

impl std::str::FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Weekday, Error> {
        use self::Weekday::*;

        let weekday = match &*s.to_ascii_lowercase() {
            "sunday" | "sun" | "su" => Sunday,
            "monday" | "mon" | "mo" => Monday,
            "tuesday" | "tues" | "tue" | "tu" => Tuesday,
            "wednesday" | "wed" | "we" => Wednesday,
            "thursday" | "thurs" | "thu" | "th" => Thursday,
            "friday" | "fri" | "fr" => Friday,
            "saturday" | "sat" | "sa" => Saturday,
            unk => {
                return Err(Error::invalid(format!(
                    "unrecognized weekday: `{unk}`"
                )));
            }
        };
        Ok(weekday)
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<civil::Weekday> for Weekday {
    fn from(weekday: civil::Weekday) -> Weekday {
        let offset = weekday.to_sunday_zero_offset();
        Weekday::from_sunday_zero_offset_unchecked(i64::from(offset))
    }
}

impl From<Weekday> for civil::Weekday {
    fn from(weekday: Weekday) -> civil::Weekday {
        let offset = weekday.to_sunday_zero_offset();
        // Every weekday offset is in the range Jiff accepts.
        civil::Weekday::from_sunday_zero_offset(offset)
            .unwrap_or(civil::Weekday::Sunday)
    }
}

/// A set of weekdays.
///
/// Inserting the same weekday twice has no effect, and iteration always
/// visits weekdays in order from Sunday to Saturday regardless of insertion
/// order.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct WeekdaySet {
    bits: u8,
}

impl WeekdaySet {
    /// Returns a set with no weekdays in it.
    pub fn empty() -> WeekdaySet {
        WeekdaySet { bits: 0 }
    }

    /// Adds a weekday to this set. Returns false if it was already present.
    pub fn insert(&mut self, weekday: Weekday) -> bool {
        let present = self.contains(weekday);
        self.bits |= WeekdaySet::bit(weekday);
        !present
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.bits & WeekdaySet::bit(weekday) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns an iterator over the weekdays in this set, Sunday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |&wd| self.contains(wd))
    }

    fn bit(weekday: Weekday) -> u8 {
        1 << weekday.to_sunday_zero_offset()
    }
}

impl std::fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders as a comma separated list of abbreviations, e.g., `Thu,Sat`.
impl std::fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, weekday) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", weekday.abbreviation())?;
        }
        Ok(())
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(it: I) -> WeekdaySet {
        let mut set = WeekdaySet::empty();
        set.extend(it);
        set
    }
}

impl Extend<Weekday> for WeekdaySet {
    fn extend<I: IntoIterator<Item = Weekday>>(&mut self, it: I) {
        for weekday in it {
            self.insert(weekday);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering() {
        assert_eq!(Weekday::Sunday.to_sunday_zero_offset(), 0);
        assert_eq!(Weekday::Saturday.to_sunday_zero_offset(), 6);
        assert_eq!(Weekday::from_sunday_zero_offset(4), Ok(Weekday::Thursday));
        insta::assert_snapshot!(
            Weekday::from_sunday_zero_offset(7).unwrap_err(),
            @"invalid weekday number `7` (weekdays must be in range 0..=6, where 0 is Sunday)",
        );
        assert!(Weekday::from_sunday_zero_offset(-1).is_err());
    }

    #[test]
    fn jiff_boundary() {
        for weekday in Weekday::ALL {
            let jweekday = civil::Weekday::from(weekday);
            assert_eq!(Weekday::from(jweekday), weekday);
            assert_eq!(
                jweekday.to_sunday_zero_offset(),
                weekday.to_sunday_zero_offset(),
            );
        }
    }

    #[test]
    fn days_until() {
        use self::Weekday::*;

        assert_eq!(Thursday.days_until(Thursday), 0);
        assert_eq!(Thursday.days_until(Friday), 1);
        assert_eq!(Thursday.days_until(Saturday), 2);
        assert_eq!(Thursday.days_until(Monday), 4);
        assert_eq!(Saturday.days_until(Sunday), 1);
        assert_eq!(Sunday.days_until(Saturday), 6);
    }

    #[test]
    fn parse() {
        assert_eq!("thu".parse::<Weekday>(), Ok(Weekday::Thursday));
        assert_eq!("SATURDAY".parse::<Weekday>(), Ok(Weekday::Saturday));
        assert_eq!("Tues".parse::<Weekday>(), Ok(Weekday::Tuesday));
        insta::assert_snapshot!(
            "frifday".parse::<Weekday>().unwrap_err(),
            @"unrecognized weekday: `frifday`",
        );
    }

    #[test]
    fn set_semantics() {
        use self::Weekday::*;

        let set: WeekdaySet =
            [Saturday, Thursday, Saturday].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Thursday));
        assert!(!set.contains(Friday));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Thursday, Saturday]);
        insta::assert_snapshot!(set, @"Thu,Sat");

        // Iterators don't borrow the set, so a temporary set is fine.
        let mut days = WeekdaySet::from_iter([Friday, Monday]).iter();
        assert_eq!(days.next(), Some(Monday));
        assert_eq!(days.next(), Some(Friday));
        assert_eq!(days.next(), None);

        let mut set = WeekdaySet::empty();
        assert!(set.is_empty());
        assert!(set.insert(Monday));
        assert!(!set.insert(Monday));
        assert_eq!(set.len(), 1);
    }
}
