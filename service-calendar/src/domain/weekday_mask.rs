//! Seven-day active pattern packed into a byte.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Error returned when building a mask from invalid input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid weekday mask: {reason}")]
pub struct InvalidWeekdayMask {
    reason: &'static str,
}

impl InvalidWeekdayMask {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// The weekdays on which a service runs.
///
/// Stored as bits 0..=6 of a byte, where bit `n` is the weekday that is `n`
/// days from Sunday (bit 0 = Sunday, bit 1 = Monday, ... bit 6 = Saturday).
/// Bit 7 is always clear.
///
/// # Examples
///
/// ```
/// use service_calendar::domain::WeekdayMask;
/// use chrono::Weekday;
///
/// let mask = WeekdayMask::parse("M-W-F--").unwrap();
/// assert!(mask.monday());
/// assert!(!mask.tuesday());
/// assert!(mask.contains(Weekday::Fri));
/// assert_eq!(mask.to_string(), "M-W-F--");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "NamedDays", into = "NamedDays")]
pub struct WeekdayMask(u8);

/// Weekdays in the order used for display and parsing.
const MONDAY_FIRST: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const DAY_LETTERS: [u8; 7] = *b"MTWTFSS";

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

impl WeekdayMask {
    /// No day active.
    pub const NONE: Self = Self(0);

    /// Every day active.
    pub const ALL: Self = Self(0b0111_1111);

    /// Monday to Friday.
    pub const WEEKDAYS: Self = Self(0b0011_1110);

    /// Saturday and Sunday.
    pub const WEEKEND: Self = Self(0b0100_0001);

    /// Build a mask from its packed bits (bit 0 = Sunday).
    pub fn from_bits(bits: u8) -> Result<Self, InvalidWeekdayMask> {
        if bits & 0b1000_0000 != 0 {
            return Err(InvalidWeekdayMask::new("bit 7 must be clear"));
        }
        Ok(Self(bits))
    }

    /// A mask with exactly one day active.
    pub fn single(day: Weekday) -> Self {
        Self(bit(day))
    }

    /// Parse a Monday-first pattern such as `"MTWTF--"`.
    ///
    /// Each of the seven positions must hold either that day's letter
    /// (case-insensitive) or `-`.
    pub fn parse(s: &str) -> Result<Self, InvalidWeekdayMask> {
        let bytes = s.as_bytes();
        if bytes.len() != 7 {
            return Err(InvalidWeekdayMask::new("expected 7 characters"));
        }

        let mut mask = Self::NONE;
        for ((&c, &letter), day) in bytes.iter().zip(DAY_LETTERS.iter()).zip(MONDAY_FIRST) {
            if c.eq_ignore_ascii_case(&letter) {
                mask.set(day, true);
            } else if c != b'-' {
                return Err(InvalidWeekdayMask::new("expected day letter or '-'"));
            }
        }
        Ok(mask)
    }

    /// Returns the packed bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether `day` is active. A pure bit read.
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    /// Turn `day` on or off.
    pub fn set(&mut self, day: Weekday, active: bool) {
        if active {
            self.0 |= bit(day);
        } else {
            self.0 &= !bit(day);
        }
    }

    /// Returns a copy with `day` set to `active`.
    pub fn with(mut self, day: Weekday, active: bool) -> Self {
        self.set(day, active);
        self
    }

    /// True if no day is active.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of active days.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Active days, Monday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        MONDAY_FIRST.into_iter().filter(move |&d| self.contains(d))
    }

    pub fn monday(self) -> bool {
        self.contains(Weekday::Mon)
    }

    pub fn tuesday(self) -> bool {
        self.contains(Weekday::Tue)
    }

    pub fn wednesday(self) -> bool {
        self.contains(Weekday::Wed)
    }

    pub fn thursday(self) -> bool {
        self.contains(Weekday::Thu)
    }

    pub fn friday(self) -> bool {
        self.contains(Weekday::Fri)
    }

    pub fn saturday(self) -> bool {
        self.contains(Weekday::Sat)
    }

    pub fn sunday(self) -> bool {
        self.contains(Weekday::Sun)
    }

    pub fn set_monday(&mut self, active: bool) {
        self.set(Weekday::Mon, active);
    }

    pub fn set_tuesday(&mut self, active: bool) {
        self.set(Weekday::Tue, active);
    }

    pub fn set_wednesday(&mut self, active: bool) {
        self.set(Weekday::Wed, active);
    }

    pub fn set_thursday(&mut self, active: bool) {
        self.set(Weekday::Thu, active);
    }

    pub fn set_friday(&mut self, active: bool) {
        self.set(Weekday::Fri, active);
    }

    pub fn set_saturday(&mut self, active: bool) {
        self.set(Weekday::Sat, active);
    }

    pub fn set_sunday(&mut self, active: bool) {
        self.set(Weekday::Sun, active);
    }
}

impl BitOr for WeekdayMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for WeekdayMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for WeekdayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeekdayMask({self})")
    }
}

impl fmt::Display for WeekdayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (&letter, day) in DAY_LETTERS.iter().zip(MONDAY_FIRST) {
            let c = if self.contains(day) { letter as char } else { '-' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Serialized form: one named boolean per day.
#[derive(Serialize, Deserialize)]
struct NamedDays {
    monday: bool,
    tuesday: bool,
    wednesday: bool,
    thursday: bool,
    friday: bool,
    saturday: bool,
    sunday: bool,
}

impl From<NamedDays> for WeekdayMask {
    fn from(d: NamedDays) -> Self {
        let mut mask = WeekdayMask::NONE;
        mask.set_monday(d.monday);
        mask.set_tuesday(d.tuesday);
        mask.set_wednesday(d.wednesday);
        mask.set_thursday(d.thursday);
        mask.set_friday(d.friday);
        mask.set_saturday(d.saturday);
        mask.set_sunday(d.sunday);
        mask
    }
}

impl From<WeekdayMask> for NamedDays {
    fn from(m: WeekdayMask) -> Self {
        NamedDays {
            monday: m.monday(),
            tuesday: m.tuesday(),
            wednesday: m.wednesday(),
            thursday: m.thursday(),
            friday: m.friday(),
            saturday: m.saturday(),
            sunday: m.sunday(),
        }
    }
}
