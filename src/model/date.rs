//! Day-precise calendar handling for timesheet entries
//!
//! Dates are `YYYY-MM-DD` triples, not a number of seconds, and support
//! exactly the calendar arithmetic that cost bucketing needs: ordering,
//! predecessor, and jumping to the start of the enclosing week, month or
//! year. Weeks are Monday-first.

use std::fmt;
use std::str::FromStr;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use thiserror::Error;

/// A date with day precision
///
/// Supports years in the range 1000..=9999. All methods execute in
/// constant time except [`Date::start_of_week`], which walks back at
/// most six days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: u16,
    month: Month,
    day: u8,
}

/// Twelve months in the year, numbered 1..=12 in their textual form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum Month {
    Jan = 0,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Convert from the 1-based month number used in the textual format
    pub fn from_number(n: u32) -> Option<Self> {
        if (1..=12).contains(&n) {
            Self::from_u32(n - 1)
        } else {
            None
        }
    }

    /// The 1-based month number used in the textual format
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Month directly preceding the current one with wrapping
    pub fn prev(self) -> Self {
        Self::from_u32((self as u32 + 11) % 12).unwrap()
    }

    /// Number of days in this month of the given year
    pub fn count(self, year: u16) -> u8 {
        use Month::*;
        match self {
            Jan | Mar | May | Jul | Aug | Oct | Dec => 31,
            Apr | Jun | Sep | Nov => 30,
            Feb => {
                if is_leap(year) {
                    29
                } else {
                    28
                }
            }
        }
    }
}

/// Weekday with Monday-first week convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive)]
pub enum Weekday {
    Mon = 0,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Ways in which a date taken from an input document can be wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// year is outside of 1000..=9999
    #[error("year {0} is outside of the supported range 1000..=9999")]
    UnsupportedYear(u32),
    /// month outside of 1..=12
    #[error("{0} is not a valid month number")]
    InvalidMonth(u32),
    /// day outside of 1..=31
    #[error("{0} is not a valid day")]
    InvalidDay(u32),
    /// 29th, 30th or 31st day of a month that ends before that
    #[error("{0:?} {1} is a short month, it does not have a day {2}")]
    MonthTooShort(Month, u32, u32),
    /// not in `YYYY-MM-DD` shape at all
    #[error("'{0}' is not a YYYY-MM-DD date")]
    Unparseable(String),
}

impl Date {
    /// Validate a year-month-day triple into a date
    pub fn from(year: u32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(1000..=9999).contains(&year) {
            return Err(DateError::UnsupportedYear(year));
        }
        let month = Month::from_number(month).ok_or(DateError::InvalidMonth(month))?;
        if day == 0 || day > 31 {
            Err(DateError::InvalidDay(day))
        } else if day <= month.count(year as u16) as u32 {
            Ok(Self {
                year: year as u16,
                month,
                day: day as u8,
            })
        } else {
            Err(DateError::MonthTooShort(month, year, day))
        }
    }

    /// `self.year` accessor
    pub fn year(&self) -> u16 {
        self.year
    }

    /// `self.month` accessor
    pub fn month(&self) -> Month {
        self.month
    }

    /// `self.day` accessor
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Biject the dates with integers
    ///
    /// The indexing is consistent: for any date `d`,
    /// `d.index() + 1 == d.next().index()`.
    pub fn index(self) -> usize {
        let leaps = {
            let years = if self.month <= Month::Feb {
                self.year as usize - 1
            } else {
                self.year as usize
            };
            // count leap years up to the current one
            (years / 4) - (years / 100) + (years / 400)
        };
        let mut n = self.year as usize * 365 + self.day as usize;
        // days of the already elapsed months of the current year
        n += [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334][self.month as usize];
        n + leaps
    }

    /// Get day of week
    pub fn weekday(self) -> Weekday {
        let offset = 2; // aligns the index with the Monday-first convention
        Weekday::from_usize((self.index() - offset) % 7).unwrap()
    }

    /// Date directly following the current one
    pub fn next(self) -> Self {
        if self.day == self.month.count(self.year) {
            if self.month == Month::Dec {
                Self {
                    year: self.year + 1,
                    month: Month::Jan,
                    day: 1,
                }
            } else {
                Self {
                    month: Month::from_u32(self.month as u32 + 1).unwrap(),
                    day: 1,
                    ..self
                }
            }
        } else {
            Self {
                day: self.day + 1,
                ..self
            }
        }
    }

    /// Date directly preceding the current one
    pub fn prev(self) -> Self {
        if self.day == 1 {
            if self.month == Month::Jan {
                Self {
                    year: self.year - 1,
                    month: Month::Dec,
                    day: 31,
                }
            } else {
                let month = self.month.prev();
                Self {
                    month,
                    day: month.count(self.year),
                    ..self
                }
            }
        } else {
            Self {
                day: self.day - 1,
                ..self
            }
        }
    }

    /// First Monday at or before the current date
    pub fn start_of_week(self) -> Self {
        let mut d = self;
        for _ in 0..self.weekday() as usize {
            d = d.prev();
        }
        d
    }

    /// First day of the current month
    pub fn start_of_month(self) -> Self {
        Self { day: 1, ..self }
    }

    /// First day of the current year
    pub fn start_of_year(self) -> Self {
        Self {
            day: 1,
            month: Month::Jan,
            ..self
        }
    }
}

fn is_leap(year: u16) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year,
            self.month.number(),
            self.day
        )
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        let mut fields = s.splitn(3, '-');
        let mut next = || {
            fields
                .next()
                .and_then(|f| f.parse::<u32>().ok())
                .ok_or_else(|| DateError::Unparseable(s.to_string()))
        };
        let (year, month, day) = (next()?, next()?, next()?);
        Date::from(year, month, day)
    }
}

/// Calendar spacing of cost buckets
///
/// Each entry date is bucketed into the left-closed period of this
/// frequency that contains it, labeled by the period's start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Label of the period of this frequency containing `date`
    pub fn bucket(self, date: Date) -> Date {
        match self {
            Frequency::Daily => date,
            Frequency::Weekly => date.start_of_week(),
            Frequency::Monthly => date.start_of_month(),
            Frequency::Yearly => date.start_of_year(),
        }
    }

    /// Parse a command-line frequency name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            "yearly" => Some(Frequency::Yearly),
            _ => None,
        }
    }
}
