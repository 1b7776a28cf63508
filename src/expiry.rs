//! Expiry date parsing and validation.
//!
//! The form accepts `MM/YY` only. A card is valid through the end of its
//! stated month: `12/29` is still good on the 31st of December 2029.
//!
//! The current date never comes from the wall clock directly; it is read
//! through a [`Clock`], so validation stays deterministic under test.
//!
//! # Example
//!
//! ```
//! use cc_form::expiry::{parse_expiry, validate_expiry, ExpiryError, YearMonth};
//!
//! let today = YearMonth::new(2025, 1).unwrap();
//!
//! let expiry = parse_expiry("12/29").unwrap();
//! assert_eq!(expiry.month(), 12);
//! assert_eq!(expiry.year(), 2029);
//!
//! assert!(validate_expiry("01/25", today, None).is_ok());
//! assert!(matches!(validate_expiry("12/24", today, None), Err(ExpiryError::Expired { .. })));
//! ```

use crate::format::EXPIRY_SEPARATOR;
use chrono::Datelike;
use std::fmt;

/// A calendar month of a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearMonth {
    // Field order matters: derived `Ord` compares year first.
    year: u16,
    month: u8,
}

impl YearMonth {
    /// Creates a year/month.
    ///
    /// Returns `None` if the month is invalid (not 1-12).
    pub fn new(year: u16, month: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Months elapsed since year 0, for distance arithmetic.
    #[inline]
    const fn ordinal(&self) -> u32 {
        self.year as u32 * 12 + (self.month as u32 - 1)
    }

    /// Returns true if this expiry month has ended before `today`'s month.
    #[inline]
    pub fn is_expired_at(&self, today: YearMonth) -> bool {
        *self < today
    }

    /// Returns true if this expiry is more than `max_years` years after `today`.
    #[inline]
    pub fn is_too_far_future_at(&self, today: YearMonth, max_years: u16) -> bool {
        self.year > today.year.saturating_add(max_years)
    }

    /// Returns the number of months from `today` until this date; 0 once past.
    pub fn months_until(&self, today: YearMonth) -> u32 {
        self.ordinal().saturating_sub(today.ordinal())
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year % 100)
    }

    /// Formats as MM/YYYY.
    pub fn format_long(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

impl From<chrono::NaiveDate> for YearMonth {
    fn from(date: chrono::NaiveDate) -> Self {
        Self {
            year: date.year().clamp(0, u16::MAX as i32) as u16,
            month: date.month() as u8,
        }
    }
}

/// Source of the current year and month.
pub trait Clock {
    /// The current year and month.
    fn today(&self) -> YearMonth;
}

/// Reads the local date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> YearMonth {
        chrono::Local::now().date_naive().into()
    }
}

/// Always reports the same year and month. Useful in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub YearMonth);

impl Clock for FixedClock {
    fn today(&self) -> YearMonth {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> YearMonth {
        (**self).today()
    }
}

/// Errors that can occur during expiry date parsing/validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    /// The input has no digits.
    Empty,
    /// Fewer than four digits have been entered.
    Incomplete {
        /// Digits entered so far.
        digits: usize,
    },
    /// Invalid format: unexpected characters or more than four digits.
    InvalidFormat,
    /// Month is out of range (must be 1-12).
    InvalidMonth(u8),
    /// The expiry month is already over.
    Expired {
        /// The expiry month.
        month: u8,
        /// The expiry year.
        year: u16,
    },
    /// Year is too far in the future.
    TooFarFuture {
        /// The expiry year.
        year: u16,
        /// Maximum allowed year.
        max_year: u16,
    },
}

impl ExpiryError {
    /// Returns true for errors that more typing could fix.
    #[inline]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Self::Empty | Self::Incomplete { .. })
    }
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "expiry date is empty"),
            Self::Incomplete { digits } => {
                write!(f, "expiry date incomplete: {} of 4 digits", digits)
            }
            Self::InvalidFormat => write!(f, "invalid expiry format (expected MM/YY)"),
            Self::InvalidMonth(m) => write!(f, "invalid month {}: must be 1-12", m),
            Self::Expired { month, year } => {
                write!(f, "card expired ({:02}/{})", month, year)
            }
            Self::TooFarFuture { year, max_year } => {
                write!(
                    f,
                    "expiry year {} is too far in the future (max: {})",
                    year, max_year
                )
            }
        }
    }
}

impl std::error::Error for ExpiryError {}

/// Parses `MM/YY` (or `MMYY`). Two-digit years are read as `20YY`.
///
/// Only digits, the `/` separator and spaces are accepted.
///
/// ```
/// use cc_form::expiry::{parse_expiry, ExpiryError};
///
/// let expiry = parse_expiry("0630").unwrap();
/// assert_eq!((expiry.month(), expiry.year()), (6, 2030));
///
/// assert_eq!(parse_expiry("06/3"), Err(ExpiryError::Incomplete { digits: 3 }));
/// assert_eq!(parse_expiry("13/29"), Err(ExpiryError::InvalidMonth(13)));
/// ```
pub fn parse_expiry(input: &str) -> Result<YearMonth, ExpiryError> {
    let mut digits = [0u8; 4];
    let mut count = 0usize;

    for c in input.chars() {
        match c {
            '0'..='9' => {
                if count == digits.len() {
                    return Err(ExpiryError::InvalidFormat);
                }
                digits[count] = c as u8 - b'0';
                count += 1;
            }
            c if c == EXPIRY_SEPARATOR || c == ' ' => {}
            _ => return Err(ExpiryError::InvalidFormat),
        }
    }

    match count {
        0 => Err(ExpiryError::Empty),
        1..=3 => Err(ExpiryError::Incomplete { digits: count }),
        _ => {
            let month = digits[0] * 10 + digits[1];
            let year = 2000 + (digits[2] as u16) * 10 + digits[3] as u16;
            YearMonth::new(year, month).ok_or(ExpiryError::InvalidMonth(month))
        }
    }
}

/// Parses an expiry and checks it against `today`.
///
/// With `max_years` set, dates more than that many years ahead are rejected.
pub fn validate_expiry(
    input: &str,
    today: YearMonth,
    max_years: Option<u16>,
) -> Result<YearMonth, ExpiryError> {
    let expiry = parse_expiry(input)?;

    if expiry.is_expired_at(today) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }

    if let Some(max_years) = max_years {
        if expiry.is_too_far_future_at(today, max_years) {
            return Err(ExpiryError::TooFarFuture {
                year: expiry.year,
                max_year: today.year.saturating_add(max_years),
            });
        }
    }

    Ok(expiry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: u16, month: u8) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_parse_mm_yy() {
        let expiry = parse_expiry("12/25").unwrap();
        assert_eq!(expiry.month(), 12);
        assert_eq!(expiry.year(), 2025);
    }

    #[test]
    fn test_parse_mmyy() {
        let expiry = parse_expiry("0128").unwrap();
        assert_eq!(expiry, ym(2028, 1));
    }

    #[test]
    fn test_parse_incomplete() {
        assert_eq!(parse_expiry(""), Err(ExpiryError::Empty));
        assert_eq!(parse_expiry("/"), Err(ExpiryError::Empty));
        assert_eq!(parse_expiry("1"), Err(ExpiryError::Incomplete { digits: 1 }));
        assert_eq!(parse_expiry("12/"), Err(ExpiryError::Incomplete { digits: 2 }));
        assert!(parse_expiry("12/2").unwrap_err().is_incomplete());
    }

    #[test]
    fn test_parse_invalid_format() {
        assert_eq!(parse_expiry("12-25"), Err(ExpiryError::InvalidFormat));
        assert_eq!(parse_expiry("12/2025"), Err(ExpiryError::InvalidFormat));
        assert_eq!(parse_expiry("ab"), Err(ExpiryError::InvalidFormat));
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(parse_expiry("00/25"), Err(ExpiryError::InvalidMonth(0)));
        assert_eq!(parse_expiry("13/29"), Err(ExpiryError::InvalidMonth(13)));
    }

    #[test]
    fn test_expired_boundaries() {
        let today = ym(2025, 1);
        // Same month is still valid.
        assert!(validate_expiry("01/25", today, None).is_ok());
        // Previous month is expired.
        assert_eq!(
            validate_expiry("12/24", today, None),
            Err(ExpiryError::Expired { month: 12, year: 2024 })
        );
        // Later in the same year is fine.
        assert!(validate_expiry("02/25", today, None).is_ok());
    }

    #[test]
    fn test_expired_later_in_year() {
        let today = ym(2031, 1);
        assert!(matches!(
            validate_expiry("12/30", today, None),
            Err(ExpiryError::Expired { .. })
        ));
    }

    #[test]
    fn test_too_far_future() {
        let today = ym(2025, 6);
        assert!(validate_expiry("12/45", today, Some(20)).is_ok());
        assert_eq!(
            validate_expiry("01/46", today, Some(20)),
            Err(ExpiryError::TooFarFuture { year: 2046, max_year: 2045 })
        );
        assert!(validate_expiry("01/99", today, None).is_ok());
    }

    #[test]
    fn test_ordering_compares_year_first() {
        assert!(ym(2024, 12) < ym(2025, 1));
        assert!(ym(2025, 2) > ym(2025, 1));
    }

    #[test]
    fn test_months_until() {
        let today = ym(2025, 11);
        assert_eq!(ym(2026, 2).months_until(today), 3);
        assert_eq!(ym(2025, 11).months_until(today), 0);
        assert_eq!(ym(2020, 1).months_until(today), 0);
    }

    #[test]
    fn test_format() {
        let expiry = ym(2025, 3);
        assert_eq!(expiry.format_short(), "03/25");
        assert_eq!(expiry.format_long(), "03/2025");
        assert_eq!(expiry.to_string(), "03/25");
    }

    #[test]
    fn test_year_month_new() {
        assert!(YearMonth::new(2025, 1).is_some());
        assert!(YearMonth::new(2025, 12).is_some());
        assert!(YearMonth::new(2025, 0).is_none());
        assert!(YearMonth::new(2025, 13).is_none());
    }

    #[test]
    fn test_from_naive_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(YearMonth::from(date), ym(2026, 10));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(ym(2030, 7));
        assert_eq!(clock.today(), ym(2030, 7));
        assert_eq!((&clock).today(), ym(2030, 7));
    }

    #[test]
    fn test_system_clock_is_plausible() {
        let today = SystemClock.today();
        assert!(today.year() >= 2024);
        assert!((1..=12).contains(&today.month()));
    }
}
