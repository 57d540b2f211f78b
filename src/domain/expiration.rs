use crate::error::{CheckoutError, Result};
use std::fmt;
use std::str::FromStr;

/// Digits in a complete expiration entry: two for the month, four for the year.
pub const EXPIRATION_DIGITS: usize = 6;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(CheckoutError::InvalidDate(format!(
                "month {month} is outside 1-12"
            )))
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parses `YYYY-MM`.
impl FromStr for YearMonth {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CheckoutError::InvalidDate(format!("expected YYYY-MM, got {s:?}"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Parses a stripped `MMYYYY` entry into the month it names.
///
/// Returns `None` while the entry is incomplete or names a month outside 1-12.
pub fn parse_expiration(digits: &str) -> Option<YearMonth> {
    if digits.len() != EXPIRATION_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = digits[..2].parse::<u32>().ok()?;
    let year = digits[2..].parse::<i32>().ok()?;
    YearMonth::new(year, month).ok()
}

/// A card is usable through the last day of its expiration month, so the
/// current month is still valid.
pub fn is_expiration_valid(digits: &str, today: YearMonth) -> bool {
    parse_expiration(digits).is_some_and(|expires| expires >= today)
}
