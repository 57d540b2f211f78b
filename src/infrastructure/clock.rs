use crate::domain::expiration::YearMonth;
use crate::domain::ports::Clock;
use chrono::{Datelike, Local};

/// Reads the month from the local system calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_month(&self) -> YearMonth {
        let today = Local::now().date_naive();
        YearMonth {
            year: today.year(),
            month: today.month(),
        }
    }
}

/// Always reports the same month. Used by tests and the `--today` override.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub YearMonth);

impl Clock for FixedClock {
    fn current_month(&self) -> YearMonth {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_month_in_range() {
        let now = SystemClock.current_month();
        assert!((1..=12).contains(&now.month));
        assert!(now.year >= 2024);
    }

    #[test]
    fn test_fixed_clock() {
        let month = YearMonth::new(2030, 2).unwrap();
        assert_eq!(FixedClock(month).current_month(), month);
    }
}
