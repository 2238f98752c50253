//! Schedule Window Value Object
//!
//! The inclusive range of execution dates a guard sees: today plus a fixed
//! number of following days. Login sync and the assigned-rounds refresh both
//! derive their range from this type.

use chrono::{Days, NaiveDate};

/// Inclusive date range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ScheduleWindow {
    /// Window starting at `today` and covering `extra_days` following days
    pub fn starting(today: NaiveDate, extra_days: u32) -> Self {
        let end = today
            .checked_add_days(Days::new(u64::from(extra_days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the window, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start.iter_days().take_while(|d| *d <= self.end).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_and_tomorrow() {
        let window = ScheduleWindow::starting(ymd(2025, 11, 3), 1);
        assert!(window.contains(ymd(2025, 11, 3)));
        assert!(window.contains(ymd(2025, 11, 4)));
        assert!(!window.contains(ymd(2025, 11, 2)));
        assert!(!window.contains(ymd(2025, 11, 5)));
        assert_eq!(window.dates(), vec![ymd(2025, 11, 3), ymd(2025, 11, 4)]);
    }

    #[test]
    fn test_crosses_month_and_year() {
        let window = ScheduleWindow::starting(ymd(2025, 12, 31), 1);
        assert_eq!(window.end(), ymd(2026, 1, 1));

        let window = ScheduleWindow::starting(ymd(2024, 2, 28), 1);
        assert_eq!(window.end(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_zero_extra_days_is_today_only() {
        let window = ScheduleWindow::starting(ymd(2025, 11, 3), 0);
        assert_eq!(window.start(), window.end());
        assert_eq!(window.dates().len(), 1);
    }
}
