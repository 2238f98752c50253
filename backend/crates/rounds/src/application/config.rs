//! Application Configuration
//!
//! Configuration for the Rounds application layer.

use chrono::NaiveDate;

use crate::domain::value_object::schedule_window::ScheduleWindow;

/// Rounds application configuration
#[derive(Debug, Clone)]
pub struct RoundsConfig {
    /// Allowed distance in meters reported when a round has none (or zero)
    pub default_allowed_distance: f64,
    /// Days after today included in the schedule window
    pub schedule_extra_days: u32,
}

impl Default for RoundsConfig {
    fn default() -> Self {
        Self {
            default_allowed_distance: 50.0,
            schedule_extra_days: 1, // today and tomorrow
        }
    }
}

impl RoundsConfig {
    /// Schedule window anchored at `today`
    pub fn schedule_window(&self, today: NaiveDate) -> ScheduleWindow {
        ScheduleWindow::starting(today, self.schedule_extra_days)
    }
}
