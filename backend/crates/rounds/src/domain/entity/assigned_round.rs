//! Assigned Round Entity
//!
//! A patrol scheduled for one guard on one route at a specific date and time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use kernel::id::{AssignedRoundId, RoundTypeId, RouteId, UserId};

/// Scheduled round (`ronda_asignada`)
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedRound {
    pub id: AssignedRoundId,
    pub round_type_id: RoundTypeId,
    pub user_id: UserId,
    pub route_id: RouteId,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    /// Tolerance in meters between a scan and its checkpoint
    pub allowed_distance: Option<f64>,
}

impl AssignedRound {
    /// Scheduled date combined with scheduled time
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.scheduled_date.and_time(self.scheduled_time)
    }

    /// Allowed distance, falling back to `default` when unset or zero
    pub fn allowed_distance_or(&self, default: f64) -> f64 {
        match self.allowed_distance {
            Some(distance) if distance != 0.0 => distance,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(allowed_distance: Option<f64>) -> AssignedRound {
        AssignedRound {
            id: AssignedRoundId::new(1),
            round_type_id: RoundTypeId::new(1),
            user_id: UserId::new(1),
            route_id: RouteId::new(1),
            scheduled_date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            scheduled_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            allowed_distance,
        }
    }

    #[test]
    fn test_allowed_distance_fallback() {
        assert_eq!(round(None).allowed_distance_or(50.0), 50.0);
        assert_eq!(round(Some(0.0)).allowed_distance_or(50.0), 50.0);
        assert_eq!(round(Some(75.5)).allowed_distance_or(50.0), 75.5);
    }

    #[test]
    fn test_scheduled_at() {
        let at = round(None).scheduled_at();
        assert_eq!(at.to_string(), "2025-11-03 14:30:00");
    }
}
