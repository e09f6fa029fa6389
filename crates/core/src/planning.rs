//! Planning slot rules: slot validation and point-in-time progress.

use chrono::NaiveTime;

use crate::error::CoreError;
use crate::progress::{completion_rate, QuotaInput};
use crate::status::ProjectStatus;

/// Label shown for slots not assigned to any project.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// A slot must end strictly after it starts.
pub fn validate_slot(start: NaiveTime, end: NaiveTime) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(format!(
            "Slot end ({end}) must be after slot start ({start})"
        )));
    }
    Ok(())
}

/// Progress for a slot's project on the slot's date, recomputed at read time.
///
/// Unassigned slots and paused projects report 0.
pub fn slot_progress(quota: Option<&QuotaInput>, realized_on_date: i64) -> f64 {
    match quota {
        Some(q) if q.status == ProjectStatus::Active => {
            completion_rate(realized_on_date, q.daily_quota)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn slot_must_end_after_start() {
        assert!(validate_slot(t(9, 0), t(10, 30)).is_ok());
        assert_matches!(validate_slot(t(10, 0), t(10, 0)), Err(CoreError::Validation(_)));
        assert_matches!(validate_slot(t(14, 0), t(9, 0)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn slot_progress_uses_daily_quota() {
        let quota = QuotaInput {
            daily_quota: 4.0,
            monthly_quota: 80,
            status: ProjectStatus::Active,
        };
        assert!((slot_progress(Some(&quota), 2) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn slot_progress_zero_when_unassigned_or_paused() {
        let paused = QuotaInput {
            daily_quota: 4.0,
            monthly_quota: 80,
            status: ProjectStatus::Paused,
        };
        assert_eq!(slot_progress(None, 3), 0.0);
        assert_eq!(slot_progress(Some(&paused), 3), 0.0);
    }
}
