//! Progress calculator: turns raw realized-appointment counts into
//! completion percentages against a project's quotas.
//!
//! Rates are not capped at 100; capping is a display concern.

use serde::Serialize;

use crate::status::ProjectStatus;

/// Quotas and lifecycle state needed to derive progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaInput {
    pub daily_quota: f64,
    pub monthly_quota: i32,
    pub status: ProjectStatus,
}

/// Realized appointment counts for the current day and month-to-date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealizedCounts {
    pub today: i64,
    pub month: i64,
}

/// Derived, never-persisted progress figures for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProjectProgress {
    pub realized_today: i64,
    pub realized_month: i64,
    pub daily_rate: f64,
    pub monthly_rate: f64,
}

/// `count / quota * 100`, or 0 when the quota is not positive.
pub fn completion_rate(count: i64, quota: f64) -> f64 {
    if quota <= 0.0 || !quota.is_finite() {
        return 0.0;
    }
    count as f64 / quota * 100.0
}

/// Compute progress for a project.
///
/// Paused projects report zero counts and zero rates regardless of the
/// underlying appointment data, so they never contribute to totals.
pub fn compute(quota: &QuotaInput, counts: RealizedCounts) -> ProjectProgress {
    if quota.status == ProjectStatus::Paused {
        return ProjectProgress::default();
    }
    ProjectProgress {
        realized_today: counts.today,
        realized_month: counts.month,
        daily_rate: completion_rate(counts.today, quota.daily_quota),
        monthly_rate: completion_rate(counts.month, f64::from(quota.monthly_quota)),
    }
}

/// Portfolio-wide quota totals over active projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QuotaTotals {
    pub daily_quota_total: f64,
    pub monthly_quota_total: i64,
}

/// Sum the quotas of active projects.
pub fn quota_totals<'a>(quotas: impl IntoIterator<Item = &'a QuotaInput>) -> QuotaTotals {
    quotas
        .into_iter()
        .filter(|q| q.status == ProjectStatus::Active)
        .fold(QuotaTotals::default(), |acc, q| QuotaTotals {
            daily_quota_total: acc.daily_quota_total + q.daily_quota,
            monthly_quota_total: acc.monthly_quota_total + i64::from(q.monthly_quota),
        })
}
