//! Priority scoring: ranks projects by urgency, profitability and
//! remaining volume to produce a single "work on this next" recommendation.
//!
//! Composite score = 40% delay + 30% profitability + 30% remaining volume.
//! The computation is a pure function of the inputs; ties are broken by
//! input order (the earliest candidate wins).

use serde::Serialize;

use crate::status::ProjectStatus;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DELAY_WEIGHT: f64 = 0.4;
pub const PROFITABILITY_WEIGHT: f64 = 0.3;
pub const VOLUME_WEIGHT: f64 = 0.3;

/// Bonus added to the delay score when the monthly rate is below
/// [`MONTHLY_CRITICAL_RATE`].
pub const MONTHLY_DELAY_BONUS: f64 = 30.0;

/// Monthly rate under which the project counts as critically late.
pub const MONTHLY_CRITICAL_RATE: f64 = 70.0;

/// Daily rate under which the daily delay counts as significant.
pub const DAILY_SIGNIFICANT_RATE: f64 = 70.0;

/// Profitability that maps to a full profitability score.
pub const PROFITABILITY_SCALE: f64 = 1000.0;

/// Profitability above which the justification mentions it.
pub const HIGH_PROFITABILITY: f64 = 500.0;

/// Share of the monthly quota above which the remaining volume is "large".
pub const LARGE_VOLUME_SHARE: f64 = 0.5;

/// Justification used when no rule applies.
pub const BALANCED_REASON: &str = "Balanced project with good potential";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the engine needs to know about one candidate project.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringInput {
    pub project_id: DbId,
    pub status: ProjectStatus,
    pub daily_rate: f64,
    pub monthly_rate: f64,
    pub profitability: f64,
    pub remaining_balance: i32,
    pub monthly_quota: i32,
}

/// Ephemeral output of the engine. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectScore {
    pub project_id: DbId,
    pub score: f64,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Component scores
// ---------------------------------------------------------------------------

/// Urgency: how far behind the daily objective, plus a flat bonus when the
/// monthly objective is critically late. Not clamped after the bonus.
pub fn delay_score(daily_rate: f64, monthly_rate: f64) -> f64 {
    let mut score = if daily_rate < 100.0 {
        (100.0 - daily_rate).max(0.0)
    } else {
        0.0
    };
    if monthly_rate < MONTHLY_CRITICAL_RATE {
        score += MONTHLY_DELAY_BONUS;
    }
    score
}

pub fn profitability_score(profitability: f64) -> f64 {
    (profitability / PROFITABILITY_SCALE * 100.0).min(100.0)
}

/// Remaining balance as a share of the monthly quota, capped at 100.
/// A zero monthly quota contributes nothing.
pub fn volume_score(remaining_balance: i32, monthly_quota: i32) -> f64 {
    if monthly_quota == 0 {
        return 0.0;
    }
    (f64::from(remaining_balance) / f64::from(monthly_quota) * 100.0).min(100.0)
}

/// Weighted composite of the three component scores.
pub fn composite_score(input: &ScoringInput) -> f64 {
    delay_score(input.daily_rate, input.monthly_rate) * DELAY_WEIGHT
        + profitability_score(input.profitability) * PROFITABILITY_WEIGHT
        + volume_score(input.remaining_balance, input.monthly_quota) * VOLUME_WEIGHT
}

// ---------------------------------------------------------------------------
// Justification
// ---------------------------------------------------------------------------

/// Build the human-readable justification. Rules are evaluated in a fixed
/// order and are not mutually exclusive (except the two daily rules).
pub fn justification(input: &ScoringInput) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if input.daily_rate < DAILY_SIGNIFICANT_RATE {
        reasons.push(format!(
            "Significant delay on daily objective ({:.0}%)",
            input.daily_rate
        ));
    } else if input.daily_rate < 100.0 {
        reasons.push(format!(
            "Daily objective not met ({:.0}%)",
            input.daily_rate
        ));
    }

    if input.monthly_rate < MONTHLY_CRITICAL_RATE {
        reasons.push(format!(
            "Critical delay on monthly objective ({:.0}%)",
            input.monthly_rate
        ));
    }

    if input.profitability > HIGH_PROFITABILITY {
        reasons.push(format!("High profitability ({}€)", input.profitability));
    }

    if f64::from(input.remaining_balance) > f64::from(input.monthly_quota) * LARGE_VOLUME_SHARE {
        reasons.push(format!(
            "Large remaining volume ({} RDV)",
            input.remaining_balance
        ));
    }

    if reasons.is_empty() {
        return BALANCED_REASON.to_string();
    }
    reasons.join(". ")
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

pub fn score_project(input: &ScoringInput) -> ProjectScore {
    ProjectScore {
        project_id: input.project_id,
        score: composite_score(input),
        reason: justification(input),
    }
}

/// Score every active candidate, highest first. The sort is stable, so
/// equal scores keep their input order.
pub fn rank(candidates: &[ScoringInput]) -> Vec<ProjectScore> {
    let mut scores: Vec<ProjectScore> = candidates
        .iter()
        .filter(|c| c.status == ProjectStatus::Active)
        .map(score_project)
        .collect();
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}

/// The single highest-priority project, or `None` when there is no
/// active candidate.
pub fn recommend(candidates: &[ScoringInput]) -> Option<ProjectScore> {
    rank(candidates).into_iter().next()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
