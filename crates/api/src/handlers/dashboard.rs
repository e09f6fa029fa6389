//! Dashboard handlers: the "work on this next" recommendation and the
//! financial summary.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use rdvtrack_core::financial::{self, FinancialEntry, FinancialStats};
use rdvtrack_core::scoring::{self, ProjectScore, ScoringInput};
use rdvtrack_db::repositories::AppointmentRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::project::load_with_progress;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub score: ProjectScore,
    pub project_name: String,
}

/// GET /api/v1/dashboard/recommendation
///
/// `data` is `null` when no project is active.
pub async fn recommendation(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<Recommendation>>>> {
    let projects = load_with_progress(&state.pool, Utc::now()).await?;
    let candidates: Vec<ScoringInput> = projects
        .iter()
        .map(|p| ScoringInput {
            project_id: p.project.id,
            status: p.project.status,
            daily_rate: p.progress.daily_rate,
            monthly_rate: p.progress.monthly_rate,
            profitability: p.project.profitability,
            remaining_balance: p.project.remaining_balance,
            monthly_quota: p.project.monthly_quota,
        })
        .collect();

    let data = scoring::recommend(&candidates).map(|score| {
        let project_name = projects
            .iter()
            .find(|p| p.project.id == score.project_id)
            .map(|p| p.project.name.clone())
            .unwrap_or_default();
        Recommendation {
            score,
            project_name,
        }
    });

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/dashboard/financial
pub async fn financial(State(state): State<AppState>) -> AppResult<Json<DataResponse<FinancialStats>>> {
    let entries: Vec<FinancialEntry> = AppointmentRepo::list_financial(&state.pool)
        .await?
        .into_iter()
        .map(FinancialEntry::from)
        .collect();
    Ok(Json(DataResponse {
        data: financial::aggregate(&entries),
    }))
}
