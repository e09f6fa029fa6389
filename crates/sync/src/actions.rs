//! Performance action sync: vendor actions become appointments on the
//! project whose name matches the action's program.

use chrono::NaiveDate;
use rdvtrack_core::time_window::{self, DEFAULT_LOOKBACK_DAYS};
use rdvtrack_core::types::DbId;
use rdvtrack_db::models::appointment::CreateAppointment;
use rdvtrack_timeone::parser::{self, FeedAction};
use rdvtrack_timeone::{ActionQuery, ActionStatusFilter};
use serde::Deserialize;

use crate::error::SyncError;
use crate::report::{ActionPreview, ActionResults, ActionSyncReport, ImportedAction, Period};
use crate::source::FeedSource;
use crate::store::{RecordStore, StoreError};

/// Number of parsed actions echoed back by a dry run.
pub const DRY_RUN_PREVIEW_LIMIT: usize = 10;

/// Parameters of an action sync. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionSyncRequest {
    /// `YYYY-MM-DD`, defaults to 30 days before today.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, defaults to today.
    pub end_date: Option<String>,
    /// Feed status code `0`..`3` or its name, defaults to approved.
    pub status: Option<String>,
    pub dry_run: bool,
}

impl ActionSyncRequest {
    /// Resolve defaults against `today` and validate the period.
    pub fn query(&self, today: NaiveDate) -> Result<ActionQuery, SyncError> {
        let (default_start, default_end) = time_window::lookback_period(today, DEFAULT_LOOKBACK_DAYS);
        let start = parse_date(self.start_date.as_deref(), default_start, "startDate")?;
        let end = parse_date(self.end_date.as_deref(), default_end, "endDate")?;
        if start > end {
            return Err(SyncError::InvalidRequest(format!(
                "startDate ({start}) is after endDate ({end})"
            )));
        }

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => ActionStatusFilter::default(),
            Some(s) => ActionStatusFilter::parse(s)
                .ok_or_else(|| SyncError::InvalidRequest(format!("Unknown status filter: {s}")))?,
        };

        Ok(ActionQuery { start, end, status })
    }
}

fn parse_date(
    value: Option<&str>,
    default: NaiveDate,
    field: &str,
) -> Result<NaiveDate, SyncError> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            SyncError::InvalidRequest(format!("{field} must be YYYY-MM-DD, got {s:?}"))
        }),
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Fetch the actions for the requested period and import the new ones.
///
/// Actions are processed in feed order. An action is skipped when no
/// project matches it or when an appointment already carries its id.
pub async fn sync_actions(
    source: &dyn FeedSource,
    store: &dyn RecordStore,
    request: &ActionSyncRequest,
    today: NaiveDate,
) -> Result<ActionSyncReport, SyncError> {
    let query = request.query(today)?;
    let period = Period {
        start_date: query.start.format("%Y-%m-%d").to_string(),
        end_date: query.end.format("%Y-%m-%d").to_string(),
    };

    let xml = source.actions_xml(&query).await?;
    tracing::info!(
        bytes = xml.len(),
        start = %period.start_date,
        end = %period.end_date,
        status = query.status.label(),
        "Action feed received",
    );

    let actions = parser::parse_actions(&xml);
    tracing::info!(count = actions.len(), "Actions parsed");

    if request.dry_run {
        return Ok(ActionSyncReport {
            success: true,
            message: format!("Dry run: {} actions found", actions.len()),
            period,
            status: Some(query.status.label().to_string()),
            results: None,
            actions: Some(
                actions
                    .iter()
                    .take(DRY_RUN_PREVIEW_LIMIT)
                    .map(|a| ActionPreview {
                        id: a.id.clone(),
                        date: a.action_date.clone(),
                        commission: a.commission,
                        program_name: a.program_name.clone(),
                    })
                    .collect(),
            ),
            xml_content: Some(xml),
        });
    }

    let mut results = ActionResults::default();
    for action in &actions {
        match ingest(store, action).await {
            Ok(Ingested::Imported(imported)) => {
                results.imported += 1;
                results.actions.push(imported);
            }
            Ok(Ingested::Skipped(reason)) => {
                tracing::debug!(action_id = %action.id, program = ?action.program_name, reason, "Action skipped");
                results.skipped += 1;
            }
            Err(e) => {
                tracing::warn!(action_id = %action.id, error = %e, "Failed to import action");
                results.errors += 1;
            }
        }
    }

    tracing::info!(
        imported = results.imported,
        skipped = results.skipped,
        errors = results.errors,
        "Action sync finished",
    );

    Ok(ActionSyncReport {
        success: true,
        message: format!(
            "Sync succeeded: {} appointments imported, {} skipped, {} errors",
            results.imported, results.skipped, results.errors
        ),
        period,
        status: None,
        results: Some(results),
        actions: None,
        xml_content: None,
    })
}

enum Ingested {
    Imported(ImportedAction),
    Skipped(&'static str),
}

#[derive(Debug, thiserror::Error)]
enum ItemError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Unsupported action date: {0:?}")]
    InvalidDate(String),
}

async fn ingest(store: &dyn RecordStore, action: &FeedAction) -> Result<Ingested, ItemError> {
    let Some(project_id) = resolve_project(store, action).await? else {
        return Ok(Ingested::Skipped("no matching project"));
    };
    if store.appointment_exists(&action.id).await? {
        return Ok(Ingested::Skipped("already imported"));
    }
    let scheduled_at = action
        .scheduled_at()
        .ok_or_else(|| ItemError::InvalidDate(action.action_date.clone()))?;

    let input = CreateAppointment {
        project_id,
        scheduled_at,
        operator: action.operator(),
        status: Some(action.status()),
        action_id: Some(action.id.clone()),
        commission: Some(action.commission),
        cart_amount: Some(action.cart_amount),
        action_type: Some(action.action_type()),
    };
    let appointment_id = store.create_appointment(&input).await?;

    Ok(Ingested::Imported(ImportedAction {
        action_id: action.id.clone(),
        program_name: action.program_name.clone(),
        appointment_id,
        date: action.action_date.clone(),
    }))
}

/// Exact program-name match first, then the vendor program id recorded
/// by the catalog sync.
async fn resolve_project(
    store: &dyn RecordStore,
    action: &FeedAction,
) -> Result<Option<DbId>, StoreError> {
    if let Some(name) = &action.program_name {
        if let Some(id) = store.find_project_by_name(name).await? {
            return Ok(Some(id));
        }
    }
    match &action.program_id {
        Some(program_id) => store.find_project_by_program_id(program_id).await,
        None => Ok(None),
    }
}
