//! Result documents returned by synchronization runs.
//!
//! Keys are camelCase to match what the dashboard front end consumes.

use rdvtrack_core::types::DbId;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Program catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramAction {
    Imported,
    Updated,
}

/// One reconciled program.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramOutcome {
    pub program_id: String,
    pub name: String,
    pub project_id: DbId,
    pub action: ProgramAction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgramResults {
    pub imported: u32,
    pub updated: u32,
    pub errors: u32,
    pub programs: Vec<ProgramOutcome>,
}

/// A program as seen in a dry run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramPreview {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSyncReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ProgramResults>,
    /// Dry run only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programs: Option<Vec<ProgramPreview>>,
    /// Dry run only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_content: Option<String>,
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Inclusive period the action feed was queried for, as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start_date: String,
    pub end_date: String,
}

/// An action materialized as an appointment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedAction {
    pub action_id: String,
    pub program_name: Option<String>,
    pub appointment_id: DbId,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionResults {
    pub imported: u32,
    pub skipped: u32,
    pub errors: u32,
    pub actions: Vec<ImportedAction>,
}

/// An action as seen in a dry run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPreview {
    pub id: String,
    pub date: String,
    pub commission: f64,
    pub program_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSyncReport {
    pub success: bool,
    pub message: String,
    pub period: Period,
    /// Label of the status filter. Dry run only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ActionResults>,
    /// First parsed actions. Dry run only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionPreview>>,
    /// Dry run only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_content: Option<String>,
}
