//! Program catalog sync: every named vendor program becomes (or refreshes)
//! a project.

use rdvtrack_db::models::project::CreateProject;
use rdvtrack_timeone::parser::{self, FeedProgram};
use serde::Deserialize;

use crate::error::SyncError;
use crate::report::{
    ProgramAction, ProgramOutcome, ProgramPreview, ProgramResults, ProgramSyncReport,
};
use crate::source::FeedSource;
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramSyncRequest {
    pub dry_run: bool,
}

/// Fetch the catalog and reconcile it with the store.
///
/// A program whose name matches an existing project only touches it;
/// otherwise a project is created with the catalog defaults. A dry run
/// stops after parsing and returns the raw document with the parsed list.
pub async fn sync_programs(
    source: &dyn FeedSource,
    store: &dyn RecordStore,
    request: &ProgramSyncRequest,
) -> Result<ProgramSyncReport, SyncError> {
    let xml = source.programs_xml().await?;
    tracing::info!(bytes = xml.len(), "Program catalog received");

    let programs = parser::parse_programs(&xml);
    tracing::info!(count = programs.len(), "Programs parsed");

    if request.dry_run {
        return Ok(ProgramSyncReport {
            success: true,
            message: format!("Dry run: {} programs found", programs.len()),
            results: None,
            programs: Some(
                programs
                    .iter()
                    .map(|p| ProgramPreview {
                        id: p.id.clone(),
                        name: p.name.clone(),
                    })
                    .collect(),
            ),
            xml_content: Some(xml),
        });
    }

    let mut results = ProgramResults::default();
    for program in &programs {
        match reconcile(store, program).await {
            Ok(outcome) => {
                match outcome.action {
                    ProgramAction::Imported => results.imported += 1,
                    ProgramAction::Updated => results.updated += 1,
                }
                results.programs.push(outcome);
            }
            Err(e) => {
                tracing::warn!(program = %program.name, error = %e, "Failed to reconcile program");
                results.errors += 1;
            }
        }
    }

    tracing::info!(
        imported = results.imported,
        updated = results.updated,
        errors = results.errors,
        "Program sync finished",
    );

    Ok(ProgramSyncReport {
        success: true,
        message: format!(
            "Sync succeeded: {} imported, {} updated, {} errors",
            results.imported, results.updated, results.errors
        ),
        results: Some(results),
        programs: None,
        xml_content: None,
    })
}

async fn reconcile(
    store: &dyn RecordStore,
    program: &FeedProgram,
) -> Result<ProgramOutcome, StoreError> {
    let program_id = Some(program.id.as_str()).filter(|id| !id.is_empty());

    let (project_id, action) = match store.find_project_by_name(&program.name).await? {
        Some(id) => {
            store.touch_project(id, program_id).await?;
            (id, ProgramAction::Updated)
        }
        None => {
            let input = CreateProject::from_program(&program.name, program_id.map(str::to_string));
            (store.create_project(&input).await?, ProgramAction::Imported)
        }
    };
    tracing::debug!(program = %program.name, project_id, ?action, "Program reconciled");

    Ok(ProgramOutcome {
        program_id: program.id.clone(),
        name: program.name.clone(),
        project_id,
        action,
    })
}
