//! In-memory doubles for the store and feed seams.

use std::sync::Mutex;

use async_trait::async_trait;
use rdvtrack_core::types::DbId;
use rdvtrack_db::models::appointment::CreateAppointment;
use rdvtrack_db::models::project::CreateProject;
use rdvtrack_timeone::{ActionQuery, FeedError};

use crate::source::FeedSource;
use crate::store::{RecordStore, StoreError};

#[derive(Default)]
struct Inner {
    projects: Vec<(DbId, CreateProject)>,
    appointments: Vec<(DbId, CreateAppointment)>,
    next_id: DbId,
}

impl Inner {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    failing_name: Option<String>,
}

impl MemoryStore {
    /// Fail every lookup and write touching a project with this name.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing_name = Some(name.to_string());
        self
    }

    pub fn add_project(&self, name: &str, program_id: Option<&str>) -> DbId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let mut input = CreateProject::from_program(name, program_id.map(str::to_string));
        input.daily_quota = 2.0;
        inner.projects.push((id, input));
        id
    }

    pub fn project(&self, name: &str) -> Option<CreateProject> {
        let inner = self.inner.lock().unwrap();
        inner
            .projects
            .iter()
            .find(|(_, p)| p.name == name)
            .map(|(_, p)| p.clone())
    }

    pub fn project_count(&self) -> usize {
        self.inner.lock().unwrap().projects.len()
    }

    pub fn appointment(&self, action_id: &str) -> Option<CreateAppointment> {
        let inner = self.inner.lock().unwrap();
        inner
            .appointments
            .iter()
            .find(|(_, a)| a.action_id.as_deref() == Some(action_id))
            .map(|(_, a)| a.clone())
    }

    pub fn appointment_count(&self) -> usize {
        self.inner.lock().unwrap().appointments.len()
    }

    fn check(&self, name: &str) -> Result<(), StoreError> {
        match &self.failing_name {
            Some(failing) if failing == name => {
                Err(StoreError::Backend(format!("injected failure for {name}")))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_project_by_name(&self, name: &str) -> Result<Option<DbId>, StoreError> {
        self.check(name)?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .projects
            .iter()
            .find(|(_, p)| p.name == name)
            .map(|(id, _)| *id))
    }

    async fn find_project_by_program_id(
        &self,
        program_id: &str,
    ) -> Result<Option<DbId>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .projects
            .iter()
            .find(|(_, p)| p.external_program_id.as_deref() == Some(program_id))
            .map(|(id, _)| *id))
    }

    async fn touch_project(&self, id: DbId, program_id: Option<&str>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let (_, project) = inner
            .projects
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .ok_or_else(|| StoreError::Backend(format!("no project {id}")))?;
        if project.external_program_id.is_none() {
            project.external_program_id = program_id.map(str::to_string);
        }
        Ok(())
    }

    async fn create_project(&self, input: &CreateProject) -> Result<DbId, StoreError> {
        self.check(&input.name)?;
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        inner.projects.push((id, input.clone()));
        Ok(id)
    }

    async fn appointment_exists(&self, action_id: &str) -> Result<bool, StoreError> {
        Ok(self.appointment(action_id).is_some())
    }

    async fn create_appointment(&self, input: &CreateAppointment) -> Result<DbId, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        inner.appointments.push((id, input.clone()));
        Ok(id)
    }
}

/// A feed that serves fixed documents, or fails once with a given error.
#[derive(Default)]
pub struct CannedFeed {
    programs: String,
    actions: String,
    failure: Mutex<Option<FeedError>>,
    last_query: Mutex<Option<ActionQuery>>,
}

impl CannedFeed {
    pub fn programs(xml: &str) -> Self {
        Self {
            programs: xml.to_string(),
            ..Default::default()
        }
    }

    pub fn actions(xml: &str) -> Self {
        Self {
            actions: xml.to_string(),
            ..Default::default()
        }
    }

    pub fn failing(error: FeedError) -> Self {
        Self {
            failure: Mutex::new(Some(error)),
            ..Default::default()
        }
    }

    pub fn last_query(&self) -> Option<ActionQuery> {
        *self.last_query.lock().unwrap()
    }

    fn take_failure(&self) -> Result<(), FeedError> {
        match self.failure.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FeedSource for CannedFeed {
    async fn programs_xml(&self) -> Result<String, FeedError> {
        self.take_failure()?;
        Ok(self.programs.clone())
    }

    async fn actions_xml(&self, query: &ActionQuery) -> Result<String, FeedError> {
        self.take_failure()?;
        *self.last_query.lock().unwrap() = Some(*query);
        Ok(self.actions.clone())
    }
}
