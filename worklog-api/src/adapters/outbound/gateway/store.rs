use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{Project, ProjectId, SyncAuthorization, SyncFailure},
    ports::outbound::{ProjectGateway, ProjectRepository},
    WorklogError,
};

/// Reaches projects through the project store directly, in-process.
pub struct StoreProjectGateway<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> StoreProjectGateway<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: ProjectRepository + ?Sized> ProjectGateway for StoreProjectGateway<R> {
    async fn authorize(&self) -> Result<SyncAuthorization, SyncFailure> {
        Ok(SyncAuthorization::InProcess)
    }

    async fn fetch_project(
        &self,
        id: &ProjectId,
        _authorization: &SyncAuthorization,
    ) -> Option<Project> {
        match self.repo.get(id).await {
            Ok(project) => project,
            Err(e) => {
                tracing::warn!(project_id = %id, error = %e, "failed to read project");
                None
            }
        }
    }

    async fn push_project(
        &self,
        project: &Project,
        _authorization: &SyncAuthorization,
        expected_version: Option<u64>,
    ) -> Result<(), SyncFailure> {
        match self.repo.replace(project, expected_version).await {
            Ok(_) => Ok(()),
            Err(WorklogError::Conflict(_)) => Err(SyncFailure::Conflict),
            Err(WorklogError::NotFound(_)) => Err(SyncFailure::ProjectNotFound(project.id.clone())),
            Err(e) => Err(SyncFailure::Rejected(e.to_string())),
        }
    }
}
