use async_trait::async_trait;

use crate::domain::{
    models::{Project, ProjectChanges, ProjectDraft, ProjectId},
    WorklogError,
};

/// Inbound port for project use cases.
///
/// Role checks happen in the HTTP layer; these operations assume the caller
/// is allowed to perform them.
#[async_trait]
pub trait ProjectService: Send + Sync + 'static {
    async fn create_project(&self, draft: ProjectDraft) -> Result<Project, WorklogError>;

    async fn list_projects(&self) -> Result<Vec<Project>, WorklogError>;

    async fn get_project(&self, id: &ProjectId) -> Result<Project, WorklogError>;

    /// Merge `changes` onto the stored project and save it.
    async fn update_project(
        &self,
        id: &ProjectId,
        changes: ProjectChanges,
    ) -> Result<Project, WorklogError>;

    async fn delete_project(&self, id: &ProjectId) -> Result<(), WorklogError>;
}
