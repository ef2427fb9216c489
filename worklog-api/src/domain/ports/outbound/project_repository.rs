//! Project store port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{NewProject, Project, ProjectId},
    WorklogError,
};

#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// Store a new project under a freshly generated id, at version 0.
    async fn insert(&self, project: NewProject) -> Result<Project, WorklogError>;

    async fn list(&self) -> Result<Vec<Project>, WorklogError>;

    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, WorklogError>;

    /// Overwrite the stored record with `project` and bump its version.
    ///
    /// With `expected_version`, the write only lands if the stored version
    /// still equals it; otherwise `WorklogError::Conflict`. Unknown ids yield
    /// `WorklogError::NotFound`.
    async fn replace(
        &self,
        project: &Project,
        expected_version: Option<u64>,
    ) -> Result<Project, WorklogError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &ProjectId) -> Result<bool, WorklogError>;
}
