use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{NewProject, Project, ProjectChanges, ProjectDraft, ProjectId},
    ports::{inbound::ProjectService, outbound::ProjectRepository},
    WorklogError,
};

/// Implementation of the ProjectService inbound port on top of a project store.
pub struct ProjectServiceImpl<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> ProjectServiceImpl<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: ProjectRepository + ?Sized> ProjectService for ProjectServiceImpl<R> {
    async fn create_project(&self, draft: ProjectDraft) -> Result<Project, WorklogError> {
        let new_project = NewProject::try_from(draft)?;
        let project = self.repo.insert(new_project).await?;

        tracing::info!(project_id = %project.id, "project created");
        Ok(project)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, WorklogError> {
        self.repo.list().await
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project, WorklogError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| WorklogError::not_found(format_args!("project {id}")))
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        changes: ProjectChanges,
    ) -> Result<Project, WorklogError> {
        let mut project = self.get_project(id).await?;
        let expected_version = changes.expected_version;

        project.apply(changes)?;
        self.repo.replace(&project, expected_version).await
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), WorklogError> {
        if !self.repo.delete(id).await? {
            return Err(WorklogError::not_found(format_args!("project {id}")));
        }

        tracing::info!(project_id = %id, "project deleted");
        Ok(())
    }
}
