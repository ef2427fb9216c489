use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    models::{NewProject, Project, ProjectId},
    ports::outbound::ProjectRepository,
    WorklogError,
};

#[derive(Default)]
pub struct MemoryProjectRepository {
    projects: RwLock<Vec<Project>>,
}

impl MemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepository {
    async fn insert(&self, project: NewProject) -> Result<Project, WorklogError> {
        let project = project.into_project(ProjectId::generate());
        self.projects.write().await.push(project.clone());
        Ok(project)
    }

    async fn list(&self) -> Result<Vec<Project>, WorklogError> {
        Ok(self.projects.read().await.clone())
    }

    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, WorklogError> {
        Ok(self
            .projects
            .read()
            .await
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn replace(
        &self,
        project: &Project,
        expected_version: Option<u64>,
    ) -> Result<Project, WorklogError> {
        let mut projects = self.projects.write().await;
        let stored = projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or_else(|| WorklogError::not_found(format_args!("project {}", project.id)))?;

        if expected_version.is_some_and(|expected| expected != stored.version) {
            return Err(WorklogError::Conflict(format!("project {}", project.id)));
        }

        let version = stored.version + 1;
        *stored = Project {
            version,
            ..project.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, WorklogError> {
        let mut projects = self.projects.write().await;
        let before = projects.len();
        projects.retain(|p| &p.id != id);
        Ok(projects.len() != before)
    }
}
