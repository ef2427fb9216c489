use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::RepositoryError;
use crate::domain::{
    models::{LoggedWorkId, NewProject, Project, ProjectId, UserId},
    ports::outbound::ProjectRepository,
    WorklogError,
};

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: String,
    title: String,
    project_lead: Option<String>,
    brief_content: Option<String>,
    extended_content: Option<String>,
    project_contact: Option<String>,
    contributors: Vec<String>,
    project_work: Vec<String>,
    types_of_work: Vec<String>,
    version: i64,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId::new(row.id),
            title: row.title,
            project_lead: row.project_lead,
            brief_content: row.brief_content,
            extended_content: row.extended_content,
            project_contact: row.project_contact,
            contributors: row.contributors.into_iter().map(UserId::new).collect(),
            project_work: row.project_work.into_iter().map(LoggedWorkId::new).collect(),
            types_of_work: row.types_of_work,
            version: u64::try_from(row.version).unwrap_or_default(),
        }
    }
}

const COLUMNS: &str = "id, title, project_lead, brief_content, extended_content, \
    project_contact, contributors, project_work, types_of_work, version";

fn ids<T: AsRef<str>>(ids: &[T]) -> Vec<String> {
    ids.iter().map(|id| id.as_ref().to_string()).collect()
}

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn insert(&self, project: NewProject) -> Result<Project, WorklogError> {
        let project = project.into_project(ProjectId::generate());

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (id, title, project_lead, brief_content, extended_content,
                project_contact, contributors, project_work, types_of_work, version)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(project.id.as_str())
        .bind(&project.title)
        .bind(&project.project_lead)
        .bind(&project.brief_content)
        .bind(&project.extended_content)
        .bind(&project.project_contact)
        .bind(ids(&project.contributors))
        .bind(ids(&project.project_work))
        .bind(&project.types_of_work)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Project>, WorklogError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {COLUMNS} FROM projects ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, WorklogError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(Project::from))
    }

    async fn replace(
        &self,
        project: &Project,
        expected_version: Option<u64>,
    ) -> Result<Project, WorklogError> {
        let expected_version = expected_version.and_then(|v| i64::try_from(v).ok());

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            UPDATE projects
            SET title = $2,
                project_lead = $3,
                brief_content = $4,
                extended_content = $5,
                project_contact = $6,
                contributors = $7,
                project_work = $8,
                types_of_work = $9,
                version = version + 1
            WHERE id = $1 AND ($10::BIGINT IS NULL OR version = $10)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(project.id.as_str())
        .bind(&project.title)
        .bind(&project.project_lead)
        .bind(&project.brief_content)
        .bind(&project.extended_content)
        .bind(&project.project_contact)
        .bind(ids(&project.contributors))
        .bind(ids(&project.project_work))
        .bind(&project.types_of_work)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        // Nothing matched: either the project is gone or the version moved on.
        match self.get(&project.id).await? {
            Some(_) => Err(WorklogError::Conflict(format!("project {}", project.id))),
            None => Err(WorklogError::not_found(format_args!(
                "project {}",
                project.id
            ))),
        }
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, WorklogError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
