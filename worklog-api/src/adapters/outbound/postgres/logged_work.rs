use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::RepositoryError;
use crate::domain::{
    models::{LoggedWork, LoggedWorkId, NewLoggedWork, ProjectId},
    ports::outbound::LoggedWorkRepository,
    WorklogError,
};

#[derive(Debug, FromRow)]
struct LoggedWorkRow {
    id: String,
    user_name: String,
    type_of_work: Option<String>,
    project_id: String,
    start_time: OffsetDateTime,
    end_time: Option<OffsetDateTime>,
    details: Option<String>,
    hours: Option<f64>,
}

impl From<LoggedWorkRow> for LoggedWork {
    fn from(row: LoggedWorkRow) -> Self {
        Self {
            id: LoggedWorkId::new(row.id),
            user: row.user_name,
            type_of_work: row.type_of_work,
            project: ProjectId::new(row.project_id),
            start_time: row.start_time,
            end_time: row.end_time,
            details: row.details,
            hours: row.hours,
        }
    }
}

const COLUMNS: &str =
    "id, user_name, type_of_work, project_id, start_time, end_time, details, hours";

pub struct PostgresLoggedWorkRepository {
    pool: PgPool,
}

impl PostgresLoggedWorkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoggedWorkRepository for PostgresLoggedWorkRepository {
    async fn insert(&self, work: NewLoggedWork) -> Result<LoggedWork, WorklogError> {
        let work = work.into_logged_work(LoggedWorkId::generate());

        let row = sqlx::query_as::<_, LoggedWorkRow>(&format!(
            r#"
            INSERT INTO logged_work (id, user_name, type_of_work, project_id, start_time,
                end_time, details, hours)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(work.id.as_str())
        .bind(&work.user)
        .bind(&work.type_of_work)
        .bind(work.project.as_str())
        .bind(work.start_time)
        .bind(work.end_time)
        .bind(&work.details)
        .bind(work.hours)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<LoggedWork>, WorklogError> {
        let rows = sqlx::query_as::<_, LoggedWorkRow>(&format!(
            "SELECT {COLUMNS} FROM logged_work ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(rows.into_iter().map(LoggedWork::from).collect())
    }

    async fn get(&self, id: &LoggedWorkId) -> Result<Option<LoggedWork>, WorklogError> {
        let row = sqlx::query_as::<_, LoggedWorkRow>(&format!(
            "SELECT {COLUMNS} FROM logged_work WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(LoggedWork::from))
    }

    async fn update(&self, work: &LoggedWork) -> Result<LoggedWork, WorklogError> {
        let row = sqlx::query_as::<_, LoggedWorkRow>(&format!(
            r#"
            UPDATE logged_work
            SET user_name = $2,
                type_of_work = $3,
                start_time = $4,
                end_time = $5,
                details = $6,
                hours = $7
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(work.id.as_str())
        .bind(&work.user)
        .bind(&work.type_of_work)
        .bind(work.start_time)
        .bind(work.end_time)
        .bind(&work.details)
        .bind(work.hours)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        row.map(LoggedWork::from)
            .ok_or_else(|| WorklogError::not_found(format_args!("logged work {}", work.id)))
    }

    async fn delete(&self, id: &LoggedWorkId) -> Result<bool, WorklogError> {
        let result = sqlx::query("DELETE FROM logged_work WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
