use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::RepositoryError;
use crate::domain::{
    models::{AuthToken, Role, User, UserId},
    ports::outbound::UserRepository,
    PasswordHash, ValidationError, WorklogError,
};

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    username: String,
    password_hash: String,
    role: String,
}

impl UserRow {
    fn into_user(self) -> Result<(User, PasswordHash), WorklogError> {
        let role =
            Role::from_str(&self.role).map_err(|_| RepositoryError::UnknownRole(self.role))?;

        Ok((
            User {
                id: UserId::new(self.id),
                username: self.username,
                role,
            },
            PasswordHash::from_stored(self.password_hash),
        ))
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(
        &self,
        username: &str,
        password: &PasswordHash,
        role: Role,
    ) -> Result<User, WorklogError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(String::from(UserId::generate()))
        .bind(username)
        .bind(password.as_str())
        .bind(role.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let e = RepositoryError::from(e);
            if e.is_unique_violation() {
                WorklogError::from(ValidationError::new("user").invalid(
                    "username",
                    format!("Username `{username}` is already taken."),
                ))
            } else {
                WorklogError::from(e)
            }
        })?;

        Ok(row.into_user()?.0)
    }

    async fn upsert(
        &self,
        username: &str,
        password: &PasswordHash,
        role: Role,
    ) -> Result<User, WorklogError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(username) DO UPDATE
            SET password_hash = EXCLUDED.password_hash,
                role = EXCLUDED.role
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(String::from(UserId::generate()))
        .bind(username)
        .bind(password.as_str())
        .bind(role.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.into_user()?.0)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordHash)>, WorklogError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, WorklogError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        rows.into_iter()
            .map(|row| row.into_user().map(|(user, _)| user))
            .collect()
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<User>, WorklogError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET role = $2
            WHERE id = $1
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(id.as_str())
        .bind(role.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(UserRow::into_user).transpose()?.map(|(user, _)| user))
    }

    async fn store_token(
        &self,
        token: &AuthToken,
        user_id: &UserId,
        issued_at: OffsetDateTime,
    ) -> Result<(), WorklogError> {
        sqlx::query("INSERT INTO auth_tokens (token, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(token.as_str())
            .bind(user_id.as_str())
            .bind(issued_at)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn prune_tokens(
        &self,
        user_id: &UserId,
        keep: usize,
        issued_before: OffsetDateTime,
    ) -> Result<u64, WorklogError> {
        let expired = sqlx::query("DELETE FROM auth_tokens WHERE created_at < $1")
            .bind(issued_before)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?
            .rows_affected();

        let surplus = sqlx::query(
            r#"
            DELETE FROM auth_tokens
            WHERE user_id = $1
              AND token NOT IN (
                SELECT token FROM auth_tokens
                WHERE user_id = $1
                ORDER BY created_at DESC
                LIMIT $2
              )
            "#,
        )
        .bind(user_id.as_str())
        .bind(i64::try_from(keep).unwrap_or(i64::MAX))
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from)?
        .rows_affected();

        Ok(expired + surplus)
    }

    async fn user_for_token(
        &self,
        token: &AuthToken,
        issued_after: OffsetDateTime,
    ) -> Result<Option<User>, WorklogError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT users.id, users.username, users.password_hash, users.role
            FROM auth_tokens
            JOIN users ON auth_tokens.user_id = users.id
            WHERE auth_tokens.token = $1
              AND auth_tokens.created_at >= $2
            "#,
        )
        .bind(token.as_str())
        .bind(issued_after)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(row.map(UserRow::into_user).transpose()?.map(|(user, _)| user))
    }
}
