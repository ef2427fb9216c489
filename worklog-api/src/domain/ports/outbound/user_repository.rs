//! Account and token store port (outbound).

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{AuthToken, Role, User, UserId},
    PasswordHash, WorklogError,
};

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Store a new account. A taken username is a validation error.
    async fn insert(
        &self,
        username: &str,
        password: &PasswordHash,
        role: Role,
    ) -> Result<User, WorklogError>;

    /// Create the account or overwrite its password and role.
    async fn upsert(
        &self,
        username: &str,
        password: &PasswordHash,
        role: Role,
    ) -> Result<User, WorklogError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordHash)>, WorklogError>;

    async fn list(&self) -> Result<Vec<User>, WorklogError>;

    /// Change an account's role. `None` when no such account exists.
    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<User>, WorklogError>;

    async fn store_token(
        &self,
        token: &AuthToken,
        user_id: &UserId,
        issued_at: OffsetDateTime,
    ) -> Result<(), WorklogError>;

    /// Drop every token issued before `issued_before`, then all but the
    /// `keep` newest tokens of `user_id`. Returns how many were removed.
    async fn prune_tokens(
        &self,
        user_id: &UserId,
        keep: usize,
        issued_before: OffsetDateTime,
    ) -> Result<u64, WorklogError>;

    /// Resolve a token issued at or after `issued_after`.
    async fn user_for_token(
        &self,
        token: &AuthToken,
        issued_after: OffsetDateTime,
    ) -> Result<Option<User>, WorklogError>;
}
