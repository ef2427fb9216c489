use async_trait::async_trait;

use crate::domain::{
    models::{AuthToken, Role, User, UserDraft, UserId},
    WorklogError,
};

/// Inbound port for accounts and bearer tokens.
#[async_trait]
pub trait AuthService: Send + Sync + 'static {
    /// Check a username/password pair and issue a new token.
    async fn login(&self, username: &str, password: &str)
        -> Result<(User, AuthToken), WorklogError>;

    /// Resolve a bearer token to its user.
    async fn authenticate(&self, token: &AuthToken) -> Result<User, WorklogError>;

    /// Create a regular account and log it in.
    async fn register(&self, draft: UserDraft) -> Result<(User, AuthToken), WorklogError>;

    async fn list_users(&self) -> Result<Vec<User>, WorklogError>;

    /// Grant or revoke admin rights on an existing account.
    async fn set_role(&self, id: &UserId, role: Role) -> Result<User, WorklogError>;

    /// Make sure the service account exists as an admin with `password`.
    async fn ensure_system_user(&self, username: &str, password: &str)
        -> Result<User, WorklogError>;
}
