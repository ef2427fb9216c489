use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{AuthToken, NewUser, Role, TokenPolicy, User, UserDraft, UserId},
    ports::{inbound::AuthService, outbound::UserRepository},
    PasswordHash, WorklogError,
};

/// Implementation of the AuthService inbound port.
pub struct AuthServiceImpl<U: ?Sized> {
    users: Arc<U>,
    tokens: TokenPolicy,
}

impl<U: ?Sized> AuthServiceImpl<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self::with_token_policy(users, TokenPolicy::default())
    }

    pub fn with_token_policy(users: Arc<U>, tokens: TokenPolicy) -> Self {
        Self { users, tokens }
    }
}

impl<U: UserRepository + ?Sized> AuthServiceImpl<U> {
    /// Store a fresh token and drop the user's expired and surplus ones, so
    /// the token store stays bounded however often a user logs in.
    async fn issue_token(&self, user: &User) -> Result<AuthToken, WorklogError> {
        let token = AuthToken::generate();
        let now = OffsetDateTime::now_utc();
        self.users.store_token(&token, &user.id, now).await?;

        let pruned = self
            .users
            .prune_tokens(&user.id, self.tokens.max_per_user, now - self.tokens.ttl)
            .await?;
        if pruned > 0 {
            tracing::debug!(user_id = %user.id, pruned, "dropped old tokens");
        }

        Ok(token)
    }
}

#[async_trait]
impl<U: UserRepository + ?Sized> AuthService for AuthServiceImpl<U> {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, AuthToken), WorklogError> {
        let Some((user, hash)) = self.users.find_by_username(username.trim()).await? else {
            tracing::debug!(username, "login for unknown user");
            return Err(WorklogError::InvalidCredentials);
        };

        if !hash.verify(password) {
            tracing::debug!(username, "login with wrong password");
            return Err(WorklogError::InvalidCredentials);
        }

        let token = self.issue_token(&user).await?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok((user, token))
    }

    async fn authenticate(&self, token: &AuthToken) -> Result<User, WorklogError> {
        if token.as_str().is_empty() {
            return Err(WorklogError::Unauthenticated);
        }

        self.users
            .user_for_token(token, OffsetDateTime::now_utc() - self.tokens.ttl)
            .await?
            .ok_or(WorklogError::Unauthenticated)
    }

    async fn register(&self, draft: UserDraft) -> Result<(User, AuthToken), WorklogError> {
        let new_user = NewUser::try_from(draft)?;
        let hash = PasswordHash::hash(&new_user.password);
        let user = self
            .users
            .insert(&new_user.username, &hash, Role::User)
            .await?;

        let token = self.issue_token(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok((user, token))
    }

    async fn list_users(&self) -> Result<Vec<User>, WorklogError> {
        self.users.list().await
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<User, WorklogError> {
        let user = self
            .users
            .set_role(id, role)
            .await?
            .ok_or_else(|| WorklogError::not_found(format!("user {id}")))?;

        tracing::info!(user_id = %user.id, %role, "user role changed");
        Ok(user)
    }

    async fn ensure_system_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, WorklogError> {
        let hash = PasswordHash::hash(password);
        let user = self.users.upsert(username, &hash, Role::Admin).await?;

        tracing::info!(user_id = %user.id, username, "system user ready");
        Ok(user)
    }
}
