use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::domain::{
    models::{AuthToken, Role, User, UserId},
    ports::outbound::UserRepository,
    PasswordHash, ValidationError, WorklogError,
};

struct Account {
    user: User,
    password: PasswordHash,
}

struct IssuedToken {
    user_id: UserId,
    issued_at: OffsetDateTime,
}

#[derive(Default)]
pub struct MemoryUserRepository {
    accounts: RwLock<Vec<Account>>,
    tokens: RwLock<HashMap<AuthToken, IssuedToken>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(
        &self,
        username: &str,
        password: &PasswordHash,
        role: Role,
    ) -> Result<User, WorklogError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.user.username == username) {
            return Err(ValidationError::new("user")
                .invalid("username", format!("Username `{username}` is already taken."))
                .into());
        }

        let user = User {
            id: UserId::generate(),
            username: username.to_string(),
            role,
        };
        accounts.push(Account {
            user: user.clone(),
            password: password.clone(),
        });
        Ok(user)
    }

    async fn upsert(
        &self,
        username: &str,
        password: &PasswordHash,
        role: Role,
    ) -> Result<User, WorklogError> {
        {
            let mut accounts = self.accounts.write().await;
            if let Some(account) = accounts.iter_mut().find(|a| a.user.username == username) {
                account.password = password.clone();
                account.user.role = role;
                return Ok(account.user.clone());
            }
        }

        self.insert(username, password, role).await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordHash)>, WorklogError> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .find(|a| a.user.username == username)
            .map(|a| (a.user.clone(), a.password.clone())))
    }

    async fn list(&self) -> Result<Vec<User>, WorklogError> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .map(|a| a.user.clone())
            .collect())
    }

    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<User>, WorklogError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts
            .iter_mut()
            .find(|a| &a.user.id == id)
            .map(|account| {
                account.user.role = role;
                account.user.clone()
            }))
    }

    async fn store_token(
        &self,
        token: &AuthToken,
        user_id: &UserId,
        issued_at: OffsetDateTime,
    ) -> Result<(), WorklogError> {
        self.tokens.write().await.insert(
            token.clone(),
            IssuedToken {
                user_id: user_id.clone(),
                issued_at,
            },
        );
        Ok(())
    }

    async fn prune_tokens(
        &self,
        user_id: &UserId,
        keep: usize,
        issued_before: OffsetDateTime,
    ) -> Result<u64, WorklogError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, issued| issued.issued_at >= issued_before);

        let mut owned: Vec<(AuthToken, OffsetDateTime)> = tokens
            .iter()
            .filter(|(_, issued)| &issued.user_id == user_id)
            .map(|(token, issued)| (token.clone(), issued.issued_at))
            .collect();
        owned.sort_by(|a, b| b.1.cmp(&a.1));
        for (token, _) in owned.into_iter().skip(keep) {
            tokens.remove(&token);
        }

        Ok((before - tokens.len()) as u64)
    }

    async fn user_for_token(
        &self,
        token: &AuthToken,
        issued_after: OffsetDateTime,
    ) -> Result<Option<User>, WorklogError> {
        let user_id = match self.tokens.read().await.get(token) {
            Some(issued) if issued.issued_at >= issued_after => issued.user_id.clone(),
            _ => return Ok(None),
        };

        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .find(|a| a.user.id == user_id)
            .map(|a| a.user.clone()))
    }
}
