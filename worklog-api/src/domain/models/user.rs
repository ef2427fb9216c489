use std::fmt;

use std::str::FromStr;

use strum::{Display, EnumString};
use time::Duration;

use super::UserId;
use crate::domain::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Role {
    #[strum(ascii_case_insensitive, serialize = "admin")]
    Admin,
    #[strum(ascii_case_insensitive, serialize = "user")]
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl Role {
    /// Parse a role sent by a client, rejecting anything that is not a known role.
    pub fn from_input(value: Option<&str>) -> Result<Self, ValidationError> {
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        let Some(value) = value else {
            return Err(ValidationError::new("user").required("role"));
        };

        Self::from_str(value).map_err(|_| {
            ValidationError::new("user").invalid(
                "role",
                format!("`{value}` is not a valid enum value for path `role`."),
            )
        })
    }
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Opaque bearer token handed out by a successful login.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([redacted])")
    }
}

/// How long bearer tokens stay valid and how many each user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    pub ttl: Duration,
    /// Older tokens beyond this count are dropped when a new one is issued.
    pub max_per_user: usize,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(12),
            max_per_user: 5,
        }
    }
}

/// Unvalidated sign-up input.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Validated sign-up input. The password is still in clear text here.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl TryFrom<UserDraft> for NewUser {
    type Error = ValidationError;

    fn try_from(draft: UserDraft) -> Result<Self, Self::Error> {
        let username = draft.username.filter(|u| !u.trim().is_empty());
        let password = draft.password.filter(|p| !p.is_empty());

        let mut errors = ValidationError::new("user");
        if username.is_none() {
            errors = errors.required("username");
        }
        if password.is_none() {
            errors = errors.required("password");
        }

        match (username, password) {
            (Some(username), Some(password)) => Ok(Self {
                username: username.trim().to_string(),
                password,
            }),
            _ => Err(errors),
        }
    }
}
