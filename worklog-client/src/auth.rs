use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WorklogURL;

/// Username of the service account used for internal calls.
pub const SYSTEM_USERNAME: &str = "system";

/// Where the system account's password comes from.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    Inline(String),
    /// A JSON file shaped like `{ "password": "..." }`, read on every login.
    File(PathBuf),
}

#[derive(Clone)]
pub struct SystemCredential {
    pub username: String,
    source: CredentialSource,
}

impl fmt::Debug for SystemCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            CredentialSource::Inline(_) => "inline([redacted])".to_string(),
            CredentialSource::File(path) => format!("file({})", path.display()),
        };
        f.debug_struct("SystemCredential")
            .field("username", &self.username)
            .field("source", &source)
            .finish()
    }
}

#[derive(Deserialize)]
struct CredentialFile {
    password: String,
}

impl SystemCredential {
    pub fn new(username: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            username: username.into(),
            source,
        }
    }

    pub fn inline(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(username, CredentialSource::Inline(password.into()))
    }

    pub fn from_file(username: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::new(username, CredentialSource::File(path.as_ref().to_path_buf()))
    }

    /// Resolve the password, reading the credential file if that is the source.
    pub async fn password(&self) -> Result<String, AuthError> {
        let password = match &self.source {
            CredentialSource::Inline(password) => password.clone(),
            CredentialSource::File(path) => {
                let raw = tokio::fs::read_to_string(path).await.map_err(|source| {
                    AuthError::CredentialFile {
                        path: path.clone(),
                        source,
                    }
                })?;
                let file: CredentialFile =
                    serde_json::from_str(&raw).map_err(|source| AuthError::MalformedCredential {
                        path: path.clone(),
                        source,
                    })?;
                file.password
            }
        };

        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        Ok(password)
    }
}

/// A bearer token returned by `POST /auth`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([redacted])")
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to read credential file {path}: {source}")]
    CredentialFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed credential file {path}: {source}")]
    MalformedCredential {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("system credential has no password")]
    MissingPassword,
    #[error("login request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("login rejected with status {0}")]
    Rejected(StatusCode),
    #[error("login response did not contain a token")]
    MissingToken,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Performs the password login against the service's own `/auth` endpoint.
pub struct AuthClient {
    http: Client,
    base_url: WorklogURL,
    credential: SystemCredential,
}

impl AuthClient {
    pub fn new(http: Client, base_url: WorklogURL, credential: SystemCredential) -> Self {
        Self {
            http,
            base_url,
            credential,
        }
    }

    pub async fn login(&self) -> Result<Token, AuthError> {
        let password = self.credential.password().await?;
        let url = self.base_url.append_path("/auth");

        let resp = self
            .http
            .post(url.as_ref())
            .json(&LoginRequest {
                username: &self.credential.username,
                password: &password,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AuthError::Rejected(resp.status()));
        }

        let body: LoginResponse = resp.json().await?;
        match body.token {
            Some(token) if !token.is_empty() => {
                tracing::debug!(username = %self.credential.username, "system login succeeded");
                Ok(Token(token))
            }
            _ => Err(AuthError::MissingToken),
        }
    }
}
