use std::{path::PathBuf, str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};
use worklog_client::SystemCredential;

use crate::domain::models::{SyncPolicy, TokenPolicy};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub sync: SyncSettings,
    pub system_user: SystemUserSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Where this service can reach its own HTTP API. Defaults to
    /// `http://{host}:{port}`.
    pub base_url: Option<String>,
    /// Frontend origin allowed by CORS.
    pub app_url: Option<String>,
}

impl ApplicationSettings {
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseBackend {
    Memory,
    Postgres,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub backend: DatabaseBackend,
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

/// How the contributor synchronizer reaches projects.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Straight through the project store.
    InProcess,
    /// Through this service's own HTTP API, logged in as the system user.
    Http,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SyncSettings {
    pub mode: SyncMode,
    pub optimistic_concurrency: bool,
    pub max_attempts: u32,
    pub request_timeout_secs: u64,
}

impl SyncSettings {
    pub fn policy(&self) -> SyncPolicy {
        SyncPolicy {
            optimistic_concurrency: self.optimistic_concurrency,
            max_attempts: self.max_attempts,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Bearer token lifetime and per-user cap.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AuthSettings {
    pub token_ttl_hours: i64,
    pub max_tokens_per_user: usize,
}

impl Default for AuthSettings {
    fn default() -> Self {
        let policy = TokenPolicy::default();
        Self {
            token_ttl_hours: policy.ttl.whole_hours(),
            max_tokens_per_user: policy.max_per_user,
        }
    }
}

impl AuthSettings {
    pub fn token_policy(&self) -> TokenPolicy {
        TokenPolicy {
            ttl: time::Duration::hours(self.token_ttl_hours),
            max_per_user: self.max_tokens_per_user.max(1),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct SystemUserSettings {
    pub username: String,
    pub password: Option<String>,
    pub credential_file: Option<PathBuf>,
}

impl std::fmt::Debug for SystemUserSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemUserSettings")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("credential_file", &self.credential_file)
            .finish()
    }
}

impl SystemUserSettings {
    /// An inline password wins over the credential file.
    pub fn credential(&self) -> Option<SystemCredential> {
        match (&self.password, &self.credential_file) {
            (Some(password), _) => Some(SystemCredential::inline(&self.username, password)),
            (None, Some(path)) => Some(SystemCredential::from_file(&self.username, path)),
            (None, None) => None,
        }
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no current directory: {e}")))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("Failed to parse APP_ENVIRONMENT: {e}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .set_default(
            "system_user.credential_file",
            config_directory
                .join(format!("system-user-{environment}.json"))
                .to_string_lossy()
                .into_owned(),
        )?
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("WORKLOG")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_user(password: Option<&str>, file: Option<&str>) -> SystemUserSettings {
        SystemUserSettings {
            username: "system".to_string(),
            password: password.map(String::from),
            credential_file: file.map(PathBuf::from),
        }
    }

    #[tokio::test]
    async fn inline_password_wins_over_file() {
        let credential = system_user(Some("pw"), Some("missing.json"))
            .credential()
            .unwrap();
        assert_eq!(credential.username, "system");
        assert_eq!(credential.password().await.unwrap(), "pw");
    }

    #[test]
    fn no_password_source_means_no_credential() {
        assert!(system_user(None, None).credential().is_none());
        assert!(system_user(None, Some("creds.json")).credential().is_some());
    }

    #[test]
    fn base_url_defaults_to_bind_address() {
        let app = ApplicationSettings {
            port: 8080,
            host: "127.0.0.1".to_string(),
            base_url: None,
            app_url: None,
        };
        assert_eq!(app.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn auth_settings_default_to_the_token_policy() {
        assert_eq!(AuthSettings::default().token_policy(), TokenPolicy::default());

        let settings = AuthSettings {
            token_ttl_hours: 1,
            max_tokens_per_user: 0,
        };
        assert_eq!(settings.token_policy().max_per_user, 1);
    }

    #[test]
    fn environment_parses_case_insensitively() {
        assert!(matches!(
            Environment::from_str("PRODUCTION").unwrap(),
            Environment::Production
        ));
        assert!(Environment::from_str("staging").is_err());
    }
}
