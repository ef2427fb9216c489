//! Composition root: picks concrete stores and gateways from settings and
//! wires them into the services behind [`AppState`].

use std::sync::Arc;

use axum::Router;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use worklog_client::{AuthClient, ProjectClient, WorklogURL};

use crate::{
    adapters::outbound::{
        gateway::{HttpProjectGateway, StoreProjectGateway},
        memory::{MemoryLoggedWorkRepository, MemoryProjectRepository, MemoryUserRepository},
        postgres::{PostgresLoggedWorkRepository, PostgresProjectRepository, PostgresUserRepository},
    },
    app_state::AppState,
    config::{DatabaseBackend, DatabaseSettings, Settings, SyncMode, SystemUserSettings},
    domain::{
        ports::{
            inbound::AuthService,
            outbound::{LoggedWorkRepository, ProjectGateway, ProjectRepository, UserRepository},
        },
        services::{
            AuthServiceImpl, ContributorSynchronizer, LoggedWorkServiceImpl, ProjectServiceImpl,
        },
    },
    router,
};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("invalid application base_url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("sync mode `http` needs a system user password or credential file")]
    MissingSystemCredential,
}

/// The three record stores, behind their ports.
#[derive(Clone)]
pub struct Stores {
    pub projects: Arc<dyn ProjectRepository>,
    pub logged_work: Arc<dyn LoggedWorkRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            projects: Arc::new(MemoryProjectRepository::new()),
            logged_work: Arc::new(MemoryLoggedWorkRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
            logged_work: Arc::new(PostgresLoggedWorkRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool)),
        }
    }

    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StartupError> {
        match settings.backend {
            DatabaseBackend::Memory => {
                tracing::warn!("using in-memory stores, data is lost on restart");
                Ok(Self::in_memory())
            }
            DatabaseBackend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .connect_with(settings.with_db())
                    .await?;
                sqlx::migrate!("./migrations").run(&pool).await?;

                Ok(Self::postgres(pool))
            }
        }
    }
}

fn build_gateway(
    settings: &Settings,
    projects: Arc<dyn ProjectRepository>,
) -> Result<Arc<dyn ProjectGateway>, StartupError> {
    match settings.sync.mode {
        SyncMode::InProcess => Ok(Arc::new(StoreProjectGateway::new(projects))),
        SyncMode::Http => {
            let credential = settings
                .system_user
                .credential()
                .ok_or(StartupError::MissingSystemCredential)?;
            let http = reqwest::Client::builder()
                .timeout(settings.sync.request_timeout())
                .build()?;
            let base_url = url::Url::parse(&settings.application.base_url())?;
            let base_url = WorklogURL::new(base_url.as_str());

            tracing::info!(base_url = %base_url.as_ref(), "synchronizing projects over HTTP");
            Ok(Arc::new(HttpProjectGateway::new(
                AuthClient::new(http.clone(), base_url.clone(), credential),
                ProjectClient::new(http, base_url),
            )))
        }
    }
}

pub fn build_state(settings: &Settings, stores: Stores) -> Result<AppState, StartupError> {
    let gateway = build_gateway(settings, stores.projects.clone())?;
    let synchronizer = ContributorSynchronizer::new(gateway, settings.sync.policy());

    Ok(AppState::new(
        Arc::new(ProjectServiceImpl::new(stores.projects)),
        Arc::new(LoggedWorkServiceImpl::new(stores.logged_work, synchronizer)),
        Arc::new(AuthServiceImpl::with_token_policy(
            stores.users,
            settings.auth.token_policy(),
        )),
    ))
}

/// Make sure the system user exists as an admin with the configured password.
///
/// An unreadable credential is not fatal: the service still starts, and
/// HTTP-mode synchronization degrades until the credential is fixed.
pub async fn seed_system_user(auth: &dyn AuthService, settings: &SystemUserSettings) {
    let Some(credential) = settings.credential() else {
        tracing::warn!("no system user credential configured, skipping seed");
        return;
    };

    let password = match credential.password().await {
        Ok(password) => password,
        Err(e) => {
            tracing::warn!(error = %e, "system user credential unavailable, skipping seed");
            return;
        }
    };

    if let Err(e) = auth
        .ensure_system_user(&credential.username, &password)
        .await
    {
        tracing::error!(error = %e, "failed to seed system user");
    }
}

/// Build the complete application from settings.
pub async fn assemble(settings: &Settings) -> Result<Router, StartupError> {
    let stores = Stores::connect(&settings.database).await?;
    let state = build_state(settings, stores)?;

    seed_system_user(state.auth_service.as_ref(), &settings.system_user).await;

    Ok(router::create(
        state,
        settings.application.app_url.as_deref(),
    ))
}
