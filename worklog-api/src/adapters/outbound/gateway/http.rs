use async_trait::async_trait;
use worklog_client::{AuthClient, ClientError, ProjectClient, Token};

use super::conversions::{to_document, to_domain_project};
use crate::domain::{
    models::{Project, ProjectId, SyncAuthorization, SyncFailure},
    ports::outbound::ProjectGateway,
};

/// Reaches projects through the service's own HTTP API, logged in as the
/// system user.
pub struct HttpProjectGateway {
    auth: AuthClient,
    projects: ProjectClient,
}

impl HttpProjectGateway {
    pub fn new(auth: AuthClient, projects: ProjectClient) -> Self {
        Self { auth, projects }
    }
}

fn bearer(authorization: &SyncAuthorization) -> Option<Token> {
    match authorization {
        SyncAuthorization::Bearer(token) if !token.is_empty() => Some(Token::new(token.as_str())),
        _ => None,
    }
}

#[async_trait]
impl ProjectGateway for HttpProjectGateway {
    async fn authorize(&self) -> Result<SyncAuthorization, SyncFailure> {
        let token = self
            .auth
            .login()
            .await
            .map_err(|e| SyncFailure::Auth(e.to_string()))?;

        Ok(SyncAuthorization::Bearer(token.as_str().to_string()))
    }

    async fn fetch_project(
        &self,
        id: &ProjectId,
        authorization: &SyncAuthorization,
    ) -> Option<Project> {
        let token = bearer(authorization)?;

        match self.projects.fetch_project(id.as_str(), &token).await {
            Ok(doc) => doc.map(to_domain_project),
            Err(e) => {
                tracing::warn!(project_id = %id, error = %e, "failed to fetch project");
                None
            }
        }
    }

    async fn push_project(
        &self,
        project: &Project,
        authorization: &SyncAuthorization,
        expected_version: Option<u64>,
    ) -> Result<(), SyncFailure> {
        let token = bearer(authorization).ok_or(SyncFailure::InvalidInput)?;
        let doc = to_document(project, expected_version);

        match self.projects.update_project(&doc, &token).await {
            Ok(_) => Ok(()),
            Err(ClientError::Conflict) => Err(SyncFailure::Conflict),
            Err(ClientError::NotFound) => Err(SyncFailure::ProjectNotFound(project.id.clone())),
            Err(e) => Err(SyncFailure::Rejected(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    };

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use worklog_client::{SystemCredential, WorklogURL};

    use super::*;
    use crate::domain::models::{LoggedWorkId, UserId};

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn gateway(base_url: &str, password: &str) -> HttpProjectGateway {
        let http = reqwest::Client::new();
        let base_url = WorklogURL::new(base_url);
        HttpProjectGateway::new(
            AuthClient::new(
                http.clone(),
                base_url.clone(),
                SystemCredential::inline("system", password),
            ),
            ProjectClient::new(http, base_url),
        )
    }

    /// A tiny stand-in for the project API that enforces `version`.
    fn stub_api(version: Arc<AtomicU64>) -> Router {
        Router::new()
            .route(
                "/auth",
                post(|Json(body): Json<Value>| async move {
                    if body["password"] == "pw" {
                        Ok(Json(json!({ "token": "tok" })))
                    } else {
                        Err(StatusCode::UNAUTHORIZED)
                    }
                }),
            )
            .route(
                "/projects/:id",
                get(
                    |State(version): State<Arc<AtomicU64>>, Path(id): Path<String>| async move {
                        if id != "p1" {
                            return Err(StatusCode::NOT_FOUND);
                        }
                        Ok(Json(json!({ "project": {
                            "_id": "p1",
                            "title": "Roads",
                            "version": version.load(Ordering::SeqCst),
                        }})))
                    },
                )
                .put(
                    |State(version): State<Arc<AtomicU64>>, Json(body): Json<Value>| async move {
                        let current = version.load(Ordering::SeqCst);
                        if let Some(expected) = body["project"]["version"].as_u64() {
                            if expected != current {
                                return Err(StatusCode::CONFLICT);
                            }
                        }
                        version.store(current + 1, Ordering::SeqCst);
                        let mut project = body["project"].clone();
                        project["version"] = json!(current + 1);
                        Ok(Json(json!({ "project": project })))
                    },
                ),
            )
            .with_state(version)
    }

    #[tokio::test]
    async fn logs_in_fetches_and_pushes() {
        let base_url = spawn(stub_api(Arc::new(AtomicU64::new(2)))).await;
        let gateway = gateway(&base_url, "pw");

        let auth = gateway.authorize().await.unwrap();
        let mut project = gateway
            .fetch_project(&ProjectId::new("p1"), &auth)
            .await
            .unwrap();
        assert_eq!(project.version, 2);

        project.record_contribution(&UserId::new("u1"), &LoggedWorkId::new("w1"));
        gateway
            .push_project(&project, &auth, Some(project.version))
            .await
            .unwrap();

        let err = gateway
            .push_project(&project, &auth, Some(project.version))
            .await
            .unwrap_err();
        assert_eq!(err, SyncFailure::Conflict);
    }

    #[tokio::test]
    async fn wrong_password_is_an_auth_failure() {
        let base_url = spawn(stub_api(Arc::new(AtomicU64::new(0)))).await;

        let err = gateway(&base_url, "nope").authorize().await.unwrap_err();
        assert!(matches!(err, SyncFailure::Auth(_)));
    }

    #[tokio::test]
    async fn unknown_project_fetches_as_none() {
        let base_url = spawn(stub_api(Arc::new(AtomicU64::new(0)))).await;
        let gateway = gateway(&base_url, "pw");
        let auth = gateway.authorize().await.unwrap();

        assert!(gateway
            .fetch_project(&ProjectId::new("bogus"), &auth)
            .await
            .is_none());
        assert!(gateway
            .fetch_project(&ProjectId::new("p1"), &SyncAuthorization::InProcess)
            .await
            .is_none());
    }
}
