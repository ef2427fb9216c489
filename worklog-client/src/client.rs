use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{ProjectDocument, ProjectEnvelope, Token, WorklogURL};

/// Reads and writes projects through the worklog HTTP API on behalf of an
/// already authenticated caller.
pub struct ProjectClient {
    http: Client,
    base_url: WorklogURL,
}

impl ProjectClient {
    pub fn new(http: Client, base_url: WorklogURL) -> Self {
        Self { http, base_url }
    }

    fn project_url(&self, project_id: &str) -> WorklogURL {
        self.base_url
            .append_path("/projects")
            .append_segment(project_id)
    }

    /// Fetch a single project. `Ok(None)` means the server answered 404.
    ///
    /// An empty id or token short-circuits to `Ok(None)` without touching the network.
    pub async fn fetch_project(
        &self,
        project_id: &str,
        token: &Token,
    ) -> Result<Option<ProjectDocument>, ClientError> {
        if project_id.is_empty() || token.is_empty() {
            return Ok(None);
        }

        let resp = self
            .http
            .get(self.project_url(project_id).as_ref())
            .bearer_auth(token.as_str())
            .send()
            .await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
            status if !status.is_success() => Err(ClientError::Status(status)),
            _ => {
                let envelope = resp
                    .json::<ProjectEnvelope<ProjectDocument>>()
                    .await
                    .map_err(|e| ClientError::Parsing(e.to_string()))?;
                Ok(Some(envelope.project))
            }
        }
    }

    /// Replace the project on the server with `project` (PUT semantics).
    pub async fn update_project(
        &self,
        project: &ProjectDocument,
        token: &Token,
    ) -> Result<ProjectDocument, ClientError> {
        if token.is_empty() {
            return Err(ClientError::Unauthorized);
        }

        let resp = self
            .http
            .put(self.project_url(&project.id).as_ref())
            .bearer_auth(token.as_str())
            .json(&ProjectEnvelope { project })
            .send()
            .await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::CONFLICT => Err(ClientError::Conflict),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
            status if !status.is_success() => Err(ClientError::Status(status)),
            _ => {
                let envelope = resp
                    .json::<ProjectEnvelope<ProjectDocument>>()
                    .await
                    .map_err(|e| ClientError::Parsing(e.to_string()))?;
                Ok(envelope.project)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Project not found")]
    NotFound,
    #[error("Project was modified concurrently")]
    Conflict,
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
    #[error("RequestError: {0}")]
    Request(#[from] reqwest::Error),
    #[error("ParsingError: {0}")]
    Parsing(String),
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::test_support::spawn_stub;

    fn project_router() -> Router {
        Router::new().route(
            "/projects/:id",
            get(|Path(id): Path<String>, headers: HeaderMap| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer tok");
                if !authorized {
                    return Err(StatusCode::UNAUTHORIZED);
                }
                if id != "p1" {
                    return Err(StatusCode::NOT_FOUND);
                }
                Ok(Json(json!({
                    "project": {
                        "_id": "p1",
                        "title": "Roads",
                        "contributors": ["u1"],
                        "projectWork": [],
                        "version": 3
                    }
                })))
            })
            .put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                match body["project"]["version"].as_u64() {
                    Some(3) | None => {
                        let mut project = body["project"].clone();
                        project["_id"] = Value::String(id);
                        project["version"] = json!(4);
                        Ok(Json(json!({ "project": project })))
                    }
                    Some(_) => Err(StatusCode::CONFLICT),
                }
            }),
        )
    }

    #[tokio::test]
    async fn empty_inputs_short_circuit_without_network() {
        // Nothing listens on the discard port; a request would fail.
        let client = ProjectClient::new(Client::new(), WorklogURL::new("http://127.0.0.1:9"));

        assert!(client
            .fetch_project("", &Token::new("tok"))
            .await
            .unwrap()
            .is_none());
        assert!(client
            .fetch_project("p1", &Token::new(""))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn fetch_returns_project() {
        let base = spawn_stub(project_router()).await;
        let client = ProjectClient::new(Client::new(), WorklogURL::new(base));

        let project = client
            .fetch_project("p1", &Token::new("tok"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(project.title, "Roads");
        assert_eq!(project.contributors, vec!["u1".to_string()]);
        assert_eq!(project.version, Some(3));
    }

    #[tokio::test]
    async fn fetch_unknown_project_is_none() {
        let base = spawn_stub(project_router()).await;
        let client = ProjectClient::new(Client::new(), WorklogURL::new(base));

        let project = client
            .fetch_project("missing", &Token::new("tok"))
            .await
            .unwrap();
        assert!(project.is_none());
    }

    #[tokio::test]
    async fn fetch_with_bad_token_is_unauthorized() {
        let base = spawn_stub(project_router()).await;
        let client = ProjectClient::new(Client::new(), WorklogURL::new(base));

        let err = client
            .fetch_project("p1", &Token::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[tokio::test]
    async fn update_returns_stored_project() {
        let base = spawn_stub(project_router()).await;
        let client = ProjectClient::new(Client::new(), WorklogURL::new(base));

        let doc = ProjectDocument {
            id: "p1".to_string(),
            title: "Roads".to_string(),
            project_work: vec!["w1".to_string()],
            version: Some(3),
            ..Default::default()
        };

        let stored = client.update_project(&doc, &Token::new("tok")).await.unwrap();
        assert_eq!(stored.project_work, vec!["w1".to_string()]);
        assert_eq!(stored.version, Some(4));
    }

    #[tokio::test]
    async fn stale_update_is_a_conflict() {
        let base = spawn_stub(project_router()).await;
        let client = ProjectClient::new(Client::new(), WorklogURL::new(base));

        let doc = ProjectDocument {
            id: "p1".to_string(),
            title: "Roads".to_string(),
            version: Some(1),
            ..Default::default()
        };

        let err = client
            .update_project(&doc, &Token::new("tok"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Conflict));
    }
}
