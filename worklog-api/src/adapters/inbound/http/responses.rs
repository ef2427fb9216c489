//! HTTP response bodies.
//!
//! Records are rendered in camelCase with their identifier under `_id`.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::models::{AuthToken, LoggedWork, Project, User};

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub project_lead: Option<String>,
    pub brief_content: Option<String>,
    pub extended_content: Option<String>,
    pub project_contact: Option<String>,
    pub contributors: Vec<String>,
    pub project_work: Vec<String>,
    pub types_of_work: Vec<String>,
    pub version: u64,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.into(),
            title: project.title,
            project_lead: project.project_lead,
            brief_content: project.brief_content,
            extended_content: project.extended_content,
            project_contact: project.project_contact,
            contributors: project.contributors.into_iter().map(String::from).collect(),
            project_work: project.project_work.into_iter().map(String::from).collect(),
            types_of_work: project.types_of_work,
            version: project.version,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectBody {
    pub project: ProjectResponse,
}

#[derive(Debug, Serialize)]
pub struct ProjectListBody {
    pub projects: Vec<ProjectResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedWorkResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub type_of_work: Option<String>,
    pub project: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    pub details: Option<String>,
    pub hours: Option<f64>,
}

impl From<LoggedWork> for LoggedWorkResponse {
    fn from(work: LoggedWork) -> Self {
        Self {
            id: work.id.into(),
            user: work.user,
            type_of_work: work.type_of_work,
            project: work.project.into(),
            start_time: work.start_time,
            end_time: work.end_time,
            details: work.details,
            hours: work.hours,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedWorkBody {
    pub logged_work: LoggedWorkResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedWorkListBody {
    pub logged_work: Vec<LoggedWorkResponse>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username,
            role: user.role.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserListBody {
    pub users: Vec<UserResponse>,
}

/// Returned by both login and sign-up.
#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<(User, AuthToken)> for SessionResponse {
    fn from((user, token): (User, AuthToken)) -> Self {
        Self {
            token: token.as_str().to_string(),
            user: user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::models::{NewProject, ProjectId, UserId};

    #[test]
    fn project_renders_with_underscore_id() {
        let mut project = NewProject::new("Roads").into_project(ProjectId::new("p1"));
        project.contributors.push(UserId::new("u1"));

        let value = serde_json::to_value(ProjectResponse::from(project)).unwrap();

        assert_eq!(value["_id"], json!("p1"));
        assert_eq!(value["contributors"], json!(["u1"]));
        assert_eq!(value["projectWork"], json!([]));
        assert_eq!(value["version"], json!(0));
    }
}
