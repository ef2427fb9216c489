//! HTTP request bodies.
//!
//! Every field is optional on the wire; presence rules are enforced by the
//! domain so that a missing field yields the same validation message whether
//! it was omitted or sent empty.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::domain::models::{
    LoggedWorkDraft, LoggedWorkId, ProjectChanges, ProjectDraft, UserDraft, UserId,
};

/// `{ "project": { ... } }`
#[derive(Debug, Default, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub project: ProjectPayload,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub title: Option<String>,
    pub project_lead: Option<String>,
    pub brief_content: Option<String>,
    pub extended_content: Option<String>,
    pub project_contact: Option<String>,
    pub contributors: Option<Vec<UserId>>,
    pub project_work: Option<Vec<LoggedWorkId>>,
    pub types_of_work: Option<Vec<String>>,
    /// Only honored on updates.
    pub version: Option<u64>,
}

impl From<ProjectPayload> for ProjectDraft {
    fn from(payload: ProjectPayload) -> Self {
        Self {
            title: payload.title,
            project_lead: payload.project_lead,
            brief_content: payload.brief_content,
            extended_content: payload.extended_content,
            project_contact: payload.project_contact,
            contributors: payload.contributors.unwrap_or_default(),
            project_work: payload.project_work.unwrap_or_default(),
            types_of_work: payload.types_of_work.unwrap_or_default(),
        }
    }
}

impl From<ProjectPayload> for ProjectChanges {
    fn from(payload: ProjectPayload) -> Self {
        Self {
            title: payload.title,
            project_lead: payload.project_lead,
            brief_content: payload.brief_content,
            extended_content: payload.extended_content,
            project_contact: payload.project_contact,
            contributors: payload.contributors,
            project_work: payload.project_work,
            types_of_work: payload.types_of_work,
            expected_version: payload.version,
        }
    }
}

/// `{ "loggedWork": { ... } }`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedWorkRequest {
    #[serde(default)]
    pub logged_work: LoggedWorkPayload,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedWorkPayload {
    pub user: Option<String>,
    pub type_of_work: Option<String>,
    pub project: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    pub details: Option<String>,
    pub hours: Option<f64>,
}

impl From<LoggedWorkPayload> for LoggedWorkDraft {
    fn from(payload: LoggedWorkPayload) -> Self {
        Self {
            user: payload.user,
            type_of_work: payload.type_of_work,
            project: payload.project,
            start_time: payload.start_time,
            end_time: payload.end_time,
            details: payload.details,
            hours: payload.hours,
        }
    }
}

#[derive(Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// `{ "user": { "username": ..., "password": ... } }`
#[derive(Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub user: UserPayload,
}

#[derive(Default, Deserialize)]
pub struct UserPayload {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// `{ "user": { "role": "admin" } }`
#[derive(Debug, Default, Deserialize)]
pub struct RoleRequest {
    #[serde(default)]
    pub user: RolePayload,
}

#[derive(Debug, Default, Deserialize)]
pub struct RolePayload {
    pub role: Option<String>,
}

impl From<UserPayload> for UserDraft {
    fn from(payload: UserPayload) -> Self {
        Self {
            username: payload.username,
            password: payload.password,
        }
    }
}
