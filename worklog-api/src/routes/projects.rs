use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{
        ProjectBody, ProjectListBody, ProjectRequest, ProjectResponse, SuccessResponse,
    },
    app_state::AppState,
    auth::{AdminUser, AuthUser},
    domain::models::ProjectId,
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

#[instrument(name = "create_project", skip_all, fields(admin = %admin.id))]
async fn create_project(
    admin: AdminUser,
    State(app_state): State<AppState>,
    payload: Option<Json<ProjectRequest>>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(request) = payload.unwrap_or_default();

    app_state
        .project_service
        .create_project(request.project.into())
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

#[instrument(name = "list_projects", skip_all)]
async fn list_projects(
    _user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<ProjectListBody>, ApiError> {
    let projects = app_state.project_service.list_projects().await?;

    Ok(Json(ProjectListBody {
        projects: projects.into_iter().map(ProjectResponse::from).collect(),
    }))
}

#[instrument(name = "get_project", skip(_user, app_state))]
async fn get_project(
    _user: AuthUser,
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<ProjectBody>, ApiError> {
    let project = app_state
        .project_service
        .get_project(&ProjectId::new(id))
        .await?;

    Ok(Json(ProjectBody {
        project: project.into(),
    }))
}

#[instrument(name = "update_project", skip(admin, app_state, payload), fields(admin = %admin.id))]
async fn update_project(
    admin: AdminUser,
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    payload: Option<Json<ProjectRequest>>,
) -> Result<Json<ProjectBody>, ApiError> {
    let Json(request) = payload.unwrap_or_default();

    let project = app_state
        .project_service
        .update_project(&ProjectId::new(id), request.project.into())
        .await?;

    Ok(Json(ProjectBody {
        project: project.into(),
    }))
}

#[instrument(name = "delete_project", skip(admin, app_state), fields(admin = %admin.id))]
async fn delete_project(
    admin: AdminUser,
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<SuccessResponse>, ApiError> {
    app_state
        .project_service
        .delete_project(&ProjectId::new(id))
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
