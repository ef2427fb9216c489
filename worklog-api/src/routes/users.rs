use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{
        RegisterRequest, RoleRequest, SessionResponse, UserBody, UserListBody, UserResponse,
    },
    app_state::AppState,
    auth::AdminUser,
    domain::{
        models::{Role, UserId},
        WorklogError,
    },
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register))
        .route("/:id", put(set_role))
}

#[instrument(name = "register", skip_all)]
async fn register(
    State(app_state): State<AppState>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(request) = payload.unwrap_or_default();

    let session = app_state.auth_service.register(request.user.into()).await?;

    Ok(Json(session.into()))
}

#[instrument(name = "list_users", skip_all)]
async fn list_users(
    _admin: AdminUser,
    State(app_state): State<AppState>,
) -> Result<Json<UserListBody>, ApiError> {
    let users = app_state.auth_service.list_users().await?;

    Ok(Json(UserListBody {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

#[instrument(name = "set_role", skip_all, fields(admin = %admin.id, user_id = %id))]
async fn set_role(
    admin: AdminUser,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<RoleRequest>>,
) -> Result<Json<UserBody>, ApiError> {
    let Json(request) = payload.unwrap_or_default();
    let role = Role::from_input(request.user.role.as_deref()).map_err(WorklogError::from)?;

    let user = app_state
        .auth_service
        .set_role(&UserId::new(id), role)
        .await?;

    Ok(Json(UserBody { user: user.into() }))
}
