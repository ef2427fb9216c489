use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{
        LoggedWorkBody, LoggedWorkListBody, LoggedWorkRequest, LoggedWorkResponse,
        SuccessResponse,
    },
    app_state::AppState,
    auth::AuthUser,
    domain::models::LoggedWorkId,
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_logged_work).post(create_logged_work))
        .route(
            "/:id",
            get(get_logged_work)
                .put(update_logged_work)
                .delete(delete_logged_work),
        )
}

/// Stores the entry and synchronizes its project. The response does not
/// depend on whether the synchronization landed.
#[instrument(name = "create_logged_work", skip_all, fields(user = %user.id))]
async fn create_logged_work(
    user: AuthUser,
    State(app_state): State<AppState>,
    payload: Option<Json<LoggedWorkRequest>>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(request) = payload.unwrap_or_default();

    app_state
        .logged_work_service
        .create_logged_work(&user.id, request.logged_work.into())
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

#[instrument(name = "list_logged_work", skip_all)]
async fn list_logged_work(
    State(app_state): State<AppState>,
) -> Result<Json<LoggedWorkListBody>, ApiError> {
    let entries = app_state.logged_work_service.list_logged_work().await?;

    Ok(Json(LoggedWorkListBody {
        logged_work: entries.into_iter().map(LoggedWorkResponse::from).collect(),
    }))
}

#[instrument(name = "get_logged_work", skip(app_state))]
async fn get_logged_work(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<LoggedWorkBody>, ApiError> {
    let work = app_state
        .logged_work_service
        .get_logged_work(&LoggedWorkId::new(id))
        .await?;

    Ok(Json(LoggedWorkBody {
        logged_work: work.into(),
    }))
}

#[instrument(name = "update_logged_work", skip(user, app_state, payload), fields(user = %user.id))]
async fn update_logged_work(
    user: AuthUser,
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    payload: Option<Json<LoggedWorkRequest>>,
) -> Result<Json<LoggedWorkBody>, ApiError> {
    let Json(request) = payload.unwrap_or_default();

    let work = app_state
        .logged_work_service
        .update_logged_work(&LoggedWorkId::new(id), request.logged_work.into())
        .await?;

    Ok(Json(LoggedWorkBody {
        logged_work: work.into(),
    }))
}

#[instrument(name = "delete_logged_work", skip(user, app_state), fields(user = %user.id))]
async fn delete_logged_work(
    user: AuthUser,
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<SuccessResponse>, ApiError> {
    app_state
        .logged_work_service
        .delete_logged_work(&LoggedWorkId::new(id))
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
