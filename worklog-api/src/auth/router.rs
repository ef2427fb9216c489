use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{LoginRequest, SessionResponse},
    app_state::AppState,
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/auth", post(login))
}

#[instrument(name = "login", skip_all)]
async fn login(
    State(app_state): State<AppState>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(request) = payload.unwrap_or_default();

    let session = app_state
        .auth_service
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(session.into()))
}
