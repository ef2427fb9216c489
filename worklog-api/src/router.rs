use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, auth, routes};


pub fn create(app_state: AppState, app_url: Option<&str>) -> Router<()> {
    let app = Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .merge(auth::router())
        .nest("/projects", routes::projects::router())
        .nest("/loggedwork", routes::logged_work::router())
        .nest("/users", routes::users::router());

    let allowed_origin = app_url.and_then(|url| HeaderValue::from_str(url).ok());
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            allowed_origin.as_ref() == Some(origin)
        }));

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
