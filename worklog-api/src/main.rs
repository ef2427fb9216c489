use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use worklog_api::{config::read_config, factory};

#[tokio::main]
async fn main() {
    dotenvy::from_filename("./worklog-api/.env.local").ok();
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worklog_api=debug,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::LocalTime::rfc_3339()),
        )
        .init();

    let settings = read_config().expect("Failed to read configuration");

    let app = factory::assemble(&settings)
        .await
        .expect("Failed to assemble application");

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await.expect("Server error");
}
