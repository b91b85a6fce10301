use axum::{Router, middleware::from_fn_with_state, routing::get};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_session_axum::{SessionMiddleware, session_middleware};

mod handlers;
mod server;

use crate::{
    handlers::{index, login, logout, snapshot},
    server::spawn_http_server,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("{}=debug,cache_session=debug", env!("CARGO_CRATE_NAME")).into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Cookie, id and cache store settings all come from SESSION_* variables
    let sessions = SessionMiddleware::from_env().await?;
    tracing::debug!("Session middleware: {:?}", sessions);

    let app = Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/logout", get(logout))
        .route("/snapshot", get(snapshot))
        .layer(from_fn_with_state(sessions, session_middleware));

    let port = std::env::var("DEMO_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3001);

    spawn_http_server(port, app).await?;
    Ok(())
}
