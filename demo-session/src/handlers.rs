use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

use cache_session_axum::{IntoResponseError, SessionHandle};

/// Visit counter; the first visit begins the session.
pub(crate) async fn index(session: SessionHandle) -> Result<String, (StatusCode, String)> {
    session.begin().await.into_response_error()?;

    let visits = session
        .get("visits")
        .await
        .and_then(|v| v.as_u64())
        .unwrap_or(0)
        + 1;
    session.insert("visits", json!(visits)).await;

    match session.get("user").await.and_then(|v| v.as_str().map(str::to_string)) {
        Some(user) => Ok(format!("Hey {user}, visit number {visits}")),
        None => Ok(format!("Visit number {visits}")),
    }
}

/// Mark the session as logged in under a fresh id.
pub(crate) async fn login(session: SessionHandle) -> Result<String, (StatusCode, String)> {
    session.begin().await.into_response_error()?;
    session.regenerate().await.into_response_error()?;
    session.insert("user", json!("demo")).await;

    tracing::debug!("Logged in, new session id issued");
    Ok("Logged in".to_string())
}

pub(crate) async fn logout(session: SessionHandle) -> &'static str {
    session.end().await;
    "Logged out"
}

pub(crate) async fn snapshot(session: SessionHandle) -> Result<Json<Value>, (StatusCode, String)> {
    let snapshot = session.to_snapshot().await;
    serde_json::to_value(snapshot)
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
