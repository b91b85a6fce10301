use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use cache_session::{SessionError, SessionMiddleware};

use super::error::IntoResponseError;
use super::session::SessionHandle;

/// Session layer for `axum::middleware::from_fn_with_state`.
///
/// Loads the request's session, exposes it to the wrapped handlers as a [`SessionHandle`]
/// extension, and persists it with the matching `Set-Cookie` header after they return.
/// Failures on the cache layer become a 500 response.
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{Router, middleware::from_fn_with_state, routing::get};
/// use cache_session::{InMemoryCacheStore, SessionMiddleware};
/// use cache_session_axum::session_middleware;
///
/// let sessions = SessionMiddleware::new("SessionId", Arc::new(InMemoryCacheStore::new()));
/// let app: Router = Router::new()
///     .route("/", get(|| async { "hello" }))
///     .layer(from_fn_with_state(sessions, session_middleware));
/// ```
pub async fn session_middleware(
    State(sessions): State<SessionMiddleware>,
    req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    sessions
        .handle(req, |mut req: Request, session| async move {
            let handle = SessionHandle::new(session);
            req.extensions_mut().insert(handle.clone());

            let response = next.run(req).await;

            Ok::<_, SessionError>((response, handle.into_session().await))
        })
        .await
        .inspect_err(|e| tracing::error!("Session middleware failed: {}", e))
        .into_response_error()
}
