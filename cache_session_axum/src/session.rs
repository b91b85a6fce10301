use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::{StatusCode, request::Parts};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::Mutex;

use cache_session::{Session, SessionContents, SessionError, SessionSnapshot, SessionStatus};

/// The request's session, shared between [`session_middleware`](crate::session_middleware)
/// and the handlers it wraps.
///
/// The middleware stores one `SessionHandle` in the request extensions; extracting it
/// hands out a clone pointing at the same [`Session`]. Changes made through any clone are
/// what the middleware persists once the handler returns.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use cache_session_axum::SessionHandle;
///
/// async fn visit(session: SessionHandle) -> String {
///     format!("active: {}", session.is_active().await)
/// }
///
/// let app: Router = Router::new().route("/", get(visit));
/// ```
#[derive(Clone, Debug)]
pub struct SessionHandle(Arc<Mutex<Session>>);

impl SessionHandle {
    pub(crate) fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// Take the session back once every handler is done with it.
    pub(crate) async fn into_session(self) -> Session {
        match Arc::try_unwrap(self.0) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => {
                tracing::warn!("Session handle still shared after the handler returned");
                shared.lock().await.clone()
            }
        }
    }

    pub async fn id(&self) -> String {
        self.0.lock().await.id().to_string()
    }

    pub async fn status(&self) -> SessionStatus {
        self.0.lock().await.status()
    }

    pub async fn is_active(&self) -> bool {
        self.0.lock().await.is_active()
    }

    pub async fn contents(&self) -> SessionContents {
        self.0.lock().await.contents().clone()
    }

    pub async fn set_contents(&self, contents: SessionContents) {
        self.0.lock().await.set_contents(contents);
    }

    /// Single value from the contents.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.0.lock().await.contents().get(key).cloned()
    }

    /// Set one key, keeping the rest of the contents.
    pub async fn insert(&self, key: impl Into<String>, value: Value) {
        let mut session = self.0.lock().await;
        let mut contents = session.contents().clone();
        contents.insert(key.into(), value);
        session.set_contents(contents);
    }

    pub async fn begin(&self) -> Result<(), SessionError> {
        self.0.lock().await.begin()
    }

    pub async fn end(&self) {
        self.0.lock().await.end();
    }

    pub async fn regenerate(&self) -> Result<bool, SessionError> {
        self.0.lock().await.regenerate()
    }

    pub async fn to_snapshot(&self) -> SessionSnapshot {
        self.0.lock().await.to_snapshot()
    }

    pub async fn restore_snapshot(&self, record: &Value) -> Result<(), SessionError> {
        self.0.lock().await.restore_snapshot(record)?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<SessionHandle>().cloned().ok_or_else(|| {
            tracing::error!("SessionHandle requested but session_middleware is not installed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Session middleware is not installed",
            )
        })
    }
}

impl<S> OptionalFromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<SessionHandle>().cloned())
    }
}
