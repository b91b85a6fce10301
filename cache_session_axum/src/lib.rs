//! Axum integration for cache_session
//!
//! Install [`session_middleware`] with `axum::middleware::from_fn_with_state` and take a
//! [`SessionHandle`] in any handler below it.

mod error;
mod middleware;
mod session;

pub use error::IntoResponseError;
pub use middleware::session_middleware;
pub use session::SessionHandle;

// Re-export the core types handlers need alongside the layer
pub use cache_session::{
    CookieParams, InMemoryCacheStore, RedisCacheStore, SessionContents, SessionError,
    SessionMiddleware, SessionSnapshot, SessionStatus, cache_store_from_env,
};
