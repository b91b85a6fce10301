//! cache_session - Server-side sessions for HTTP services
//!
//! Each request gets a [`Session`] whose contents live in a pluggable [`CacheStore`]
//! and whose identifier travels in a cookie. [`SessionMiddleware`] loads the session
//! before the handler runs, then removes retired ids, stores the active session and
//! sets (or deletes) the cookie once the handler has produced its response.
//!
//! ```no_run
//! use std::sync::Arc;
//! use cache_session::{CookieParams, InMemoryCacheStore, SessionMiddleware};
//!
//! let middleware = SessionMiddleware::new("SessionId", Arc::new(InMemoryCacheStore::new()))
//!     .with_cookie_params(CookieParams::default().with_path("/").with_http_only(true));
//! ```

mod session;
mod storage;
mod utils;

pub use session::{
    CookieParams, DEFAULT_SESSION_ID_LENGTH, RandomBytes, SESSION_COOKIE_DOMAIN,
    SESSION_COOKIE_HTTP_ONLY, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SESSION_COOKIE_PATH,
    SESSION_COOKIE_SECURE, SESSION_ID_LENGTH, Session, SessionContents, SessionError,
    SessionIdGenerator, SessionMiddleware, SessionSnapshot, SessionStatus,
};

pub use storage::{
    CacheData, CacheStore, InMemoryCacheStore, RedisCacheStore, StorageError,
    cache_store_from_env,
};

pub use utils::UtilError;
