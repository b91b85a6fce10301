mod config;
mod errors;
mod main;
mod types;

pub use config::{
    DEFAULT_SESSION_ID_LENGTH, SESSION_COOKIE_DOMAIN, SESSION_COOKIE_HTTP_ONLY,
    SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SESSION_COOKIE_PATH, SESSION_COOKIE_SECURE,
    SESSION_ID_LENGTH,
};
pub use errors::SessionError;
pub use main::{RandomBytes, Session, SessionIdGenerator, SessionMiddleware};
pub use types::{CookieParams, SessionContents, SessionSnapshot, SessionStatus};
