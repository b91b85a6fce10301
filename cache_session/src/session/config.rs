use std::env;
use std::sync::LazyLock;

use super::types::CookieParams;

/// Default number of random bytes in a generated session id (64 hex characters)
pub const DEFAULT_SESSION_ID_LENGTH: usize = 32;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_NAME")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or("SessionId".to_string())
});

/// Relative cookie lifetime in seconds; 0 keeps it a browser-session cookie
pub static SESSION_COOKIE_MAX_AGE: LazyLock<i64> =
    LazyLock::new(|| parse_max_age(env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref()));

pub static SESSION_COOKIE_PATH: LazyLock<String> =
    LazyLock::new(|| env::var("SESSION_COOKIE_PATH").unwrap_or_default());

pub static SESSION_COOKIE_DOMAIN: LazyLock<String> =
    LazyLock::new(|| env::var("SESSION_COOKIE_DOMAIN").unwrap_or_default());

pub static SESSION_COOKIE_SECURE: LazyLock<bool> =
    LazyLock::new(|| parse_flag(env::var("SESSION_COOKIE_SECURE").ok().as_deref()));

pub static SESSION_COOKIE_HTTP_ONLY: LazyLock<bool> =
    LazyLock::new(|| parse_flag(env::var("SESSION_COOKIE_HTTP_ONLY").ok().as_deref()));

pub static SESSION_ID_LENGTH: LazyLock<usize> =
    LazyLock::new(|| parse_id_length(env::var("SESSION_ID_LENGTH").ok().as_deref()));

fn parse_max_age(value: Option<&str>) -> i64 {
    value.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

fn parse_flag(value: Option<&str>) -> bool {
    value
        .map(|s| matches!(s.trim().to_lowercase().as_str(), "true" | "1"))
        .unwrap_or(false)
}

fn parse_id_length(value: Option<&str>) -> usize {
    value
        .and_then(|s| s.trim().parse().ok())
        .filter(|len| *len > 0)
        .unwrap_or(DEFAULT_SESSION_ID_LENGTH)
}

impl CookieParams {
    /// Cookie attributes from the `SESSION_COOKIE_*` environment variables
    pub fn from_env() -> Self {
        Self {
            max_age: *SESSION_COOKIE_MAX_AGE,
            path: SESSION_COOKIE_PATH.clone(),
            domain: SESSION_COOKIE_DOMAIN.clone(),
            secure: *SESSION_COOKIE_SECURE,
            http_only: *SESSION_COOKIE_HTTP_ONLY,
        }
    }
}
