pub mod stores;

pub use stores::{CacheOp, FailingCacheStore, RecordingCacheStore};

use cache_session::{CacheStore, SessionContents, SessionMiddleware};
use http::header::{COOKIE, SET_COOKIE};
use http::{Request, Response};
use serde_json::Value;
use std::sync::Arc;

pub const COOKIE_NAME: &str = "CookieMonster";

pub fn middleware(store: Arc<dyn CacheStore>) -> SessionMiddleware {
    SessionMiddleware::new(COOKIE_NAME, store)
}

pub fn request() -> Request<()> {
    Request::builder()
        .uri("https://www.example.com/")
        .body(())
        .expect("request builds successfully")
}

pub fn request_with_cookie(value: &str) -> Request<()> {
    Request::builder()
        .uri("https://www.example.com/")
        .header(COOKIE, format!("{COOKIE_NAME}={value}"))
        .body(())
        .expect("request builds successfully")
}

pub fn ok_response() -> Response<()> {
    Response::new(())
}

pub fn contents(value: Value) -> SessionContents {
    value.as_object().cloned().expect("contents must be a JSON object")
}

/// All `Set-Cookie` values of a response
pub fn set_cookies(response: &Response<()>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().expect("set-cookie is valid utf-8").to_string())
        .collect()
}
