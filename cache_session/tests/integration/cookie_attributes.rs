use crate::common::{
    COOKIE_NAME, contents, middleware, ok_response, request, request_with_cookie, set_cookies,
};
use cache_session::{CacheData, CacheStore, CookieParams, InMemoryCacheStore, Session, SessionError};
use chrono::{NaiveDateTime, TimeDelta, Utc};
use http::Request;
use serde_json::json;
use std::sync::Arc;

async fn store_with_cookies() -> Arc<InMemoryCacheStore> {
    let store = Arc::new(InMemoryCacheStore::new());
    store
        .put(
            "cookies",
            CacheData {
                value: json!({"flavor": "Chocolate Chip"}).to_string(),
            },
        )
        .await
        .unwrap();
    store
}

async fn keep_alive_cookie(params: CookieParams) -> String {
    let response = middleware(store_with_cookies().await)
        .with_cookie_params(params)
        .handle(
            request_with_cookie("cookies"),
            |_req: Request<()>, session: Session| async move {
                Ok::<_, SessionError>((ok_response(), session))
            },
        )
        .await
        .unwrap();

    let mut cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    cookies.remove(0)
}

fn attribute<'a>(cookie: &'a str, name: &str) -> Option<&'a str> {
    cookie
        .split("; ")
        .skip(1)
        .find(|attr| attr.split('=').next() == Some(name))
}

#[tokio::test]
async fn test_cookie_lifetime_is_relative_to_now() {
    let before = Utc::now().naive_utc();
    let cookie = keep_alive_cookie(CookieParams::default().with_max_age(10)).await;
    let after = Utc::now().naive_utc();

    let expires = attribute(&cookie, "expires")
        .and_then(|attr| attr.strip_prefix("expires="))
        .expect("cookie has an expiry");
    let expires = NaiveDateTime::parse_from_str(expires, "%a, %d-%b-%Y %H:%M:%S GMT").unwrap();

    // Second resolution: allow the truncated timestamp to land a second early
    let lower = before + TimeDelta::seconds(10) - TimeDelta::seconds(1);
    let upper = after + TimeDelta::seconds(10);
    assert!(expires >= lower && expires <= upper, "unexpected expiry {expires}");
}

#[tokio::test]
async fn test_session_cookie_without_lifetime_has_no_expiry() {
    let cookie = keep_alive_cookie(CookieParams::default()).await;

    assert_eq!(cookie, format!("{COOKIE_NAME}=cookies"));
    assert!(attribute(&cookie, "expires").is_none());
}

#[tokio::test]
async fn test_set_cookie_line() {
    let params = CookieParams::default()
        .with_path("/cookie-jar")
        .with_domain("www.example.com")
        .with_secure(true)
        .with_http_only(true);

    let cookie = keep_alive_cookie(params).await;

    assert_eq!(
        cookie,
        "CookieMonster=cookies; path=/cookie-jar; domain=www.example.com; secure; httponly"
    );
}

#[tokio::test]
async fn test_delete_cookie_keeps_scope_attributes() {
    let params = CookieParams::default()
        .with_max_age(3600)
        .with_path("/cookie-jar")
        .with_domain("www.example.com")
        .with_secure(true)
        .with_http_only(true);

    let response = middleware(store_with_cookies().await)
        .with_cookie_params(params)
        .handle(
            request_with_cookie("cookies"),
            |_req: Request<()>, mut session: Session| async move {
                session.end();
                Ok::<_, SessionError>((ok_response(), session))
            },
        )
        .await
        .unwrap();

    assert_eq!(
        set_cookies(&response),
        vec![
            "CookieMonster=deleted; expires=Thu, 01-Jan-1970 00:00:01 GMT; \
             path=/cookie-jar; domain=www.example.com; secure; httponly"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_new_session_cookie_uses_configured_attributes() {
    let params = CookieParams::default().with_path("/").with_http_only(true);

    let response = middleware(Arc::new(InMemoryCacheStore::new()))
        .with_cookie_params(params)
        .handle(request(), |_req: Request<()>, mut session: Session| async move {
            session.begin()?;
            session.set_contents(contents(json!({"user": "elmo"})));
            Ok::<_, SessionError>((ok_response(), session))
        })
        .await
        .unwrap();

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("CookieMonster="));
    assert!(cookies[0].ends_with("; path=/; httponly"));
}
