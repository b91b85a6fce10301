use chrono::Utc;
use http::header::{HeaderMap, HeaderValue, SET_COOKIE};
use http::{Request, Response};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::session::config::{SESSION_COOKIE_NAME, SESSION_ID_LENGTH};
use crate::session::errors::SessionError;
use crate::session::types::{
    CookieParams, SessionContents, contents_from_cache_data, contents_to_cache_data,
};
use crate::storage::{CacheStore, cache_store_from_env};

use super::cookie::{delete_cookie, get_session_id_from_headers, live_cookie};
use super::id::{RandomBytes, SessionIdGenerator};
use super::session::Session;

/// Binds a [`Session`] to each request: loads it from the cookie and cache before the
/// handler runs, then writes it back and emits the matching `Set-Cookie` header.
///
/// Cloning is cheap; clones share the cache store and id generator.
#[derive(Clone)]
pub struct SessionMiddleware {
    cookie_name: String,
    store: Arc<dyn CacheStore>,
    cookie_params: CookieParams,
    generator: Arc<dyn SessionIdGenerator>,
}

impl fmt::Debug for SessionMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionMiddleware")
            .field("cookie_name", &self.cookie_name)
            .field("cookie_params", &self.cookie_params)
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}

impl SessionMiddleware {
    /// Session-cookie attributes default to [`CookieParams::default`], ids to [`RandomBytes`].
    pub fn new(cookie_name: impl Into<String>, store: Arc<dyn CacheStore>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            store,
            cookie_params: CookieParams::default(),
            generator: Arc::new(RandomBytes::default()),
        }
    }

    /// Everything from `SESSION_*` environment variables, including the cache store.
    pub async fn from_env() -> Result<Self, SessionError> {
        let store = cache_store_from_env().await?;
        Ok(Self::new(SESSION_COOKIE_NAME.as_str(), store)
            .with_cookie_params(CookieParams::from_env())
            .with_generator(Arc::new(RandomBytes::new(*SESSION_ID_LENGTH))))
    }

    pub fn with_cookie_params(mut self, cookie_params: CookieParams) -> Self {
        self.cookie_params = cookie_params;
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn SessionIdGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn cookie_params(&self) -> &CookieParams {
        &self.cookie_params
    }

    /// Run `next` with the request's session and finish the session lifecycle afterwards.
    ///
    /// `next` owns the [`Session`] while it runs and hands it back with its response.
    /// The steps run strictly in order: cache read, handler, retired-id removal, cache
    /// write, cookie. Errors from the cache or from `next` abort the remaining steps and
    /// are returned to the caller; an unreadable cookie only counts as no cookie.
    #[tracing::instrument(skip_all, fields(cookie = %self.cookie_name))]
    pub async fn handle<B, R, E, F, Fut>(&self, request: Request<B>, next: F) -> Result<Response<R>, E>
    where
        F: FnOnce(Request<B>, Session) -> Fut,
        Fut: Future<Output = Result<(Response<R>, Session), E>>,
        E: From<SessionError>,
    {
        let session = self.load_session(request.headers()).await?;

        let (mut response, session) = next(request, session).await?;

        self.persist_session(&session).await?;

        let cookie = self.session_cookie(&session)?;
        response.headers_mut().append(SET_COOKIE, cookie);

        Ok(response)
    }

    /// Build the session for a request from its session cookie and the cache.
    pub async fn load_session(&self, headers: &HeaderMap) -> Result<Session, SessionError> {
        let Some(session_id) = get_session_id_from_headers(headers, &self.cookie_name) else {
            return Ok(Session::new(
                "",
                SessionContents::new(),
                self.generator.clone(),
            ));
        };

        let contents = match self.store.get(&session_id).await {
            Ok(Some(data)) => contents_from_cache_data(data)?,
            Ok(None) => {
                tracing::debug!("Session cookie present but nothing cached, starting empty");
                SessionContents::new()
            }
            Err(e) => {
                tracing::error!("Failed to load session from cache: {}", e);
                return Err(e.into());
            }
        };

        Ok(Session::new(session_id, contents, self.generator.clone()))
    }

    /// Purge retired ids from the cache, then store the contents of an active session.
    pub async fn persist_session(&self, session: &Session) -> Result<(), SessionError> {
        for retired_id in session.retired_ids() {
            self.store.remove(retired_id).await.map_err(|e| {
                tracing::error!("Failed to remove retired session from cache: {}", e);
                SessionError::from(e)
            })?;
        }

        if session.is_active() {
            let data = contents_to_cache_data(session.contents())?;
            self.store.put(session.id(), data).await.map_err(|e| {
                tracing::error!("Failed to store session in cache: {}", e);
                SessionError::from(e)
            })?;
        }

        tracing::debug!(
            "Persisted session: active={}, retired={}",
            session.is_active(),
            session.retired_ids().len()
        );
        Ok(())
    }

    /// Live cookie for an active session, delete cookie otherwise.
    pub fn session_cookie(&self, session: &Session) -> Result<HeaderValue, SessionError> {
        if session.is_active() {
            live_cookie(
                &self.cookie_name,
                session.id(),
                &self.cookie_params,
                Utc::now(),
            )
        } else {
            delete_cookie(&self.cookie_name, &self.cookie_params)
        }
    }
}
