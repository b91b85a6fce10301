use serde_json::Value;
use std::sync::Arc;

use crate::session::errors::SessionError;
use crate::session::types::{SessionContents, SessionSnapshot, SessionStatus};

use super::id::SessionIdGenerator;

/// Server-side state of one request's session.
///
/// Sessions built by [`Session::new`] are active exactly while they hold a non-empty id; a
/// restored snapshot may also be inactive with an id, which [`Session::begin`] then reuses.
/// Ids that were replaced by [`Session::regenerate`] or dropped by [`Session::end`] pile up
/// in [`Session::retired_ids`] so the middleware can purge them from the cache.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    contents: SessionContents,
    status: SessionStatus,
    retired_ids: Vec<String>,
    generator: Arc<dyn SessionIdGenerator>,
}

impl Session {
    /// An empty `id` yields an inactive session; anything else an active one.
    pub fn new(
        id: impl Into<String>,
        contents: SessionContents,
        generator: Arc<dyn SessionIdGenerator>,
    ) -> Self {
        let id = id.into();
        let status = if id.is_empty() {
            SessionStatus::Inactive
        } else {
            SessionStatus::Active
        };
        Self {
            id,
            contents,
            status,
            retired_ids: Vec::new(),
            generator,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the contents wholesale.
    pub fn set_contents(&mut self, contents: SessionContents) {
        self.contents = contents;
    }

    pub fn contents(&self) -> &SessionContents {
        &self.contents
    }

    pub fn retired_ids(&self) -> &[String] {
        &self.retired_ids
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Start the session, minting an id if it has none. No-op when already active.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.is_active() {
            return Ok(());
        }

        if self.id.is_empty() {
            self.id = self.fresh_id()?;
        }
        self.status = SessionStatus::Active;

        tracing::debug!("Session begun");
        Ok(())
    }

    /// Terminate the session: retire its id and drop its contents. No-op when inactive.
    pub fn end(&mut self) {
        if !self.is_active() {
            return;
        }

        self.retired_ids.push(std::mem::take(&mut self.id));
        self.contents.clear();
        self.status = SessionStatus::Inactive;

        tracing::debug!("Session ended");
    }

    /// Swap the id for a fresh one while keeping the contents.
    ///
    /// Returns `Ok(false)` without touching anything when the session is inactive.
    pub fn regenerate(&mut self) -> Result<bool, SessionError> {
        if !self.is_active() {
            return Ok(false);
        }

        let new_id = self.fresh_id()?;
        self.retired_ids
            .push(std::mem::replace(&mut self.id, new_id));

        tracing::debug!("Session id regenerated");
        Ok(true)
    }

    pub fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            contents: self.contents.clone(),
            retired_ids: self.retired_ids.clone(),
            status: self.status,
        }
    }

    /// Build a new session from a stored snapshot record.
    pub fn from_snapshot(
        record: &Value,
        generator: Arc<dyn SessionIdGenerator>,
    ) -> Result<Self, SessionError> {
        let snapshot = SessionSnapshot::from_record(record)?;
        Ok(Self {
            id: snapshot.id,
            contents: snapshot.contents,
            status: snapshot.status,
            retired_ids: snapshot.retired_ids,
            generator,
        })
    }

    /// Overwrite this session's state with a stored snapshot record, keeping its generator.
    ///
    /// On error the session is left unchanged.
    pub fn restore_snapshot(&mut self, record: &Value) -> Result<&mut Self, SessionError> {
        let snapshot = SessionSnapshot::from_record(record)?;
        self.id = snapshot.id;
        self.contents = snapshot.contents;
        self.status = snapshot.status;
        self.retired_ids = snapshot.retired_ids;
        Ok(self)
    }

    fn fresh_id(&self) -> Result<String, SessionError> {
        let id = self.generator.generate()?;
        if id.is_empty() {
            return Err(SessionError::Crypto(
                "Session id generator returned an empty id".to_string(),
            ));
        }
        Ok(id)
    }
}
