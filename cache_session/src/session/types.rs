use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::errors::SessionError;
use crate::storage::CacheData;

/// Payload that downstream handlers read and write.
pub type SessionContents = Map<String, Value>;

/// Whether a session currently owns an identifier.
///
/// Serialized as an integer code: `1` for inactive, `2` for active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SessionStatus {
    #[default]
    Inactive,
    Active,
}

impl SessionStatus {
    pub const INACTIVE_CODE: u8 = 1;
    pub const ACTIVE_CODE: u8 = 2;
}

impl From<SessionStatus> for u8 {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Inactive => SessionStatus::INACTIVE_CODE,
            SessionStatus::Active => SessionStatus::ACTIVE_CODE,
        }
    }
}

impl TryFrom<u8> for SessionStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            Self::INACTIVE_CODE => Ok(Self::Inactive),
            Self::ACTIVE_CODE => Ok(Self::Active),
            other => Err(format!("unknown session status code {other}")),
        }
    }
}

/// Detached copy of a session's state, used to persist or transport it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub contents: SessionContents,
    #[serde(rename = "oldIds", alias = "retiredIds")]
    pub retired_ids: Vec<String>,
    pub status: SessionStatus,
}

impl SessionSnapshot {
    const REQUIRED_FIELDS: [&'static str; 4] = ["id", "contents", "oldIds", "status"];

    /// Validate an untyped record and convert it into a snapshot.
    ///
    /// Every required field must be present; nothing is defaulted. The combination of
    /// id and status is taken as stored, so an inactive record may still carry an id.
    pub fn from_record(record: &Value) -> Result<Self, SessionError> {
        let Some(object) = record.as_object() else {
            return Err(SessionError::InvalidSnapshot(
                "Session snapshot must be a JSON object".to_string(),
            ));
        };

        let missing: Vec<&str> = Self::REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| match *field {
                "oldIds" => !object.contains_key("oldIds") && !object.contains_key("retiredIds"),
                field => !object.contains_key(field),
            })
            .collect();
        if !missing.is_empty() {
            return Err(SessionError::InvalidSnapshot(format!(
                "Session snapshot must contain \"id\", \"contents\", \"oldIds\", and \"status\"; missing: {}",
                missing.join(", ")
            )));
        }

        // `oldIds` wins over the legacy `retiredIds` key when a record carries both
        let mut object = object.clone();
        if object.contains_key("oldIds") && object.remove("retiredIds").is_some() {
            tracing::debug!("Ignoring retiredIds in favour of oldIds in session snapshot");
        }

        serde_json::from_value(Value::Object(object))
            .map_err(|e| SessionError::InvalidSnapshot(e.to_string()))
    }
}

/// Attributes applied to the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CookieParams {
    /// Lifetime in seconds from the moment the cookie is built; `<= 0` emits no expiry.
    pub max_age: i64,
    pub path: String,
    pub domain: String,
    pub secure: bool,
    pub http_only: bool,
}

impl CookieParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_age(mut self, max_age: i64) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }
}

pub(crate) fn contents_to_cache_data(contents: &SessionContents) -> Result<CacheData, SessionError> {
    Ok(CacheData {
        value: serde_json::to_string(contents)
            .map_err(|e| SessionError::Storage(e.to_string()))?,
    })
}

pub(crate) fn contents_from_cache_data(data: CacheData) -> Result<SessionContents, SessionError> {
    serde_json::from_str(&data.value).map_err(|e| SessionError::Storage(e.to_string()))
}
