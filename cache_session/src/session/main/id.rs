use std::fmt::Debug;

use crate::session::config::DEFAULT_SESSION_ID_LENGTH;
use crate::session::errors::SessionError;
use crate::utils::gen_random_hex;

/// Source of unguessable session identifiers.
pub trait SessionIdGenerator: Debug + Send + Sync + 'static {
    /// Generate a random string to be used as a session id.
    fn generate(&self) -> Result<String, SessionError>;
}

/// Hex-encoded random bytes from the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomBytes {
    length: usize,
}

impl RandomBytes {
    pub const DEFAULT_LENGTH: usize = DEFAULT_SESSION_ID_LENGTH;

    /// `length` is the number of random bytes; the id has twice as many hex characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomBytes {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH)
    }
}

impl SessionIdGenerator for RandomBytes {
    fn generate(&self) -> Result<String, SessionError> {
        Ok(gen_random_hex(self.length)?)
    }
}
