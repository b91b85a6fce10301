use ring::rand::SecureRandom;
use thiserror::Error;

/// Hex-encode `len` bytes drawn from the operating system's CSPRNG.
pub(crate) fn gen_random_hex(len: usize) -> Result<String, UtilError> {
    if len == 0 {
        return Err(UtilError::Crypto(
            "Random string length must be positive".to_string(),
        ));
    }
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(hex::encode(bytes))
}

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),
}
