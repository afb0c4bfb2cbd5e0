use crate::domain::auth::{SigningKeyProvider, TokenError};
use rand::RngCore;
use rand::rngs::OsRng;
use std::sync::OnceLock;

/// Length of generated signing secrets, in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// Generates a random secret on first use and keeps it for the lifetime of
/// the provider. Tokens signed by a previous process stop verifying after a
/// restart.
#[derive(Debug, Default)]
pub struct RandomKeyProvider {
    key: OnceLock<[u8; SECRET_KEY_LEN]>,
}

impl RandomKeyProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SigningKeyProvider for RandomKeyProvider {
    fn secret_key(&self) -> Result<&[u8], TokenError> {
        if let Some(key) = self.key.get() {
            return Ok(key.as_slice());
        }

        let mut fresh = [0u8; SECRET_KEY_LEN];
        OsRng
            .try_fill_bytes(&mut fresh)
            .map_err(|e| TokenError::KeyUnavailable(e.to_string()))?;

        // Concurrent first callers race here; only the first value is published.
        Ok(self.key.get_or_init(|| fresh).as_slice())
    }
}

/// Fixed secret, typically loaded from configuration.
#[derive(Clone)]
pub struct StaticKeyProvider {
    key: Vec<u8>,
}

impl StaticKeyProvider {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }
}

impl std::fmt::Debug for StaticKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticKeyProvider")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl SigningKeyProvider for StaticKeyProvider {
    fn secret_key(&self) -> Result<&[u8], TokenError> {
        if self.key.is_empty() {
            return Err(TokenError::KeyUnavailable("empty secret".to_string()));
        }
        Ok(&self.key)
    }
}
