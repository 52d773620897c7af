use std::fmt;

use thiserror::Error;

/// Error raised when a required secret is absent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Secret '{0}' must be set and non-empty")]
    Empty(&'static str),
}

/// Process-wide secret value (password pepper or token signing key).
///
/// Construction rejects empty or whitespace-only values so a misconfigured
/// process fails at startup instead of silently weakening credentials.
/// The value is never printed by `Debug`.
#[derive(Clone)]
pub struct Secret {
    name: &'static str,
    value: String,
}

impl Secret {
    /// Wrap a configured secret.
    ///
    /// # Arguments
    /// * `name` - Configuration key, used in error messages
    /// * `value` - Raw secret value
    ///
    /// # Errors
    /// * `Empty` - Value is empty or only whitespace
    pub fn new(name: &'static str, value: impl Into<String>) -> Result<Self, SecretError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SecretError::Empty(name));
        }
        Ok(Self { name, value })
    }

    pub fn expose(&self) -> &[u8] {
        self.value.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}
