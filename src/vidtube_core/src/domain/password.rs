use secrecy::{ExposeSecret, Secret};

use super::user_error::UserError;

/// Plaintext password as received from a client. Only ever held in memory
/// long enough to hash or verify it.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Rejects blank input. `field` names the offending form field in the error.
    pub fn parse(raw: Secret<String>, field: &'static str) -> Result<Self, UserError> {
        if raw.expose_secret().trim().is_empty() {
            return Err(UserError::MissingField(field));
        }

        Ok(Self(raw))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value, "password")
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// PHC-formatted password hash as persisted on the user record.
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(phc: Secret<String>) -> Self {
        Self(phc)
    }
}

impl AsRef<Secret<String>> for PasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
