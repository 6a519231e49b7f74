use std::fmt;

use crate::error::AuthError;

/// Key credential for the search service.
///
/// The secret is kept out of `Debug` output so request logging can never leak
/// it.
#[derive(Clone)]
pub struct ApiKeyCredential {
    secret: String,
}

impl ApiKeyCredential {
    /// Validates and wraps a raw API key.
    pub fn acquire(raw: impl Into<String>) -> Result<Self, AuthError> {
        let secret = raw.into();
        if secret.trim().is_empty() {
            return Err(AuthError::EmptyKey);
        }
        Ok(Self { secret })
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ApiKeyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKeyCredential(<redacted>)")
    }
}
