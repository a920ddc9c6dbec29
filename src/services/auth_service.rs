use std::sync::Arc;
use thiserror::Error;

use crate::models::PhoneResponse;

/// Identity returned to every caller holding the bearer token.
pub const OWNER_PHONE: &str = "919876543210";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidCredential,
}

#[derive(Clone)]
pub struct AuthService {
    bearer_token: Arc<str>,
}

impl AuthService {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: Arc::from(bearer_token.into()),
        }
    }

    pub fn validate(&self, token: &str) -> Result<PhoneResponse, AuthError> {
        if token != &*self.bearer_token {
            tracing::warn!("Rejected validate call with a non-matching token");
            return Err(AuthError::InvalidCredential);
        }

        Ok(PhoneResponse {
            phone: OWNER_PHONE.to_string(),
        })
    }
}
