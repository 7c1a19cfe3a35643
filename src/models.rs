//! Core data types shared by the coordinator, the identity provider client
//! and downstream consumers of authentication outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email and password supplied by the caller for a single attempt.
///
/// Values are forwarded to the identity provider as-is; no local validation
/// is performed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Inbound user intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthIntent {
    /// Sign in with an existing account
    Login(Credentials),
    /// Create a new account (accepted but currently not acted upon)
    Signup(Credentials),
}

impl AuthIntent {
    /// Short name used in log lines
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AuthIntent::Login(_) => "login",
            AuthIntent::Signup(_) => "signup",
        }
    }
}

/// Terminal result of an authentication attempt
///
/// `expiration_instant` is an absolute point in time so consumers never have
/// to re-derive elapsed time from the provider's relative `expiresIn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthOutcome {
    Success {
        email: String,
        user_id: String,
        token: String,
        expiration_instant: DateTime<Utc>,
    },
    Failure {
        message: String,
    },
}

impl AuthOutcome {
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        AuthOutcome::Failure {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success { .. })
    }

    /// Expiration as milliseconds since the Unix epoch, for successful outcomes
    #[must_use]
    pub fn expiration_millis(&self) -> Option<i64> {
        match self {
            AuthOutcome::Success {
                expiration_instant, ..
            } => Some(expiration_instant.timestamp_millis()),
            AuthOutcome::Failure { .. } => None,
        }
    }
}
