//! Errors produced by the password verification call

use std::fmt;

/// Identity provider call failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The request never produced a response (connection, TLS, DNS, ...)
    Transport(String),

    /// The provider answered with a non-success status.
    /// `code` is the provider error code when the body carried one.
    Provider { status: u16, code: Option<String> },

    /// A success reply whose body could not be interpreted
    MalformedResponse(String),
}

impl VerificationError {
    /// Provider error code, if the failure carried one
    #[must_use]
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            VerificationError::Provider { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationError::Transport(msg) => write!(f, "Transport error: {msg}"),
            VerificationError::Provider { status, code } => match code {
                Some(code) => write!(f, "Provider error {status}: {code}"),
                None => write!(f, "Provider error {status} without error code"),
            },
            VerificationError::MalformedResponse(msg) => write!(f, "Malformed response: {msg}"),
        }
    }
}

impl std::error::Error for VerificationError {}

impl From<reqwest::Error> for VerificationError {
    fn from(err: reqwest::Error) -> Self {
        VerificationError::Transport(err.to_string())
    }
}
