//! Test fixtures providing pre-built test objects

use crate::identity::{VerificationError, VerificationResponse};
use crate::models::Credentials;

use super::constants::{TEST_EMAIL, TEST_ID_TOKEN, TEST_LOCAL_ID, TEST_PASSWORD};

/// Central fixture provider for all test data
pub struct TestFixtures;

impl TestFixtures {
    /// Default credentials
    #[must_use]
    pub fn credentials() -> Credentials {
        Credentials::new(TEST_EMAIL, TEST_PASSWORD)
    }

    /// Successful provider reply with the given `expiresIn`
    #[must_use]
    pub fn verification_response(expires_in: &str) -> VerificationResponse {
        Self::verification_response_for(TEST_EMAIL, expires_in)
    }

    /// Successful provider reply for a specific email
    #[must_use]
    pub fn verification_response_for(email: &str, expires_in: &str) -> VerificationResponse {
        VerificationResponse {
            kind: Some("identitytoolkit#VerifyPasswordResponse".to_string()),
            id_token: TEST_ID_TOKEN.to_string(),
            email: email.to_string(),
            refresh_token: "test-refresh-token".to_string(),
            expires_in: expires_in.to_string(),
            local_id: TEST_LOCAL_ID.to_string(),
            registered: Some(true),
        }
    }

    /// Provider rejection carrying an error code
    #[must_use]
    pub fn provider_error(code: &str) -> VerificationError {
        VerificationError::Provider {
            status: 400,
            code: Some(code.to_string()),
        }
    }

    /// Failure with no provider error structure at all
    #[must_use]
    pub fn transport_error() -> VerificationError {
        VerificationError::Transport("connection reset by peer".to_string())
    }

    /// Provider error body as sent on the wire
    #[must_use]
    pub fn provider_error_body(code: &str) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": 400,
                "message": code,
                "errors": [{ "message": code, "domain": "global", "reason": "invalid" }]
            }
        })
    }
}
