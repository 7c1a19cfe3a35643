//! JSON payloads exchanged with the identity provider

use crate::models::Credentials;
use serde::{Deserialize, Serialize};

/// Body of the `verifyPassword` call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub email: String,
    pub password: String,
    pub return_secure_token: bool,
}

impl From<Credentials> for VerificationRequest {
    fn from(credentials: Credentials) -> Self {
        Self {
            email: credentials.email,
            password: credentials.password,
            return_secure_token: true,
        }
    }
}

/// Successful reply from the identity provider
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    #[serde(default)]
    pub kind: Option<String>,
    pub id_token: String,
    pub email: String,
    pub refresh_token: String,
    /// Token lifetime in seconds, string-encoded by the provider
    pub expires_in: String,
    pub local_id: String,
    #[serde(default)]
    pub registered: Option<bool>,
}

impl VerificationResponse {
    /// Parse the string-encoded `expiresIn` field
    ///
    /// # Errors
    ///
    /// Returns the parse error if the field is not an integer number of seconds
    pub fn expires_in_seconds(&self) -> Result<i64, std::num::ParseIntError> {
        self.expires_in.trim().parse::<i64>()
    }
}

/// Error body returned by the provider on non-2xx replies,
/// e.g. `{"error": {"code": 400, "message": "EMAIL_NOT_FOUND"}}`.
///
/// Clients that surface the body through an HTTP error wrapper address the
/// code as `error.error.message`; a body already nested that way,
/// `{"error": {"error": {"message": ...}}}`, is accepted as well.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<Box<ProviderErrorDetail>>,
}

impl ProviderErrorDetail {
    fn into_code(self) -> Option<String> {
        self.message.or_else(|| self.error.and_then(|inner| inner.message))
    }
}

impl ProviderErrorBody {
    /// Extract the provider error code, tolerating any malformed body
    #[must_use]
    pub fn code_from_bytes(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .and_then(|body| body.error)
            .and_then(ProviderErrorDetail::into_code)
    }
}
