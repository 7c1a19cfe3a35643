//! Identity provider client
//!
//! The coordinator talks to the provider through the [`IdentityProvider`]
//! trait so tests can swap in a scripted implementation. The production
//! implementation posts JSON to the identity toolkit `verifyPassword` endpoint.

use crate::identity::errors::VerificationError;
use crate::identity::wire::{ProviderErrorBody, VerificationRequest, VerificationResponse};
use async_trait::async_trait;
use std::fmt;
use url::Url;

/// Default identity provider host
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Path of the password verification endpoint, relative to the base URL
pub const VERIFY_PASSWORD_PATH: &str = "/identitytoolkit/v3/relyingparty/verifyPassword";

/// Configuration injected into the provider client at construction
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityProviderConfig {
    /// Opaque API key appended to every request as `?key=`
    pub api_key: String,
    /// Scheme and host of the provider, without trailing path
    pub base_url: String,
}

impl IdentityProviderConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the full `verifyPassword` URL including the API key
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL
    pub fn verify_password_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(self.base_url.trim_end_matches('/'))?.join(VERIFY_PASSWORD_PATH)?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl fmt::Debug for IdentityProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Remote credential verification
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an email/password pair
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request cannot be sent or no response arrives
    /// - The provider rejects the credentials or reports any other error
    /// - The success body cannot be decoded
    async fn verify_password(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResponse, VerificationError>;
}

/// `reqwest` backed implementation of [`IdentityProvider`]
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    config: IdentityProviderConfig,
}

impl HttpIdentityProvider {
    #[must_use]
    pub fn new(config: IdentityProviderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Use a preconfigured client, e.g. one with transport-level timeouts
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: IdentityProviderConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &IdentityProviderConfig {
        &self.config
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify_password(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResponse, VerificationError> {
        let url = self
            .config
            .verify_password_url()
            .map_err(|e| VerificationError::Transport(format!("Invalid provider URL: {e}")))?;

        log::debug!("Posting password verification to {}", url.path());

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let code = ProviderErrorBody::code_from_bytes(&body);
            log::debug!("Password verification rejected with status {status}, code {code:?}");
            return Err(VerificationError::Provider {
                status: status.as_u16(),
                code,
            });
        }

        serde_json::from_slice::<VerificationResponse>(&body).map_err(|e| {
            VerificationError::MalformedResponse(format!(
                "Failed to parse verification response: {e}"
            ))
        })
    }
}
