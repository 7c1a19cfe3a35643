//! Mock objects and fake implementations for testing
//!
//! This module provides stand-ins for the identity provider, the navigation
//! service and the clock so coordinator behaviour can be tested without
//! network access or wall-clock dependence.

use crate::identity::{
    IdentityProvider, VerificationError, VerificationRequest, VerificationResponse,
};
use crate::navigation::Navigator;
use crate::utils::Clock;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type ScriptedResult = Result<VerificationResponse, VerificationError>;

/// Scripted identity provider
///
/// Replies with a per-email result when one is registered, otherwise with the
/// default result. Calls for a gated email wait until the gate is released.
pub struct MockIdentityProvider {
    default: ScriptedResult,
    by_email: HashMap<String, ScriptedResult>,
    gates: HashMap<String, Arc<Notify>>,
    calls: Mutex<Vec<(String, String, bool)>>,
}

impl MockIdentityProvider {
    #[must_use]
    pub fn succeeding(response: VerificationResponse) -> Self {
        Self::with_default(Ok(response))
    }

    #[must_use]
    pub fn failing(error: VerificationError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default: ScriptedResult) -> Self {
        Self {
            default,
            by_email: HashMap::new(),
            gates: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Use a different result for one email
    #[must_use]
    pub fn with_result_for(mut self, email: &str, result: ScriptedResult) -> Self {
        self.by_email.insert(email.to_string(), result);
        self
    }

    /// Hold calls for `email` until the returned gate is notified
    pub fn gate(&mut self, email: &str) -> Arc<Notify> {
        self.gates
            .entry(email.to_string())
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    /// Number of verification calls received
    ///
    /// # Panics
    ///
    /// Panics if the call log mutex is poisoned.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(email, password, returnSecureToken)` of every call, in arrival order
    ///
    /// # Panics
    ///
    /// Panics if the call log mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn verify_password(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResponse, VerificationError> {
        self.calls.lock().unwrap().push((
            request.email.clone(),
            request.password.clone(),
            request.return_secure_token,
        ));

        if let Some(gate) = self.gates.get(&request.email) {
            gate.notified().await;
        }

        self.by_email
            .get(&request.email)
            .unwrap_or(&self.default)
            .clone()
    }
}

/// Navigator recording every destination it is asked for
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// # Panics
    ///
    /// Panics if `millis` is outside chrono's representable range.
    #[must_use]
    pub fn at_millis(millis: i64) -> Self {
        Self(Utc.timestamp_millis_opt(millis).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
