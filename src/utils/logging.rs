// Centralized logging for coordinator events. Passwords and tokens never reach the log.
use crate::models::{AuthIntent, AuthOutcome};
use log::{debug, info, warn};

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log an intent arriving on the inbound channel
    pub fn log_intent_received(intent: &AuthIntent) {
        match intent {
            AuthIntent::Login(credentials) | AuthIntent::Signup(credentials) => {
                debug!("Received {} intent for {}", intent.kind(), credentials.email);
            }
        }
    }

    /// Log that a signup intent was accepted without further action
    pub fn log_signup_ignored(email: &str) {
        warn!(
            "Signup intent for {email} accepted but signup is not implemented; no outcome emitted"
        );
    }

    /// Log the outcome of a login attempt
    pub fn log_outcome(outcome: &AuthOutcome) {
        match outcome {
            AuthOutcome::Success {
                email,
                expiration_instant,
                ..
            } => info!("✅ Authenticated {email}, token expires at {expiration_instant}"),
            AuthOutcome::Failure { message } => info!("❌ Authentication failed: {message}"),
        }
    }

    /// Log the raw provider failure before it is reduced to a user-facing message
    pub fn log_verification_failure(error: &crate::identity::VerificationError) {
        warn!("Password verification failed: {error}");
    }

    /// Log a navigation triggered by a successful outcome
    pub fn log_navigation(path: &str) {
        info!("🔀 Navigating to {path}");
    }
}
