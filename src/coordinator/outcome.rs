//! Mapping from a verification result to an [`AuthOutcome`]
//!
//! [`resolve_outcome`] is the single step from "the provider call finished"
//! to "an outcome exists". Its error branch absorbs every failure, so the
//! caller never sees a raw provider or transport error.

use crate::identity::{VerificationError, VerificationResponse};
use crate::models::AuthOutcome;
use chrono::{DateTime, TimeDelta, Utc};

pub const EMAIL_EXISTS_MESSAGE: &str = "This email exists already";
pub const EMAIL_NOT_FOUND_MESSAGE: &str = "This email does not exist.";
pub const INVALID_PASSWORD_MESSAGE: &str = "This password is not correct.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred!";

/// Translate a provider error code into a user-facing message.
///
/// Total over all inputs: unrecognised or missing codes yield
/// [`UNKNOWN_ERROR_MESSAGE`] and the raw code is never surfaced.
#[must_use]
pub fn classify_error_code(code: Option<&str>) -> &'static str {
    match code {
        Some("EMAIL_EXISTS") => EMAIL_EXISTS_MESSAGE,
        Some("EMAIL_NOT_FOUND") => EMAIL_NOT_FOUND_MESSAGE,
        Some("INVALID_PASSWORD") => INVALID_PASSWORD_MESSAGE,
        _ => UNKNOWN_ERROR_MESSAGE,
    }
}

/// Failure message for any verification error
#[must_use]
pub fn failure_message(error: &VerificationError) -> &'static str {
    classify_error_code(error.provider_code())
}

/// Absolute expiration for a token issued at `now` with a lifetime of `expires_in` seconds
#[must_use]
pub fn expiration_instant(now: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(expires_in).and_then(|lifetime| now.checked_add_signed(lifetime))
}

/// Turn the result of one verification call into exactly one outcome
#[must_use]
pub fn resolve_outcome(
    result: Result<VerificationResponse, VerificationError>,
    now: DateTime<Utc>,
) -> AuthOutcome {
    let response = match result {
        Ok(response) => response,
        Err(error) => {
            crate::utils::LoggingHelper::log_verification_failure(&error);
            return AuthOutcome::failure(failure_message(&error));
        }
    };

    let Some(expires_at) = response
        .expires_in_seconds()
        .ok()
        .and_then(|seconds| expiration_instant(now, seconds))
    else {
        log::warn!(
            "Provider returned an unusable expiresIn value: {:?}",
            response.expires_in
        );
        return AuthOutcome::failure(UNKNOWN_ERROR_MESSAGE);
    };

    AuthOutcome::Success {
        email: response.email,
        user_id: response.local_id,
        token: response.id_token,
        expiration_instant: expires_at,
    }
}
