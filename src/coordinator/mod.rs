//! Authentication coordination
//!
//! - [`service`] - the coordinator and its builder
//! - [`outcome`] - verification result to outcome mapping and error classification
//! - [`hub`] - outcome broadcast and listener registration

pub mod hub;
pub mod outcome;
pub mod service;

pub use hub::{OutcomeHub, OutcomeListener, DEFAULT_OUTCOME_CAPACITY};
pub use outcome::{classify_error_code, resolve_outcome, UNKNOWN_ERROR_MESSAGE};
pub use service::{AuthCoordinator, AuthCoordinatorBuilder};
