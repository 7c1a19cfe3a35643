//! Testing utilities for the coordinator
//!
//! - [`fixtures`] - Pre-built provider replies and credentials
//! - [`mock`] - Scripted identity provider, recording navigator and fixed clock
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relyingparty::testing::{fixtures::TestFixtures, mock::MockIdentityProvider};
//!
//! let provider = MockIdentityProvider::succeeding(TestFixtures::verification_response("3600"));
//! assert_eq!(provider.call_count(), 0);
//! ```

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;
pub use mock::{FixedClock, MockIdentityProvider, RecordingNavigator};

/// Common test constants
pub mod constants {
    /// Default test email address
    pub const TEST_EMAIL: &str = "a@b.com";

    /// Default test password
    pub const TEST_PASSWORD: &str = "x";

    /// Default provider user id
    pub const TEST_LOCAL_ID: &str = "test-local-id";

    /// Default ID token
    pub const TEST_ID_TOKEN: &str = "test-id-token";

    /// Fake API key, never valid against a real provider
    pub const TEST_API_KEY: &str = "fake-api-key";

    /// Reference instant used by scenario tests, in epoch milliseconds
    pub const TEST_NOW_MILLIS: i64 = 1_000_000_000_000;
}
