#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the relyingparty crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod coordinator;
pub mod identity;
pub mod models;
pub mod navigation;
pub mod settings;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use coordinator::{AuthCoordinator, OutcomeHub, OutcomeListener};
pub use identity::{HttpIdentityProvider, IdentityProvider, IdentityProviderConfig};
pub use models::{AuthIntent, AuthOutcome, Credentials};
pub use navigation::{LoggingNavigator, Navigator};
pub use settings::CoordinatorSettings;
