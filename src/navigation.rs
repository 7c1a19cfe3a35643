//! Post-authentication navigation
//!
//! [`NavigateOnSuccess`] is an [`OutcomeListener`] that asks a [`Navigator`]
//! to move to the application root whenever a successful outcome is
//! published, regardless of who published it. Navigation is fire-and-forget:
//! nothing is awaited, retried or reported back.

use crate::coordinator::hub::OutcomeListener;
use crate::models::AuthOutcome;
use crate::utils::LoggingHelper;
use std::sync::Arc;

/// Application root destination
pub const ROOT_PATH: &str = "/";

/// External navigation service
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, path: &str) {
        self(path);
    }
}

/// Navigator that only records the navigation in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, path: &str) {
        LoggingHelper::log_navigation(path);
    }
}

/// Listener that navigates to a fixed destination on every success
pub struct NavigateOnSuccess {
    navigator: Arc<dyn Navigator>,
    destination: String,
}

impl NavigateOnSuccess {
    #[must_use]
    pub fn new(navigator: Arc<dyn Navigator>, destination: impl Into<String>) -> Self {
        Self {
            navigator,
            destination: destination.into(),
        }
    }

    #[must_use]
    pub fn to_root(navigator: Arc<dyn Navigator>) -> Self {
        Self::new(navigator, ROOT_PATH)
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

impl OutcomeListener for NavigateOnSuccess {
    fn on_outcome(&self, outcome: &AuthOutcome) {
        if outcome.is_success() {
            self.navigator.navigate(&self.destination);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    fn success() -> AuthOutcome {
        AuthOutcome::Success {
            email: "a@b.com".to_string(),
            user_id: "uid".to_string(),
            token: "token".to_string(),
            expiration_instant: Utc::now(),
        }
    }

    #[test]
    fn test_navigates_once_per_success() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let sink = visited.clone();
        let navigator: Arc<dyn Navigator> =
            Arc::new(move |path: &str| sink.lock().unwrap().push(path.to_string()));
        let listener = NavigateOnSuccess::to_root(navigator);

        listener.on_outcome(&success());
        listener.on_outcome(&AuthOutcome::failure("nope"));
        listener.on_outcome(&success());

        assert_eq!(*visited.lock().unwrap(), vec!["/".to_string(), "/".to_string()]);
    }

    #[test]
    fn test_custom_destination() {
        let listener = NavigateOnSuccess::new(Arc::new(LoggingNavigator), "/home");
        assert_eq!(listener.destination(), "/home");
    }
}
