//! Authentication coordinator
//!
//! Turns intents into outcomes. Every login intent runs as its own task: a
//! newer intent never cancels an older in-flight call, so outcomes are
//! published in the order their calls complete.

use crate::coordinator::hub::{OutcomeHub, OutcomeListener, DEFAULT_OUTCOME_CAPACITY};
use crate::coordinator::outcome::resolve_outcome;
use crate::identity::{
    HttpIdentityProvider, IdentityProvider, IdentityProviderConfig, VerificationRequest,
};
use crate::models::{AuthIntent, AuthOutcome, Credentials};
use crate::navigation::{NavigateOnSuccess, Navigator, ROOT_PATH};
use crate::utils::{Clock, LoggingHelper, SystemClock};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Coordinates login and signup intents against the identity provider
#[derive(Clone)]
pub struct AuthCoordinator {
    provider: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    hub: OutcomeHub,
}

impl AuthCoordinator {
    /// Create a coordinator talking to the HTTP identity provider.
    ///
    /// The navigation listener is registered here, once, and navigates to
    /// [`ROOT_PATH`] on every successful outcome.
    #[must_use]
    pub fn new(config: IdentityProviderConfig, navigator: Arc<dyn Navigator>) -> Self {
        Self::builder(Arc::new(HttpIdentityProvider::new(config)), navigator).build()
    }

    #[must_use]
    pub fn builder(
        provider: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> AuthCoordinatorBuilder {
        AuthCoordinatorBuilder::new(provider, navigator)
    }

    /// Handle to the outcome stream, for subscribing or publishing outcomes
    /// produced elsewhere
    #[must_use]
    pub fn hub(&self) -> &OutcomeHub {
        &self.hub
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthOutcome> {
        self.hub.subscribe()
    }

    /// Dispatch one intent.
    ///
    /// Returns the handle of the spawned login task, or `None` for intents
    /// that do not start a call.
    pub fn handle_intent(&self, intent: AuthIntent) -> Option<JoinHandle<AuthOutcome>> {
        LoggingHelper::log_intent_received(&intent);
        match intent {
            AuthIntent::Login(credentials) => Some(self.handle_login_intent(credentials)),
            AuthIntent::Signup(credentials) => {
                self.handle_signup_intent(credentials);
                None
            }
        }
    }

    /// Start an independent login attempt.
    ///
    /// Must be called from within a tokio runtime. Dropping the returned
    /// handle does not cancel the attempt; its outcome is still published.
    pub fn handle_login_intent(&self, credentials: Credentials) -> JoinHandle<AuthOutcome> {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.login(credentials).await })
    }

    /// Accept a signup intent.
    ///
    /// No provider call is made and no outcome is published.
    pub fn handle_signup_intent(&self, credentials: Credentials) {
        LoggingHelper::log_signup_ignored(&credentials.email);
    }

    /// Perform one login attempt in the current task and publish its outcome
    pub async fn login(&self, credentials: Credentials) -> AuthOutcome {
        let request = VerificationRequest::from(credentials);
        let result = self.provider.verify_password(&request).await;

        let outcome = resolve_outcome(result, self.clock.now());
        LoggingHelper::log_outcome(&outcome);
        self.hub.publish(outcome.clone());
        outcome
    }

    /// Consume intents until every sender is dropped.
    ///
    /// Login tasks still in flight when the channel closes keep running and
    /// publish their outcomes when they complete.
    pub async fn run(self, mut intents: mpsc::Receiver<AuthIntent>) {
        log::info!("🚀 Authentication coordinator started");
        while let Some(intent) = intents.recv().await {
            self.handle_intent(intent);
        }
        log::info!("Intent channel closed, coordinator stopping");
    }
}

impl fmt::Debug for AuthCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCoordinator")
            .field("hub", &self.hub)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AuthCoordinator`]
pub struct AuthCoordinatorBuilder {
    provider: Arc<dyn IdentityProvider>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
    destination: String,
    capacity: usize,
    listeners: Vec<Arc<dyn OutcomeListener>>,
}

impl AuthCoordinatorBuilder {
    fn new(provider: Arc<dyn IdentityProvider>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            provider,
            navigator,
            clock: Arc::new(SystemClock),
            destination: ROOT_PATH.to_string(),
            capacity: DEFAULT_OUTCOME_CAPACITY,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Destination used by the success navigation, `/` unless overridden
    #[must_use]
    pub fn with_root_path(mut self, path: impl Into<String>) -> Self {
        self.destination = path.into();
        self
    }

    /// Per-subscriber outcome buffer size. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_outcome_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Register an additional listener, notified after navigation
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn OutcomeListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    #[must_use]
    pub fn build(self) -> AuthCoordinator {
        let mut listeners: Vec<Arc<dyn OutcomeListener>> =
            vec![Arc::new(NavigateOnSuccess::new(self.navigator, self.destination))];
        listeners.extend(self.listeners);

        AuthCoordinator {
            provider: self.provider,
            clock: self.clock,
            hub: OutcomeHub::new(self.capacity, listeners),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::outcome::UNKNOWN_ERROR_MESSAGE;
    use crate::identity::{VerificationError, VerificationResponse};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StaticProvider {
        result: Result<VerificationResponse, VerificationError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IdentityProvider for StaticProvider {
        async fn verify_password(
            &self,
            _request: &VerificationRequest,
        ) -> Result<VerificationResponse, VerificationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    struct FrozenClock;

    impl Clock for FrozenClock {
        fn now(&self) -> chrono::DateTime<Utc> {
            Utc.timestamp_millis_opt(1_000_000_000_000).unwrap()
        }
    }

    fn ok_response() -> VerificationResponse {
        VerificationResponse {
            kind: None,
            id_token: "id-token".to_string(),
            email: "a@b.com".to_string(),
            refresh_token: "refresh-token".to_string(),
            expires_in: "3600".to_string(),
            local_id: "uid-1".to_string(),
            registered: Some(true),
        }
    }

    fn setup(
        result: Result<VerificationResponse, VerificationError>,
    ) -> (AuthCoordinator, Arc<StaticProvider>, Arc<Mutex<Vec<String>>>) {
        let provider = Arc::new(StaticProvider {
            result,
            calls: AtomicUsize::new(0),
        });
        let visited = Arc::new(Mutex::new(Vec::new()));
        let sink = visited.clone();
        let coordinator = AuthCoordinator::builder(
            provider.clone(),
            Arc::new(move |path: &str| sink.lock().unwrap().push(path.to_string())),
        )
        .with_clock(Arc::new(FrozenClock))
        .build();
        (coordinator, provider, visited)
    }

    #[tokio::test]
    async fn test_login_success_publishes_and_navigates() {
        let (coordinator, provider, visited) = setup(Ok(ok_response()));
        let mut outcomes = coordinator.subscribe();

        let outcome = coordinator
            .handle_login_intent(Credentials::new("a@b.com", "x"))
            .await
            .unwrap();

        assert_eq!(outcome.expiration_millis(), Some(1_000_003_600_000));
        assert_eq!(outcomes.recv().await.unwrap(), outcome);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*visited.lock().unwrap(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn test_login_failure_does_not_navigate() {
        let (coordinator, _, visited) =
            setup(Err(VerificationError::Transport("down".to_string())));

        let outcome = coordinator.login(Credentials::new("a@b.com", "x")).await;

        assert_eq!(outcome, AuthOutcome::failure(UNKNOWN_ERROR_MESSAGE));
        assert!(visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_signup_is_accepted_without_call_or_outcome() {
        let (coordinator, provider, visited) = setup(Ok(ok_response()));
        let mut outcomes = coordinator.subscribe();

        let handle =
            coordinator.handle_intent(AuthIntent::Signup(Credentials::new("a@b.com", "x")));

        assert!(handle.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(matches!(
            outcomes.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
        assert!(visited.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_store_has_success_when_navigation_runs() {
        let store: Arc<Mutex<Option<broadcast::Receiver<AuthOutcome>>>> =
            Arc::new(Mutex::new(None));
        let seen_at_navigation = Arc::new(Mutex::new(Vec::new()));

        let (store_handle, seen) = (store.clone(), seen_at_navigation.clone());
        let coordinator = AuthCoordinator::builder(
            Arc::new(StaticProvider {
                result: Ok(ok_response()),
                calls: AtomicUsize::new(0),
            }),
            Arc::new(move |_path: &str| {
                let received = store_handle
                    .lock()
                    .unwrap()
                    .as_mut()
                    .and_then(|rx| rx.try_recv().ok());
                seen.lock().unwrap().push(received.is_some_and(|o| o.is_success()));
            }),
        )
        .with_clock(Arc::new(FrozenClock))
        .build();
        *store.lock().unwrap() = Some(coordinator.subscribe());

        coordinator.login(Credentials::new("a@b.com", "x")).await;

        assert_eq!(*seen_at_navigation.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn test_external_success_triggers_navigation() {
        let (coordinator, provider, visited) = setup(Ok(ok_response()));

        coordinator.hub().publish(AuthOutcome::Success {
            email: "restored@b.com".to_string(),
            user_id: "uid-2".to_string(),
            token: "token".to_string(),
            expiration_instant: Utc::now(),
        });

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(*visited.lock().unwrap(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn test_custom_root_path_and_extra_listener() {
        struct Count(AtomicUsize);
        impl OutcomeListener for Count {
            fn on_outcome(&self, _outcome: &AuthOutcome) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let visited = Arc::new(Mutex::new(Vec::new()));
        let sink = visited.clone();
        let counter = Arc::new(Count(AtomicUsize::new(0)));
        let coordinator = AuthCoordinator::builder(
            Arc::new(StaticProvider {
                result: Ok(ok_response()),
                calls: AtomicUsize::new(0),
            }),
            Arc::new(move |path: &str| sink.lock().unwrap().push(path.to_string())),
        )
        .with_root_path("/recipes")
        .with_listener(counter.clone())
        .with_outcome_capacity(0)
        .build();

        coordinator.login(Credentials::new("a@b.com", "x")).await;

        assert_eq!(*visited.lock().unwrap(), vec!["/recipes".to_string()]);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.hub().listener_count(), 2);
    }

    #[tokio::test]
    async fn test_run_stops_when_senders_dropped() {
        let (coordinator, provider, _) = setup(Ok(ok_response()));
        let mut outcomes = coordinator.subscribe();
        let (tx, rx) = mpsc::channel(8);

        let runner = tokio::spawn(coordinator.run(rx));
        tx.send(AuthIntent::Login(Credentials::new("a@b.com", "x")))
            .await
            .unwrap();
        tx.send(AuthIntent::Signup(Credentials::new("new@b.com", "y")))
            .await
            .unwrap();
        drop(tx);

        runner.await.unwrap();
        assert!(outcomes.recv().await.unwrap().is_success());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }
}
