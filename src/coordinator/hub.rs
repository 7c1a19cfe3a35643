//! Outcome broadcast hub
//!
//! Every [`AuthOutcome`], whether produced by the coordinator or published by
//! another component, goes through [`OutcomeHub::publish`]. Listeners are
//! fixed when the hub is built and run synchronously for each outcome, after
//! the outcome has been broadcast to channel subscribers.

use crate::models::AuthOutcome;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Default number of outcomes buffered per subscriber
pub const DEFAULT_OUTCOME_CAPACITY: usize = 64;

/// Observer invoked once for every published outcome
pub trait OutcomeListener: Send + Sync {
    fn on_outcome(&self, outcome: &AuthOutcome);
}

struct HubInner {
    sender: broadcast::Sender<AuthOutcome>,
    listeners: Vec<Arc<dyn OutcomeListener>>,
}

/// Cloneable handle to the shared outcome stream
#[derive(Clone)]
pub struct OutcomeHub {
    inner: Arc<HubInner>,
}

impl OutcomeHub {
    /// Create a hub with a fixed set of listeners
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize, listeners: Vec<Arc<dyn OutcomeListener>>) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(HubInner { sender, listeners }),
        }
    }

    /// Receive every outcome published after this call
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthOutcome> {
        self.inner.sender.subscribe()
    }

    /// Broadcast to subscribers, then notify listeners.
    ///
    /// Subscribers already hold the outcome when a listener runs, and a
    /// listener that panics cannot withhold it from them.
    ///
    /// Returns the number of subscribers that received the outcome. Having no
    /// subscribers is not an error.
    pub fn publish(&self, outcome: AuthOutcome) -> usize {
        let delivered = self.inner.sender.send(outcome.clone()).unwrap_or(0);
        for listener in &self.inner.listeners {
            listener.on_outcome(&outcome);
        }
        delivered
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl fmt::Debug for OutcomeHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeHub")
            .field("listeners", &self.inner.listeners.len())
            .field("subscribers", &self.inner.sender.receiver_count())
            .finish()
    }
}
