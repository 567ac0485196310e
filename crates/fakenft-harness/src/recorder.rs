#![forbid(unsafe_code)]

//! Notification capture for assertions.

use std::sync::{Arc, Mutex, PoisonError};

use fakenft_runtime::{ReadOnlyObservable, SubscriptionHandle};

/// Records every value delivered to its callbacks, in delivery order.
///
/// Clones share the same log, so a recorder can be handed to several
/// subscriptions (or threads) and read back from the test.
pub struct Recorder<T> {
    log: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Recorder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of values recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl<T: Clone + Send + 'static> Recorder<T> {
    /// A subscriber callback that appends each notified value.
    pub fn callback(&self) -> impl Fn(&T) + Send + Sync + 'static {
        let log = Arc::clone(&self.log);
        move |value: &T| {
            log.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(value.clone());
        }
    }

    /// Subscribe this recorder to `source`.
    pub fn attach(&self, source: &ReadOnlyObservable<T>) -> SubscriptionHandle {
        source.subscribe(self.callback())
    }

    /// Every recorded value, oldest first.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}
