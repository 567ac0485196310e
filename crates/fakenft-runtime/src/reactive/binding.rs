#![forbid(unsafe_code)]

//! Derived values computed from an observable.
//!
//! A [`Binding<U>`] pairs a source [`ReadOnlyObservable`] with a transform.
//! View-models use it for display state that is a pure function of a box,
//! such as "show the refresh stub while the list is empty".
//!
//! # Invariants
//!
//! 1. `Binding::get()` always reflects the source's current value (no
//!    caching); the transform runs on every call.
//! 2. `Binding::subscribe` delivers the transformed value once per source
//!    write, with the same ordering guarantees as the source.
//! 3. Bindings are `Clone` and share their source.
//!
//! # Failure Modes
//!
//! - Transform panic: propagates to the caller of `get()` or to the writer of
//!   the source box for subscribers.
//! - Transforms run under the source's state lock during `get()` and must
//!   not touch the source.

use std::fmt;
use std::sync::Arc;

use super::observable::{ReadOnlyObservable, SubscriptionHandle};

type Listener<U> = Box<dyn Fn(&U) + Send + Sync>;

/// A lazily evaluated value derived from an observable.
pub struct Binding<U> {
    eval: Arc<dyn Fn() -> U + Send + Sync>,
    subscribe: Arc<dyn Fn(Listener<U>) -> SubscriptionHandle + Send + Sync>,
}

impl<U> Clone for Binding<U> {
    fn clone(&self) -> Self {
        Self {
            eval: Arc::clone(&self.eval),
            subscribe: Arc::clone(&self.subscribe),
        }
    }
}

impl<U: fmt::Debug + 'static> fmt::Debug for Binding<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<U: 'static> Binding<U> {
    pub(crate) fn new<T, F>(source: ReadOnlyObservable<T>, map: F) -> Self
    where
        T: Clone + Send + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let map = Arc::new(map);

        let eval_source = source.clone();
        let eval_map = Arc::clone(&map);
        let eval = Arc::new(move || eval_source.with(|v| eval_map(v)));

        let subscribe = Arc::new(move |listener: Listener<U>| {
            let map = Arc::clone(&map);
            source.subscribe(move |v| listener(&map(v)))
        });

        Self { eval, subscribe }
    }

    /// Evaluate the binding against the source's current value.
    #[must_use]
    pub fn get(&self) -> U {
        (self.eval)()
    }

    /// Subscribe to the transformed value of every future source write.
    pub fn subscribe(&self, callback: impl Fn(&U) + Send + Sync + 'static) -> SubscriptionHandle {
        (self.subscribe)(Box::new(callback))
    }
}

#[cfg(test)]
mod tests {
    use crate::reactive::ObservableBox;
    use std::sync::{Arc, Mutex};

    #[test]
    fn get_tracks_source() {
        let items = ObservableBox::new(Vec::<u32>::new());
        let empty = items.read_only().map(Vec::is_empty);
        assert!(empty.get());

        items.set(vec![1]);
        assert!(!empty.get());
    }

    #[test]
    fn subscribe_delivers_mapped_value() {
        let count = ObservableBox::new(0);
        let label = count.read_only().map(|c| format!("Count: {c}"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = label.subscribe(move |s: &String| seen_clone.lock().unwrap().push(s.clone()));

        count.set(5);
        count.set(5);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["Count: 5".to_string(), "Count: 5".to_string()]
        );
        assert_eq!(label.get(), "Count: 5");
    }

    #[test]
    fn dropping_binding_subscription_unsubscribes() {
        let count = ObservableBox::new(0);
        let binding = count.read_only().map(|c| c * 2);
        let sub = binding.subscribe(|_| {});
        assert_eq!(count.subscriber_count(), 1);
        drop(sub);
        assert_eq!(count.subscriber_count(), 0);
    }

    #[test]
    fn clone_shares_source() {
        let count = ObservableBox::new(1);
        let a = count.read_only().map(|c| c + 1);
        let b = a.clone();
        count.set(10);
        assert_eq!(a.get(), 11);
        assert_eq!(b.get(), 11);
        assert!(format!("{b:?}").contains("11"));
    }
}
