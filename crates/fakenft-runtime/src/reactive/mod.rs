#![forbid(unsafe_code)]

//! Reactive state bindings between view-models and views.
//!
//! This module provides change-notification primitives:
//!
//! - [`ObservableBox`]: a shared, version-tracked value that notifies every
//!   registered subscriber on every write.
//! - [`ReadOnlyObservable`]: the read/subscribe-only surface a view-model
//!   hands to its view.
//! - [`SubscriptionHandle`]: RAII token that unsubscribes on drop or on
//!   explicit [`SubscriptionHandle::dispose`].
//! - [`Binding`]: a lazily evaluated value derived from an observable.
//!
//! # Architecture
//!
//! `ObservableBox<T>` uses `Arc<Mutex<..>>` so completions arriving on a
//! worker thread can write into state owned by the UI thread. Subscribers
//! run synchronously on the writer's thread, outside the state lock.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per write. Writes are never
//!    deduplicated, so writing an equal value still notifies.
//! 2. Subscribers are notified in registration order.
//! 3. Subscribing does not replay the current value.
//! 4. A subscriber registered during a notification round is not called for
//!    that round.
//! 5. Notifications for one box are delivered in write order, across threads.
//! 6. Writing to a box from inside its own notification round, on the same
//!    thread, is rejected ([`ReentrantWrite`]).

pub mod binding;
pub mod observable;

pub use binding::Binding;
pub use observable::{ObservableBox, ReadOnlyObservable, ReentrantWrite, SubscriptionHandle};
