#![forbid(unsafe_code)]

//! Observable value box with change notification and version tracking.
//!
//! # Design
//!
//! [`ObservableBox<T>`] wraps a value of type `T` in shared, reference-counted
//! storage (`Arc<Mutex<..>>`). Every write stores the value, bumps the
//! version, and then invokes every live subscriber in registration order,
//! synchronously, on the writing thread. There is no equality check: a write
//! of an identical value still notifies.
//!
//! # Performance
//!
//! | Operation     | Complexity                 |
//! |---------------|----------------------------|
//! | `get()`       | O(1) + clone of `T`        |
//! | `set()`       | O(S) where S = subscribers |
//! | `subscribe()` | O(1) amortized             |
//! | `dispose()`   | O(S)                       |
//!
//! # Threading
//!
//! Writes are serialized by a per-box write gate that is held for the whole
//! write-and-notify round, so two threads writing the same box produce two
//! complete rounds in the order the gate was acquired. Readers only take the
//! short state lock and never wait for subscriber code.
//!
//! Subscribers run on the writer's thread. Anything that must happen on the
//! UI thread has to be marshalled there by the subscriber itself (see
//! [`crate::dispatch::on_main`]).
//!
//! # Failure Modes
//!
//! - **Re-entrant write**: writing to a box from within one of its own
//!   subscriber callbacks on the same thread is rejected. `try_set` returns
//!   [`ReentrantWrite`]; `set` panics. A feedback loop through the same box
//!   indicates a design bug in the subscriber graph.
//! - **Cross-thread write from a callback that then blocks on it**: a
//!   callback that waits for another thread which itself writes to the same
//!   box deadlocks on the write gate.
//! - **Opposite-order writes across boxes**: a callback of box X may write
//!   box Y, but if another thread's round on Y writes X at the same time,
//!   each thread holds one write gate and waits for the other forever.
//!   Boxes that write each other from callbacks must always be written in
//!   the same order, or hand the second write to another queue (see
//!   [`crate::dispatch::MainHandle::dispatch`]).
//! - **Disposal racing a notification**: a round that already started
//!   calling a subscriber on another thread finishes that one call. Every
//!   round that reaches the subscriber after `dispose` returns skips it, so
//!   a disposed callback sees at most one more notification and never one
//!   for a write that began after disposal.
//! - **Panicking subscriber**: the panic propagates to the writer. The value
//!   is already stored; later writes proceed normally.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, ThreadId};

use super::binding::Binding;

type Callback<T> = dyn Fn(&T) + Send + Sync;

/// Lock a mutex, recovering the data if a subscriber panicked while a guard
/// was held. The stored value is always written before any callback runs,
/// so a poisoned lock never exposes a half-written state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A registered callback.
struct Slot<T> {
    id: u64,
    /// Cleared by the handle before the slot leaves the list.
    active: Arc<AtomicBool>,
    callback: Box<Callback<T>>,
}

struct State<T> {
    value: T,
    version: u64,
    subscribers: Vec<Arc<Slot<T>>>,
    /// Thread currently running a notification round.
    notifying: Option<ThreadId>,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    /// Held across a full write + notify round.
    write_gate: Mutex<()>,
    next_id: AtomicU64,
}

/// Type-erased removal hook so [`SubscriptionHandle`] need not be generic.
trait Detach: Send + Sync {
    fn remove(&self, id: u64);
}

impl<T: Send> Detach for Shared<T> {
    fn remove(&self, id: u64) {
        lock(&self.state).subscribers.retain(|slot| slot.id != id);
    }
}

/// Clears the `notifying` marker when a round ends, including by unwinding.
struct RoundGuard<'a, T> {
    shared: &'a Shared<T>,
}

impl<T> Drop for RoundGuard<'_, T> {
    fn drop(&mut self) {
        lock(&self.shared.state).notifying = None;
    }
}

/// Error returned when a box is written from inside its own notification
/// round on the same thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReentrantWrite;

impl fmt::Display for ReentrantWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("observable box written from inside its own notification")
    }
}

impl std::error::Error for ReentrantWrite {}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `ObservableBox` creates a new handle to the **same** inner
/// state: both handles see the same value and share subscribers. View-models
/// clone their boxes into asynchronous completions and expose only
/// [`ReadOnlyObservable`]s to views.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each write.
/// 2. Each live subscriber is called exactly once per write, in registration
///    order, with the value that write stored.
/// 3. Subscribing never replays the current value.
pub struct ObservableBox<T> {
    shared: Arc<Shared<T>>,
}

// Manual Clone: shares the same Arc.
impl<T> Clone for ObservableBox<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.shared.state);
        f.debug_struct("ObservableBox")
            .field("value", &state.value)
            .field("version", &state.version)
            .field("subscriber_count", &state.subscribers.len())
            .finish()
    }
}

impl<T: Default + Clone + Send + 'static> Default for ObservableBox<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + 'static> ObservableBox<T> {
    /// Create a box holding `value`. The initial version is 0 and no
    /// subscribers are registered.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    value,
                    version: 0,
                    subscribers: Vec::new(),
                    notifying: None,
                }),
                write_gate: Mutex::new(()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        lock(&self.shared.state).value.clone()
    }

    /// Access the current value by reference without cloning.
    ///
    /// `f` runs under the state lock and must not touch this box.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.shared.state).value)
    }

    /// Replace the value and notify every subscriber.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from within one of this box's
    /// subscriber callbacks on the same thread. Use [`Self::try_set`] to
    /// handle that case.
    pub fn set(&self, value: T) {
        if let Err(err) = self.try_set(value) {
            panic!("{err}");
        }
    }

    /// Replace the value and notify every subscriber, or reject the write if
    /// it was issued from inside this box's own notification round.
    pub fn try_set(&self, value: T) -> Result<(), ReentrantWrite> {
        self.write(move |slot| *slot = value)
    }

    /// Modify the value in place and notify every subscriber once.
    ///
    /// `f` runs under the state lock and must not touch this box.
    ///
    /// # Panics
    ///
    /// Panics on a re-entrant write, like [`Self::set`].
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        if let Err(err) = self.try_update(f) {
            panic!("{err}");
        }
    }

    /// Fallible form of [`Self::update`].
    pub fn try_update(&self, f: impl FnOnce(&mut T)) -> Result<(), ReentrantWrite> {
        self.write(f)
    }

    /// Subscribe to future writes. The callback is not invoked with the
    /// current value.
    ///
    /// Returns a [`SubscriptionHandle`]. Disposing or dropping it
    /// unsubscribes the callback.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionHandle {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        let slot = Arc::new(Slot {
            id,
            active: Arc::clone(&active),
            callback: Box::new(callback),
        });
        lock(&self.shared.state).subscribers.push(slot);

        let owner: Weak<dyn Detach> = Arc::downgrade(&self.shared) as Weak<dyn Detach>;
        SubscriptionHandle {
            id,
            active,
            owner: Some(owner),
        }
    }

    /// Current version number. Increments by 1 on each write.
    #[must_use]
    pub fn version(&self) -> u64 {
        lock(&self.shared.state).version
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared.state).subscribers.len()
    }

    /// The read/subscribe-only view of this box.
    #[must_use]
    pub fn read_only(&self) -> ReadOnlyObservable<T> {
        ReadOnlyObservable {
            inner: self.clone(),
        }
    }

    fn write(&self, f: impl FnOnce(&mut T)) -> Result<(), ReentrantWrite> {
        let me = thread::current().id();
        if lock(&self.shared.state).notifying == Some(me) {
            return Err(ReentrantWrite);
        }

        let _gate = lock(&self.shared.write_gate);
        let (value, subscribers) = {
            let mut state = lock(&self.shared.state);
            f(&mut state.value);
            state.version += 1;
            state.notifying = Some(me);
            (state.value.clone(), state.subscribers.clone())
        };
        let _round = RoundGuard {
            shared: &self.shared,
        };

        // Callbacks run outside the state lock against a snapshot of the
        // subscriber list taken at write time.
        for slot in &subscribers {
            if slot.active.load(Ordering::Acquire) {
                (slot.callback)(&value);
            }
        }
        Ok(())
    }
}

/// Read/subscribe-only view of an [`ObservableBox`].
///
/// This is the surface a view-model exposes to its view: the view can read
/// the current value and subscribe, but cannot write.
pub struct ReadOnlyObservable<T> {
    inner: ObservableBox<T>,
}

impl<T> Clone for ReadOnlyObservable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnlyObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnlyObservable").field(&self.inner).finish()
    }
}

impl<T: Clone + Send + 'static> ReadOnlyObservable<T> {
    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// Subscribe to future writes. No replay of the current value.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionHandle {
        self.inner.subscribe(callback)
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.version()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscriber_count()
    }

    /// Derive a lazily evaluated [`Binding`] from this observable.
    pub fn map<U, F>(&self, f: F) -> Binding<U>
    where
        U: 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        Binding::new(self.clone(), f)
    }
}

/// Token for a registered subscriber callback.
///
/// Dropping the handle or calling [`Self::dispose`] removes the callback.
/// [`Self::detach`] keeps it registered for the lifetime of the box.
pub struct SubscriptionHandle {
    id: u64,
    active: Arc<AtomicBool>,
    owner: Option<Weak<dyn Detach>>,
}

impl SubscriptionHandle {
    /// Unsubscribe now. Rounds that have not yet reached this callback skip it.
    pub fn dispose(mut self) {
        self.release();
    }

    /// Keep the callback registered for as long as the box lives.
    pub fn detach(mut self) {
        self.owner = None;
    }

    /// Whether the callback is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    fn release(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(owner) = self.owner.take().and_then(|weak| weak.upgrade()) {
            owner.remove(self.id);
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if self.owner.is_some() {
            self.release();
        }
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
