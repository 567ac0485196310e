#![forbid(unsafe_code)]

//! Data-provider contract consumed by the view-models.
//!
//! A provider performs one asynchronous fetch per call and completes exactly
//! once, with either a payload or a [`FetchError`], on whatever thread it
//! likes. The actual networking lives outside this crate; this module only
//! defines the contract and two adapters:
//!
//! - [`FnProvider`]: completes synchronously on the calling thread.
//! - [`BackgroundProvider`]: runs a blocking job on a spawned thread per
//!   call and completes from that thread.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use fakenft_core::FetchError;
use tracing::warn;

/// Completion callback handed to a provider. Called exactly once.
pub type Completion<T> = Box<dyn FnOnce(Result<T, FetchError>) + Send + 'static>;

/// Asynchronous source of `T` values.
pub trait DataProvider<T>: Send + Sync {
    /// Start a fetch. `completion` must be called exactly once.
    fn fetch(&self, completion: Completion<T>);
}

impl<T, P> DataProvider<T> for Arc<P>
where
    P: DataProvider<T> + ?Sized,
{
    fn fetch(&self, completion: Completion<T>) {
        (**self).fetch(completion);
    }
}

/// Provider that runs `job` on the calling thread and completes immediately.
pub struct FnProvider<F> {
    job: F,
}

impl<F> FnProvider<F> {
    pub fn new(job: F) -> Self {
        Self { job }
    }
}

impl<T, F> DataProvider<T> for FnProvider<F>
where
    F: Fn() -> Result<T, FetchError> + Send + Sync,
{
    fn fetch(&self, completion: Completion<T>) {
        completion((self.job)());
    }
}

/// Provider that runs a blocking `job` on a fresh thread for every fetch.
///
/// Overlapping fetches run concurrently and complete in whatever order the
/// jobs finish.
pub struct BackgroundProvider<F> {
    thread_name: String,
    job: Arc<F>,
}

impl<F> BackgroundProvider<F> {
    /// Create a provider whose worker threads are named `thread_name`.
    pub fn new(thread_name: impl Into<String>, job: F) -> Self {
        Self {
            thread_name: thread_name.into(),
            job: Arc::new(job),
        }
    }
}

impl<T, F> DataProvider<T> for BackgroundProvider<F>
where
    T: Send + 'static,
    F: Fn() -> Result<T, FetchError> + Send + Sync + 'static,
{
    fn fetch(&self, completion: Completion<T>) {
        // Shared so the completion can still fire if the spawn itself fails.
        let pending = Arc::new(Mutex::new(Some(completion)));
        let worker_pending = Arc::clone(&pending);
        let job = Arc::clone(&self.job);

        let spawned = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || {
                let result = job();
                if let Some(done) = take(&worker_pending) {
                    done(result);
                }
            });

        if let Err(err) = spawned {
            warn!(thread = %self.thread_name, error = %err, "failed to spawn fetch thread");
            if let Some(done) = take(&pending) {
                done(Err(FetchError::from(err)));
            }
        }
    }
}

fn take<T>(slot: &Mutex<Option<T>>) -> Option<T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}
