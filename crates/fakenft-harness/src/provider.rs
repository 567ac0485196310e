#![forbid(unsafe_code)]

//! Deterministic data providers for tests.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use fakenft_core::FetchError;
use fakenft_runtime::provider::{Completion, DataProvider};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Completes every fetch synchronously, on the calling thread, with the next
/// scripted result. An exhausted script fails with `"script exhausted"`.
pub struct ScriptedProvider<T> {
    script: Mutex<VecDeque<Result<T, FetchError>>>,
    calls: AtomicUsize,
}

impl<T> ScriptedProvider<T> {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Result<T, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Append another result to the script.
    pub fn push(&self, result: Result<T, FetchError>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(result);
    }

    /// Number of fetches started so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<T: Send> DataProvider<T> for ScriptedProvider<T> {
    fn fetch(&self, completion: Completion<T>) {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        debug!(call, scripted = next.is_some(), "scripted fetch");
        completion(next.unwrap_or_else(|| Err(FetchError::failed("script exhausted"))));
    }
}

/// Parks every completion until the test resolves it.
///
/// Calls are numbered from 0 in the order `fetch` was invoked, so a test can
/// resolve them in any order to model completions racing each other.
pub struct DeferredProvider<T> {
    pending: Arc<Mutex<Vec<(usize, Completion<T>)>>>,
    calls: AtomicUsize,
}

impl<T> Default for DeferredProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredProvider<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(Vec::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches started so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of fetches still waiting for a result.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn take(&self, call: usize) -> Option<Completion<T>> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let index = pending.iter().position(|(id, _)| *id == call)?;
        Some(pending.remove(index).1)
    }

    /// Complete fetch number `call` on the current thread. Returns `false`
    /// if that call is unknown or already resolved.
    pub fn resolve(&self, call: usize, result: Result<T, FetchError>) -> bool {
        match self.take(call) {
            Some(done) => {
                done(result);
                true
            }
            None => false,
        }
    }
}

impl<T: Send + 'static> DeferredProvider<T> {
    /// Complete fetch number `call` on a fresh thread.
    ///
    /// Returns `None` if that call is unknown or already resolved.
    pub fn resolve_on_thread(
        &self,
        call: usize,
        result: Result<T, FetchError>,
    ) -> Option<JoinHandle<()>> {
        let done = self.take(call)?;
        Some(thread::spawn(move || done(result)))
    }
}

impl<T: Send> DataProvider<T> for DeferredProvider<T> {
    fn fetch(&self, completion: Completion<T>) {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(call, "deferred fetch parked");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((call, completion));
    }
}

/// Decodes `json` into `T` on every fetch. Decoding errors become
/// [`FetchError::FetchFailed`].
pub struct JsonFixtureProvider<T> {
    json: String,
    _payload: PhantomData<fn() -> T>,
}

impl<T> JsonFixtureProvider<T> {
    #[must_use]
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            json: json.into(),
            _payload: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> DataProvider<T> for JsonFixtureProvider<T> {
    fn fetch(&self, completion: Completion<T>) {
        let decoded = serde_json::from_str(&self.json)
            .map_err(|err| FetchError::failed(format!("invalid fixture: {err}")));
        completion(decoded);
    }
}
