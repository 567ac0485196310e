#![forbid(unsafe_code)]

//! Main-thread dispatch queue.
//!
//! Observable boxes notify on the writer's thread, which for fetch results
//! is usually a worker. UI-affecting reactions have to hop onto the thread
//! that owns the UI. [`MainQueue`] is that hop: the UI thread owns the queue
//! and drains it from its event loop, while any thread can push jobs through
//! a cloned [`MainHandle`].
//!
//! # Ordering
//!
//! Jobs run in the order they were dispatched (FIFO per sender, and
//! channel order across senders). Jobs dispatched while draining are picked
//! up by the same `drain()` call.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::thread::{self, ThreadId};
use std::time::Duration;

use tracing::trace;

type Job = Box<dyn FnOnce() + Send>;

/// Queue of jobs owned by the UI thread.
pub struct MainQueue {
    sender: mpsc::Sender<Job>,
    receiver: mpsc::Receiver<Job>,
    owner: ThreadId,
}

/// Cloneable, thread-safe handle for pushing jobs onto a [`MainQueue`].
#[derive(Clone)]
pub struct MainHandle {
    sender: mpsc::Sender<Job>,
}

impl std::fmt::Debug for MainHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainHandle").finish_non_exhaustive()
    }
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MainQueue {
    /// Create a queue owned by the current thread.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            owner: thread::current().id(),
        }
    }

    /// A handle other threads can dispatch through.
    #[must_use]
    pub fn handle(&self) -> MainHandle {
        MainHandle {
            sender: self.sender.clone(),
        }
    }

    /// Whether the caller is the thread that created the queue.
    #[must_use]
    pub fn is_main_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Run every queued job. Returns the number of jobs run.
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(job) => {
                    job();
                    ran += 1;
                }
                // The queue holds its own sender, so it never disconnects.
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        if ran > 0 {
            trace!(ran, "main queue drained");
        }
        ran
    }

    /// Wait up to `timeout` for a job, then drain. Returns the number of
    /// jobs run (0 on timeout).
    pub fn run_for(&self, timeout: Duration) -> usize {
        match self.receiver.recv_timeout(timeout) {
            Ok(job) => {
                job();
                1 + self.drain()
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => 0,
        }
    }
}

impl MainHandle {
    /// Queue `job` for the UI thread. Returns `false` if the queue is gone.
    pub fn dispatch(&self, job: impl FnOnce() + Send + 'static) -> bool {
        self.sender.send(Box::new(job)).is_ok()
    }
}

/// Wrap a UI reaction so it runs on the main queue instead of the writer's
/// thread. The notified value is cloned into the job.
///
/// ```ignore
/// let main = MainQueue::new();
/// let _sub = vm.items_observable().subscribe(on_main(main.handle(), |items| {
///     reload_table(items);
/// }));
/// ```
pub fn on_main<T, F>(handle: MainHandle, reaction: F) -> impl Fn(&T) + Send + Sync + 'static
where
    T: Clone + Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    let reaction = Arc::new(reaction);
    move |value: &T| {
        let reaction = Arc::clone(&reaction);
        let value = value.clone();
        handle.dispatch(move || reaction(value));
    }
}
