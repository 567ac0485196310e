#![forbid(unsafe_code)]

//! Generic list view-model: one fetch source, one sortable list, one error
//! channel.
//!
//! # Data flow
//!
//! ```text
//!  fetch() ──► DataProvider ──► completion (any thread)
//!                                 │
//!                 Ok(items) ──────┼──► items box ──► view re-reads
//!                 Err(reason) ────┴──► error box ──► banner / retry
//! ```
//!
//! # Invariants
//!
//! 1. Each `fetch()` call starts exactly one provider fetch. Overlapping
//!    fetches are not deduplicated; the last completion wins.
//! 2. A failed fetch never touches the items box; the last good list stays.
//! 3. `sort()` with a recognised option rewrites the items box (one
//!    notification even if the order did not change); an unrecognised
//!    option writes nothing.
//! 4. Completions always write, even if every subscriber is gone or the
//!    view-model itself was dropped.

use std::sync::Arc;

use fakenft_core::{FetchError, Sortable, SortingOption, sort_items};
use tracing::{debug, error, info, warn};

use crate::provider::DataProvider;
use crate::reactive::{Binding, ObservableBox, ReadOnlyObservable};

/// Start one fetch and route its completion into `data` or `errors`.
///
/// `into` turns the payload into the box value; `measure` reports a size
/// for the success log line.
pub(crate) fn fetch_into<T, D>(
    screen: &'static str,
    provider: &dyn DataProvider<T>,
    data: &ObservableBox<D>,
    errors: &ObservableBox<Option<String>>,
    into: impl FnOnce(T) -> D + Send + 'static,
    measure: fn(&D) -> usize,
) where
    T: 'static,
    D: Clone + Send + 'static,
{
    debug!(screen, "fetch started");
    let data = data.clone();
    let errors = errors.clone();
    provider.fetch(Box::new(move |result: Result<T, FetchError>| match result {
        Ok(payload) => {
            let value = into(payload);
            info!(screen, count = measure(&value), "fetch succeeded");
            if data.try_set(value).is_err() {
                error!(screen, "fetch completed inside its own data notification; dropped");
            }
        }
        Err(err) => {
            warn!(screen, reason = %err, "fetch failed");
            if errors.try_set(Some(err.to_string())).is_err() {
                error!(screen, "fetch failed inside its own error notification; dropped");
            }
        }
    }));
}

/// Write `None` into `errors`, refusing a write from inside its own
/// notification round.
pub(crate) fn acknowledge(screen: &'static str, errors: &ObservableBox<Option<String>>) -> bool {
    if errors.try_set(None).is_ok() {
        debug!(screen, "error acknowledged");
        true
    } else {
        error!(screen, "error acknowledged inside its own notification; ignored");
        false
    }
}

/// A screen whose state is a sortable list fetched from a provider.
pub struct ListViewModel<T> {
    screen: &'static str,
    provider: Arc<dyn DataProvider<Vec<T>>>,
    items: ObservableBox<Vec<T>>,
    error: ObservableBox<Option<String>>,
}

impl<T> std::fmt::Debug for ListViewModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListViewModel")
            .field("screen", &self.screen)
            .finish_non_exhaustive()
    }
}

impl<T> ListViewModel<T>
where
    T: Sortable + Clone + Send + 'static,
{
    /// Build an idle view-model with an empty list. `screen` names it in logs.
    pub fn new(screen: &'static str, provider: Arc<dyn DataProvider<Vec<T>>>) -> Self {
        Self {
            screen,
            provider,
            items: ObservableBox::new(Vec::new()),
            error: ObservableBox::new(None),
        }
    }

    /// Start one fetch. See the module docs for completion semantics.
    pub fn fetch(&self) {
        fetch_into(
            self.screen,
            self.provider.as_ref(),
            &self.items,
            &self.error,
            |items| items,
            Vec::len,
        );
    }

    /// Re-sort the current list by `option`. Returns whether anything was
    /// written.
    pub fn sort(&self, option: SortingOption) -> bool {
        if !T::recognises(option) {
            debug!(screen = self.screen, %option, applied = false, "sort ignored");
            return false;
        }
        let written = self
            .items
            .try_update(|items| {
                sort_items(items, option);
            })
            .is_ok();
        if written {
            debug!(screen = self.screen, %option, applied = true, "sorted");
        } else {
            error!(
                screen = self.screen,
                %option,
                "sort requested from inside the list's own notification; ignored"
            );
        }
        written
    }

    /// Read-only list state for the view.
    #[must_use]
    pub fn items_observable(&self) -> ReadOnlyObservable<Vec<T>> {
        self.items.read_only()
    }

    /// Read-only error state: `Some(message)` after a failed fetch until
    /// [`Self::acknowledge_error`] is called.
    #[must_use]
    pub fn error_observable(&self) -> ReadOnlyObservable<Option<String>> {
        self.error.read_only()
    }

    /// Clear the error once the view has shown it. Returns whether the
    /// error box was written.
    ///
    /// Called from inside an error-box subscriber on the notifying thread,
    /// the write is rejected and the error stays set.
    pub fn acknowledge_error(&self) -> bool {
        acknowledge(self.screen, &self.error)
    }

    /// `true` while the list is empty (the "pull to refresh" stub).
    #[must_use]
    pub fn refresh_stub_visible(&self) -> Binding<bool> {
        self.items.read_only().map(Vec::is_empty)
    }

    /// Snapshot of the current list.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.items.get()
    }

    /// Clone of the item at `index`, if any.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<T> {
        self.items.with(|items| items.get(index).cloned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.with(Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FnProvider;
    use fakenft_core::UserRating;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn users() -> Vec<UserRating> {
        vec![
            UserRating::new("1", "Cid", 10),
            UserRating::new("2", "Ann", 30),
            UserRating::new("3", "Bob", 20),
        ]
    }

    fn ok_provider() -> Arc<dyn DataProvider<Vec<UserRating>>> {
        Arc::new(FnProvider::new(|| Ok::<_, FetchError>(users())))
    }

    fn names(vm: &ListViewModel<UserRating>) -> Vec<String> {
        vm.items().into_iter().map(|u| u.name).collect()
    }

    #[test]
    fn starts_empty_and_idle() {
        let vm = ListViewModel::new("test", ok_provider());
        assert!(vm.is_empty());
        assert!(vm.refresh_stub_visible().get());
        assert_eq!(vm.error_observable().get(), None);
        assert_eq!(vm.items_observable().version(), 0);
    }

    #[test]
    fn fetch_success_writes_items_once() {
        let vm = ListViewModel::new("test", ok_provider());
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let _sub = vm.items_observable().subscribe(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        vm.fetch();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(vm.len(), 3);
        assert!(!vm.refresh_stub_visible().get());
        assert_eq!(vm.item(1).map(|u| u.name), Some("Ann".to_string()));
        assert_eq!(vm.item(9), None);
    }

    #[test]
    fn sort_recognised_and_unrecognised() {
        let vm = ListViewModel::new("test", ok_provider());
        vm.fetch();
        let before = vm.items_observable().version();

        assert!(vm.sort(SortingOption::ByName));
        assert_eq!(names(&vm), vec!["Ann", "Bob", "Cid"]);
        assert!(vm.sort(SortingOption::ByRating));
        assert_eq!(names(&vm), vec!["Ann", "Bob", "Cid"]);
        assert_eq!(vm.items_observable().version(), before + 2);

        assert!(!vm.sort(SortingOption::ByQuantity));
        assert!(!vm.sort(SortingOption::Close));
        assert_eq!(vm.items_observable().version(), before + 2);
    }

    #[test]
    fn sort_from_own_subscriber_is_ignored() {
        let vm = Arc::new(ListViewModel::new("test", ok_provider()));
        let outcome = Arc::new(Mutex::new(None));
        let vm_inner = Arc::clone(&vm);
        let outcome_inner = Arc::clone(&outcome);
        let _sub = vm.items_observable().subscribe(move |_| {
            let applied = vm_inner.sort(SortingOption::ByName);
            *outcome_inner.lock().unwrap() = Some(applied);
        });

        vm.fetch();
        assert_eq!(*outcome.lock().unwrap(), Some(false));
        assert_eq!(names(&vm), vec!["Cid", "Ann", "Bob"]);
    }

    #[test]
    fn failure_leaves_items_and_sets_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let provider: Arc<dyn DataProvider<Vec<UserRating>>> =
            Arc::new(FnProvider::new(move || {
                if calls_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(users())
                } else {
                    Err(FetchError::failed("network down"))
                }
            }));
        let vm = ListViewModel::new("test", provider);

        vm.fetch();
        let version = vm.items_observable().version();
        vm.fetch();

        assert_eq!(vm.items_observable().version(), version);
        assert_eq!(vm.len(), 3);
        assert_eq!(vm.error_observable().get(), Some("network down".to_string()));

        assert!(vm.acknowledge_error());
        assert_eq!(vm.error_observable().get(), None);
    }

    #[test]
    fn acknowledge_from_error_subscriber_is_ignored() {
        let provider: Arc<dyn DataProvider<Vec<UserRating>>> =
            Arc::new(FnProvider::new(|| {
                Err::<Vec<UserRating>, _>(FetchError::failed("network down"))
            }));
        let vm = Arc::new(ListViewModel::new("test", provider));
        let outcome = Arc::new(Mutex::new(Vec::new()));
        let vm_inner = Arc::clone(&vm);
        let outcome_inner = Arc::clone(&outcome);
        let _sub = vm.error_observable().subscribe(move |_| {
            let cleared = vm_inner.acknowledge_error();
            outcome_inner.lock().unwrap().push(cleared);
        });

        vm.fetch();

        assert_eq!(*outcome.lock().unwrap(), vec![false]);
        assert_eq!(vm.error_observable().get(), Some("network down".to_string()));

        // Outside the round the same call goes through and notifies once.
        assert!(vm.acknowledge_error());
        assert_eq!(vm.error_observable().get(), None);
        assert_eq!(*outcome.lock().unwrap(), vec![false, false]);
    }

    #[test]
    fn debug_names_screen() {
        let vm = ListViewModel::new("statistic", ok_provider());
        assert!(format!("{vm:?}").contains("statistic"));
    }
}
