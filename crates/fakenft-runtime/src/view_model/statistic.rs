#![forbid(unsafe_code)]

//! Statistics screen: users ranked by rating.

use std::sync::Arc;

use fakenft_core::{SortingOption, UserRating};

use super::list::ListViewModel;
use crate::provider::DataProvider;
use crate::reactive::{Binding, ReadOnlyObservable};

/// View-model behind the user rating screen.
///
/// The view fetches each time the screen appears and on pull-to-refresh.
/// Sorting supports [`SortingOption::ByName`] and
/// [`SortingOption::ByRating`] (highest first).
#[derive(Debug)]
pub struct StatisticViewModel {
    list: ListViewModel<UserRating>,
}

impl StatisticViewModel {
    pub fn new(provider: Arc<dyn DataProvider<Vec<UserRating>>>) -> Self {
        Self {
            list: ListViewModel::new("statistic", provider),
        }
    }

    #[must_use]
    pub fn users_rating_observable(&self) -> ReadOnlyObservable<Vec<UserRating>> {
        self.list.items_observable()
    }

    /// `Some(message)` after a failed fetch; the view shows a banner and
    /// stops the refresh spinner.
    #[must_use]
    pub fn network_error_observable(&self) -> ReadOnlyObservable<Option<String>> {
        self.list.error_observable()
    }

    #[must_use]
    pub fn refresh_stub_visible(&self) -> Binding<bool> {
        self.list.refresh_stub_visible()
    }

    pub fn fetch_users_rating(&self) {
        self.list.fetch();
    }

    pub fn sort_users(&self, option: SortingOption) -> bool {
        self.list.sort(option)
    }

    /// See [`ListViewModel::acknowledge_error`].
    pub fn acknowledge_error(&self) -> bool {
        self.list.acknowledge_error()
    }

    /// User in row `index`.
    #[must_use]
    pub fn user(&self, index: usize) -> Option<UserRating> {
        self.list.item(index)
    }

    /// One-based place shown next to the row at `index`.
    #[must_use]
    pub fn place_label(index: usize) -> String {
        (index + 1).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FnProvider;
    use fakenft_core::FetchError;

    fn vm() -> StatisticViewModel {
        StatisticViewModel::new(Arc::new(FnProvider::new(|| {
            Ok::<_, FetchError>(vec![
                UserRating::new("1", "Zoe", 5),
                UserRating::new("2", "Max", 50),
            ])
        })))
    }

    #[test]
    fn does_not_fetch_until_asked() {
        let vm = vm();
        assert!(vm.users_rating_observable().get().is_empty());
        vm.fetch_users_rating();
        assert_eq!(vm.users_rating_observable().get().len(), 2);
    }

    #[test]
    fn sorts_by_rating_then_name() {
        let vm = vm();
        vm.fetch_users_rating();
        assert!(vm.sort_users(SortingOption::ByRating));
        assert_eq!(vm.user(0).map(|u| u.name), Some("Max".to_string()));
        assert!(vm.sort_users(SortingOption::ByName));
        assert_eq!(vm.user(0).map(|u| u.name), Some("Max".to_string()));
        assert_eq!(vm.user(1).map(|u| u.name), Some("Zoe".to_string()));
        assert!(!vm.sort_users(SortingOption::ByQuantity));
    }

    #[test]
    fn place_labels_are_one_based() {
        assert_eq!(StatisticViewModel::place_label(0), "1");
        assert_eq!(StatisticViewModel::place_label(9), "10");
    }
}
