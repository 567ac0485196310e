#![forbid(unsafe_code)]

//! Catalog screen: the list of NFT collections.

use std::sync::Arc;

use fakenft_core::{NftCollection, SortingOption};

use super::list::ListViewModel;
use crate::config::ClientConfig;
use crate::provider::DataProvider;
use crate::reactive::{Binding, ReadOnlyObservable};

/// View-model behind the catalog screen.
///
/// Sorting supports [`SortingOption::ByName`] (A to Z) and
/// [`SortingOption::ByQuantity`] (largest collection first).
#[derive(Debug)]
pub struct CatalogViewModel {
    list: ListViewModel<NftCollection>,
}

impl CatalogViewModel {
    /// Build the view-model and, if `config.fetch_on_init`, start fetching.
    pub fn new(
        provider: Arc<dyn DataProvider<Vec<NftCollection>>>,
        config: &ClientConfig,
    ) -> Self {
        let vm = Self {
            list: ListViewModel::new("catalog", provider),
        };
        if config.fetch_on_init {
            vm.fetch_collections();
        }
        vm
    }

    #[must_use]
    pub fn nft_collections_observable(&self) -> ReadOnlyObservable<Vec<NftCollection>> {
        self.list.items_observable()
    }

    #[must_use]
    pub fn error_observable(&self) -> ReadOnlyObservable<Option<String>> {
        self.list.error_observable()
    }

    #[must_use]
    pub fn refresh_stub_visible(&self) -> Binding<bool> {
        self.list.refresh_stub_visible()
    }

    pub fn fetch_collections(&self) {
        self.list.fetch();
    }

    pub fn sort_nft_collections(&self, option: SortingOption) -> bool {
        self.list.sort(option)
    }

    /// See [`ListViewModel::acknowledge_error`].
    pub fn acknowledge_error(&self) -> bool {
        self.list.acknowledge_error()
    }

    /// Collection shown in row `index`.
    #[must_use]
    pub fn collection(&self, index: usize) -> Option<NftCollection> {
        self.list.item(index)
    }

    #[must_use]
    pub fn collection_count(&self) -> usize {
        self.list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FnProvider;
    use fakenft_core::FetchError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_provider(calls: Arc<AtomicUsize>) -> Arc<dyn DataProvider<Vec<NftCollection>>> {
        Arc::new(FnProvider::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, FetchError>(vec![
                NftCollection::new("1", "B", vec!["x".into(), "y".into()]),
                NftCollection::new("2", "A", vec!["z".into(); 5]),
            ])
        }))
    }

    #[test]
    fn fetches_on_construction_by_default() {
        let calls = Arc::new(AtomicUsize::new(0));
        let vm = CatalogViewModel::new(
            counting_provider(Arc::clone(&calls)),
            &ClientConfig::default(),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(vm.collection_count(), 2);
        assert!(!vm.refresh_stub_visible().get());
    }

    #[test]
    fn fetch_on_init_can_be_disabled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = ClientConfig::default().with_fetch_on_init(false);
        let vm = CatalogViewModel::new(counting_provider(Arc::clone(&calls)), &config);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(vm.refresh_stub_visible().get());

        vm.fetch_collections();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn sorts_by_name_and_quantity_only() {
        let vm = CatalogViewModel::new(
            counting_provider(Arc::new(AtomicUsize::new(0))),
            &ClientConfig::default(),
        );
        assert!(vm.sort_nft_collections(SortingOption::ByName));
        assert_eq!(vm.collection(0).map(|c| c.name), Some("A".to_string()));

        assert!(vm.sort_nft_collections(SortingOption::ByQuantity));
        assert_eq!(vm.collection(0).map(|c| c.nft_count()), Some(5));

        assert!(!vm.sort_nft_collections(SortingOption::ByRating));
        assert!(vm.error_observable().get().is_none());
    }
}
