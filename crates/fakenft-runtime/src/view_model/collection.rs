#![forbid(unsafe_code)]

//! Collection screen: the NFT cards of one collection.

use std::sync::Arc;

use fakenft_core::{Nft, NftCollection, SortingOption};

use super::list::ListViewModel;
use crate::provider::DataProvider;
use crate::reactive::ReadOnlyObservable;

/// View-model behind the collection screen reached from a catalog row.
#[derive(Debug)]
pub struct CollectionViewModel {
    collection: NftCollection,
    list: ListViewModel<Nft>,
}

impl CollectionViewModel {
    /// `provider` fetches the NFTs of `collection`.
    pub fn new(collection: NftCollection, provider: Arc<dyn DataProvider<Vec<Nft>>>) -> Self {
        Self {
            collection,
            list: ListViewModel::new("collection", provider),
        }
    }

    /// The collection this screen describes.
    #[must_use]
    pub fn collection(&self) -> &NftCollection {
        &self.collection
    }

    #[must_use]
    pub fn nfts_observable(&self) -> ReadOnlyObservable<Vec<Nft>> {
        self.list.items_observable()
    }

    #[must_use]
    pub fn error_observable(&self) -> ReadOnlyObservable<Option<String>> {
        self.list.error_observable()
    }

    pub fn fetch_nfts(&self) {
        self.list.fetch();
    }

    pub fn sort_nfts(&self, option: SortingOption) -> bool {
        self.list.sort(option)
    }

    /// See [`ListViewModel::acknowledge_error`].
    pub fn acknowledge_error(&self) -> bool {
        self.list.acknowledge_error()
    }

    /// Card names, in display order.
    #[must_use]
    pub fn nft_names(&self) -> Vec<String> {
        self.nfts_observable()
            .with(|nfts| nfts.iter().map(|n| n.name.clone()).collect())
    }

    /// Card preview images, in display order. Cards without images get an
    /// empty string so indices line up with [`Self::nft_names`].
    #[must_use]
    pub fn nft_images(&self) -> Vec<String> {
        self.nfts_observable().with(|nfts| {
            nfts.iter()
                .map(|n| n.preview().unwrap_or_default().to_string())
                .collect()
        })
    }

    /// Card price labels, in display order.
    #[must_use]
    pub fn nft_prices(&self) -> Vec<String> {
        self.nfts_observable()
            .with(|nfts| nfts.iter().map(Nft::price_label).collect())
    }
}
