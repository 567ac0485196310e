#![forbid(unsafe_code)]

//! Runtime: observable state, data-provider plumbing, and view-models.
//!
//! # Role in FakeNFT
//! `fakenft-runtime` sits between the data providers (networking, fixtures)
//! and the presentation layer. View-models fetch through a
//! [`DataProvider`](provider::DataProvider), publish results through
//! [`ObservableBox`](reactive::ObservableBox)es, and expose them read-only.
//!
//! # Primary responsibilities
//! - **reactive**: the observable box, its read-only view, subscription
//!   handles, and derived bindings.
//! - **provider**: the asynchronous fetch contract and thread adapters.
//! - **dispatch**: marshalling UI reactions onto the UI thread.
//! - **view_model**: catalog, collection, statistic, and profile screens.
//! - **config**: environment-driven client configuration.

pub mod config;
pub mod dispatch;
pub mod provider;
pub mod reactive;
pub mod view_model;

pub use config::ClientConfig;
pub use dispatch::{MainHandle, MainQueue, on_main};
pub use provider::{BackgroundProvider, Completion, DataProvider, FnProvider};
pub use reactive::{Binding, ObservableBox, ReadOnlyObservable, ReentrantWrite, SubscriptionHandle};
pub use view_model::{
    CatalogViewModel, CollectionViewModel, ListViewModel, ProfileMenuItem, ProfileViewModel,
    StatisticViewModel,
};

pub use fakenft_core::{
    FetchError, Nft, NftCollection, Profile, Sortable, SortingOption, UserRating,
};
