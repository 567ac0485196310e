#![forbid(unsafe_code)]

//! Per-screen view-models.
//!
//! Every view-model owns its [`ObservableBox`](crate::reactive::ObservableBox)es
//! and hands out [`ReadOnlyObservable`](crate::reactive::ReadOnlyObservable)s.
//! Data and errors travel on separate channels so a screen can keep showing
//! its last good data while surfacing a transient error.

pub mod catalog;
pub mod collection;
pub mod list;
pub mod profile;
pub mod statistic;

pub use catalog::CatalogViewModel;
pub use collection::CollectionViewModel;
pub use list::ListViewModel;
pub use profile::{ProfileMenuItem, ProfileViewModel};
pub use statistic::StatisticViewModel;
