#![forbid(unsafe_code)]

//! Core: domain model, sorting, errors, and logging for the FakeNFT client.
//!
//! # Role in FakeNFT
//! `fakenft-core` is the data layer shared by every screen. It owns the model
//! types returned by the backend, the closed set of sorting options a screen
//! can offer, the error taxonomy of the fetch boundary, and the logging setup.
//!
//! # How it fits in the system
//! The runtime (`fakenft-runtime`) wraps these values in observable boxes and
//! drives them from a data provider. Nothing in this crate knows about
//! observation or threads, so it can be tested in isolation.

pub mod error;
pub mod logging;
pub mod model;
pub mod sorting;

pub use error::{FetchError, LoggingError};
pub use logging::{LogConfig, LogFormat};
pub use model::{Nft, NftCollection, Profile, UserRating};
pub use sorting::{Sortable, SortingOption, sort_items};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
