#![forbid(unsafe_code)]

//! Test harness and fixtures for the FakeNFT client core.
//!
//! - [`ScriptedProvider`]: completes each fetch synchronously with the next
//!   scripted result.
//! - [`DeferredProvider`]: parks completions until the test resolves them,
//!   in any order and on any thread.
//! - [`JsonFixtureProvider`]: decodes a JSON document on every fetch.
//! - [`Recorder`]: captures every notification an observable delivers.

pub mod provider;
pub mod recorder;

pub use provider::{DeferredProvider, JsonFixtureProvider, ScriptedProvider};
pub use recorder::Recorder;
