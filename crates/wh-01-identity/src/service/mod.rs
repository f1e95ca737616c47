//! Identity services.

pub mod keysearch;

pub use keysearch::{search, CancelToken, KeySearch, SearchOutcome, MAX_WORKBIT};
