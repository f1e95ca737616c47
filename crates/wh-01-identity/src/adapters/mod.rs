//! Adapters for the identity ports.

pub mod file_store;

pub use file_store::FileSecretStore;
