//! # WireHub Test Suite
//!
//! Cross-crate tests and benchmarks.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── codec_benchmarks.rs   # workbit, distance, packet codec, ORCHID
//! └── src/
//!     └── integration/          # identity -> packet -> endpoint flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wh-tests
//! cargo test -p wh-tests integration::
//!
//! # Benchmarks
//! cargo bench -p wh-tests
//! ```

#[cfg(test)]
mod integration;
