//! Flows that cross crate boundaries.
//!
//! - `flows`: key search, control packets, overlay addresses, secret storage
//! - `transport`: control packets over the UDP adapter

mod flows;
mod transport;
