//! Domain Layer - address values and pure functions over them
//!
//! - `Address` parse/format and std conversions
//! - Subnet predicates
//! - Wire packing
//! - ORCHID derivation

pub mod address;
pub mod orchid;
pub mod subnet;
pub mod wire;

pub use address::{format, parse, Address, Family};
pub use orchid::{derive as derive_orchid, is_orchid};
pub use subnet::{same_subnet, subnet_id};
pub use wire::{pack, pack_into, unpack, PACKED_V4_LEN, PACKED_V6_LEN};
