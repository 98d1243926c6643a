//! `cosmos.group.v1`: groups, group policies, proposals and votes.

mod msgs;
mod tx;
mod types;

pub use msgs::TxMsg;
pub use tx::*;
pub use types::*;

/// Protobuf package of every message in this module.
pub const PACKAGE: &str = "cosmos.group.v1";
