//! Messages of the Cosmos SDK group module.

pub mod v1;
