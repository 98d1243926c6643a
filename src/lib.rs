#![doc(html_root_url = "https://docs.rs/group-proto/0.1.0")]
#![cfg_attr(not(feature = "std"), no_std)]

//! Protocol Buffers types and codec for the `cosmos.group.v1` Msg service.
//!
//! Every request and response message of the group module is a plain Rust
//! struct implementing [`Message`] (binary encoding and decoding), [`Name`]
//! (type URL) and [`reflect::ReflectMessage`] (field access by number).
//!
//! ```
//! use group_proto::group::v1::{MsgVote, VoteOption};
//! use group_proto::Message;
//!
//! let mut vote = MsgVote {
//!     proposal_id: 7,
//!     voter: "cosmos1voter".into(),
//!     ..Default::default()
//! };
//! vote.set_option(VoteOption::Yes);
//!
//! let bytes = vote.encode_to_vec();
//! assert_eq!(MsgVote::decode(bytes.as_slice()).unwrap(), vote);
//! ```

// Re-export the alloc crate for use within the declaration macros.
#[doc(hidden)]
pub extern crate alloc;

// Re-export the bytes crate for use within the declaration macros.
pub use bytes;

mod error;
mod field;
mod message;
mod name;
mod unknown;

#[doc(hidden)]
pub mod encoding;

#[macro_use]
pub mod reflect;

pub mod group;
pub mod types;

pub use crate::encoding::length_delimiter::{
    decode_length_delimiter, encode_length_delimiter, length_delimiter_len,
};
pub use crate::error::{DecodeError, EncodeError, UnknownEnumValue};
#[doc(hidden)]
pub use crate::field::Field;
pub use crate::message::Message;
pub use crate::name::Name;
pub use crate::unknown::{UnknownField, UnknownFieldIter, UnknownFieldList};

// See `encoding::DecodeContext` for more info.
// 100 is the default recursion limit in the C++ implementation.
#[cfg(not(feature = "no-recursion-limit"))]
const RECURSION_LIMIT: u32 = 100;
