//! Support for associating type name information with a [`Message`].

use crate::Message;

use alloc::{format, string::String};

/// Associate a type name with a [`Message`] type.
pub trait Name: Message {
    /// Simple name for this [`Message`].
    /// This name is the same as it appears in the source .proto file, e.g. `MsgVote`.
    const NAME: &'static str;

    /// Package name this message type is contained in. They are domain-like
    /// and delimited by `.`, e.g. `cosmos.group.v1`.
    const PACKAGE: &'static str;

    /// Fully-qualified unique name for this [`Message`].
    /// By default, this is the package name followed by the message name.
    fn full_name() -> String {
        format!("{}.{}", Self::PACKAGE, Self::NAME)
    }

    /// Type URL for this [`Message`], which by default is the full name with a
    /// leading slash, e.g. `/cosmos.group.v1.MsgVote`. This is the form the
    /// Cosmos SDK uses when packing messages into an [`Any`].
    ///
    /// [`Any`]: crate::types::Any
    fn type_url() -> String {
        format!("/{}", Self::full_name())
    }
}
