use alloc::format;
use alloc::vec::Vec;

use crate::types::Any;
use crate::{DecodeError, EncodeError};

use super::*;

macro_rules! tx_msgs {
    ($($variant:ident),* $(,)?) => {
        /// A request message of the group Msg service.
        ///
        /// Proposals carry their messages packed into [`Any`]; `TxMsg` turns
        /// those that target the group module back into typed messages.
        #[derive(Clone, Debug, PartialEq)]
        pub enum TxMsg {
            $( $variant($variant), )*
        }

        impl TxMsg {
            /// Unpacks a request message, choosing the variant from the type
            /// URL.
            pub fn from_any(any: &Any) -> Result<Self, DecodeError> {
                $(
                    if any.is($variant::FULL_NAME) {
                        return any.to_msg().map(TxMsg::$variant);
                    }
                )*

                ::log::debug!("no group request message for type URL {:?}", any.type_url);
                let mut err = DecodeError::new(format!(
                    "not a group request message: \"{}\"",
                    any.type_url
                ));
                err.push("unexpected type URL", "type_url");
                Err(err)
            }

            /// Packs the message into an [`Any`].
            pub fn to_any(&self) -> Result<Any, EncodeError> {
                match self {
                    $( TxMsg::$variant(msg) => Any::from_msg(msg), )*
                }
            }

            /// Type URL of the wrapped message.
            pub fn type_url(&self) -> alloc::string::String {
                match self {
                    $( TxMsg::$variant(_) => <$variant as crate::Name>::type_url(), )*
                }
            }
        }

        $(
            impl From<$variant> for TxMsg {
                fn from(msg: $variant) -> Self {
                    TxMsg::$variant(msg)
                }
            }
        )*
    };
}

tx_msgs!(
    MsgCreateGroup,
    MsgUpdateGroupMembers,
    MsgUpdateGroupAdmin,
    MsgUpdateGroupMetadata,
    MsgCreateGroupPolicy,
    MsgUpdateGroupPolicyAdmin,
    MsgCreateGroupWithPolicy,
    MsgUpdateGroupPolicyDecisionPolicy,
    MsgUpdateGroupPolicyMetadata,
    MsgSubmitProposal,
    MsgWithdrawProposal,
    MsgVote,
    MsgExec,
    MsgLeaveGroup,
);

impl MsgSubmitProposal {
    /// Decodes the proposal's messages. Every message must be a group
    /// request message.
    pub fn decode_messages(&self) -> Result<Vec<TxMsg>, DecodeError> {
        self.messages
            .iter()
            .map(TxMsg::from_any)
            .collect::<Result<_, _>>()
            .map_err(|mut err| {
                err.push("MsgSubmitProposal", "messages");
                err
            })
    }

    /// Packs `msgs` into the proposal's messages, replacing any previous
    /// ones.
    pub fn set_messages<I>(&mut self, msgs: I) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = TxMsg>,
    {
        self.messages = msgs
            .into_iter()
            .map(|msg| msg.to_any())
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}
