use crate::types::Any;
use crate::{DecodeError, EncodeError};

use super::{DecisionPolicy, MemberRequest, ProposalExecutorResult, VoteOption};

enumeration! {
    package = "cosmos.group.v1";

    /// Execution mode requested alongside a proposal or a vote.
    pub enum Exec {
        /// Leave execution to a later, explicit `MsgExec`.
        Unspecified = 0 => "EXEC_UNSPECIFIED",
        /// Try to execute the proposal right away. Failure to execute does
        /// not fail the enclosing message.
        Try = 1 => "EXEC_TRY",
    }
}

message! {
    package = "cosmos.group.v1";

    /// Creates a new group with an admin account and an initial member set.
    pub struct MsgCreateGroup {
        1 => admin: string,
        2 => members: repeated_message(MemberRequest),
        3 => metadata: string,
    }

    pub struct MsgCreateGroupResponse {
        /// Unique ID of the newly created group.
        1 => group_id: uint64,
    }

    /// Adds, updates or removes (weight zero) group members.
    pub struct MsgUpdateGroupMembers {
        1 => admin: string,
        2 => group_id: uint64,
        3 => member_updates: repeated_message(MemberRequest),
    }

    pub struct MsgUpdateGroupMembersResponse {}

    /// Hands a group over to a new admin.
    pub struct MsgUpdateGroupAdmin {
        /// Current admin account address.
        1 => admin: string,
        2 => group_id: uint64,
        3 => new_admin: string,
    }

    pub struct MsgUpdateGroupAdminResponse {}

    pub struct MsgUpdateGroupMetadata {
        1 => admin: string,
        2 => group_id: uint64,
        3 => metadata: string,
    }

    pub struct MsgUpdateGroupMetadataResponse {}

    /// Creates a group policy account for an existing group.
    pub struct MsgCreateGroupPolicy {
        1 => admin: string,
        2 => group_id: uint64,
        3 => metadata: string,
        /// A `ThresholdDecisionPolicy` or `PercentageDecisionPolicy`.
        4 => decision_policy: message(Any),
    }

    pub struct MsgCreateGroupPolicyResponse {
        /// Account address of the newly created group policy.
        1 => address: string,
    }

    pub struct MsgUpdateGroupPolicyAdmin {
        1 => admin: string,
        2 => group_policy_address: string,
        3 => new_admin: string,
    }

    pub struct MsgUpdateGroupPolicyAdminResponse {}

    /// Creates a group and a group policy for it in one go.
    pub struct MsgCreateGroupWithPolicy {
        1 => admin: string,
        2 => members: repeated_message(MemberRequest),
        3 => group_metadata: string,
        4 => group_policy_metadata: string,
        /// When set, the group policy account becomes the admin of both the
        /// group and the group policy, and `admin` is ignored.
        5 => group_policy_as_admin: bool,
        6 => decision_policy: message(Any),
    }

    pub struct MsgCreateGroupWithPolicyResponse {
        1 => group_id: uint64,
        2 => group_policy_address: string,
    }

    pub struct MsgUpdateGroupPolicyDecisionPolicy {
        1 => admin: string,
        2 => group_policy_address: string,
        3 => decision_policy: message(Any),
    }

    pub struct MsgUpdateGroupPolicyDecisionPolicyResponse {}

    pub struct MsgUpdateGroupPolicyMetadata {
        1 => admin: string,
        2 => group_policy_address: string,
        3 => metadata: string,
    }

    pub struct MsgUpdateGroupPolicyMetadataResponse {}

    /// Submits a proposal to be voted on by the members of a group policy's
    /// group.
    pub struct MsgSubmitProposal {
        1 => group_policy_address: string,
        /// Group member addresses of the proposers. Their votes are cast as
        /// `YES` when `exec` is `EXEC_TRY`.
        2 => proposers: repeated_string,
        3 => metadata: string,
        /// Messages executed by the group policy account if the proposal
        /// is accepted.
        4 => messages: repeated_message(Any),
        5 => exec: enumeration(Exec),
        6 => title: string,
        7 => summary: string,
    }

    pub struct MsgSubmitProposalResponse {
        1 => proposal_id: uint64,
    }

    pub struct MsgWithdrawProposal {
        1 => proposal_id: uint64,
        /// Group admin or one of the proposers.
        2 => address: string,
    }

    pub struct MsgWithdrawProposalResponse {}

    pub struct MsgVote {
        1 => proposal_id: uint64,
        2 => voter: string,
        3 => option: enumeration(VoteOption),
        4 => metadata: string,
        5 => exec: enumeration(Exec),
    }

    pub struct MsgVoteResponse {}

    /// Executes an accepted proposal.
    pub struct MsgExec {
        1 => proposal_id: uint64,
        2 => executor: string,
    }

    pub struct MsgExecResponse {
        2 => result: enumeration(ProposalExecutorResult),
    }

    /// Removes the sender from a group.
    pub struct MsgLeaveGroup {
        1 => address: string,
        2 => group_id: uint64,
    }

    pub struct MsgLeaveGroupResponse {}
}

/// Typed accessors for an enumeration stored as its raw number. Unknown
/// numbers read as the default variant.
macro_rules! enum_accessors {
    ($msg:ident { $($field:ident, $setter:ident: $ty:ty;)* }) => {
        impl $msg {
            $(
                #[doc = concat!("Returns the enum value of `", stringify!($field), "`, or the default if the field is set to an invalid enum value.")]
                pub fn $field(&self) -> $ty {
                    <$ty>::try_from(self.$field).unwrap_or_default()
                }

                #[doc = concat!("Sets `", stringify!($field), "` to the provided enum value.")]
                pub fn $setter(&mut self, value: $ty) {
                    self.$field = value.into();
                }
            )*
        }
    };
}

enum_accessors!(MsgSubmitProposal { exec, set_exec: Exec; });
enum_accessors!(MsgVote {
    option, set_option: VoteOption;
    exec, set_exec: Exec;
});
enum_accessors!(MsgExecResponse { result, set_result: ProposalExecutorResult; });

/// Typed access to the `decision_policy` of the messages carrying one.
macro_rules! decision_policy_accessors {
    ($($msg:ident),*) => {
        $(
            impl $msg {
                /// Unpacks the decision policy, if one is set.
                pub fn decision_policy(&self) -> Result<Option<DecisionPolicy>, DecodeError> {
                    self.decision_policy
                        .as_ref()
                        .map(DecisionPolicy::from_any)
                        .transpose()
                }

                /// Packs `policy` into the `decision_policy` field.
                pub fn set_decision_policy(&mut self, policy: &DecisionPolicy) -> Result<(), EncodeError> {
                    self.decision_policy = Some(policy.to_any()?);
                    Ok(())
                }
            }
        )*
    };
}

decision_policy_accessors!(
    MsgCreateGroupPolicy,
    MsgCreateGroupWithPolicy,
    MsgUpdateGroupPolicyDecisionPolicy
);

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::group::v1::ThresholdDecisionPolicy;
    use crate::reflect::ReflectMessage;
    use crate::{Message, Name};

    #[test]
    fn vote_accessors() {
        let mut vote = MsgVote::default();
        assert_eq!(vote.option(), VoteOption::Unspecified);

        vote.set_option(VoteOption::NoWithVeto);
        vote.set_exec(Exec::Try);
        assert_eq!(vote.option, 4);
        assert_eq!(vote.exec(), Exec::Try);

        vote.option = 42;
        assert_eq!(vote.option(), VoteOption::Unspecified);
    }

    #[test]
    fn unknown_enum_values_survive_roundtrip() {
        let encoded: &[u8] = &[0x10, 0x07];
        let response = MsgExecResponse::decode(encoded).unwrap();
        assert_eq!(response.result, 7);
        assert_eq!(response.result(), ProposalExecutorResult::Unspecified);
        assert_eq!(response.encode_to_vec(), encoded);
    }

    #[test]
    fn decision_policy_accessors() {
        let mut msg = MsgCreateGroupPolicy {
            admin: "cosmos1admin".to_string(),
            group_id: 1,
            ..Default::default()
        };
        assert_eq!(msg.decision_policy(), Ok(None));

        let policy = DecisionPolicy::Threshold(ThresholdDecisionPolicy {
            threshold: "1".to_string(),
            ..Default::default()
        });
        msg.set_decision_policy(&policy).unwrap();
        assert_eq!(msg.decision_policy(), Ok(Some(policy)));
    }

    #[test]
    fn names() {
        assert_eq!(MsgLeaveGroup::full_name(), "cosmos.group.v1.MsgLeaveGroup");
        assert_eq!(
            MsgUpdateGroupPolicyDecisionPolicyResponse::type_url(),
            "/cosmos.group.v1.MsgUpdateGroupPolicyDecisionPolicyResponse"
        );
        assert_eq!(Exec::FULL_NAME, "cosmos.group.v1.Exec");
    }

    #[test]
    fn submit_proposal_descriptor() {
        let descriptor = MsgSubmitProposal::default().descriptor();
        let numbers: Vec<_> = descriptor.fields.iter().map(|f| f.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            descriptor.field_by_name("exec").map(|f| f.kind),
            Some(crate::reflect::Kind::Enum("cosmos.group.v1.Exec"))
        );
        assert_eq!(
            descriptor.field(4).map(|f| f.cardinality),
            Some(crate::reflect::Cardinality::Repeated)
        );
    }

    #[test]
    fn empty_responses_encode_to_nothing() {
        assert!(MsgVoteResponse::default().encode_to_vec().is_empty());
        assert_eq!(MsgLeaveGroupResponse::default().encoded_len(), 0);
        assert_eq!(
            MsgWithdrawProposalResponse::decode(&b""[..]).unwrap(),
            MsgWithdrawProposalResponse::default()
        );
    }
}
