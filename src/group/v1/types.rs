use alloc::format;

use crate::types::{Any, Duration};
use crate::{DecodeError, EncodeError};

enumeration! {
    package = "cosmos.group.v1";

    /// The option chosen by a voter.
    pub enum VoteOption {
        /// No-op value.
        Unspecified = 0 => "VOTE_OPTION_UNSPECIFIED",
        Yes = 1 => "VOTE_OPTION_YES",
        Abstain = 2 => "VOTE_OPTION_ABSTAIN",
        No = 3 => "VOTE_OPTION_NO",
        /// A "no" vote which also signals the proposal should be vetoed.
        NoWithVeto = 4 => "VOTE_OPTION_NO_WITH_VETO",
    }
}

enumeration! {
    package = "cosmos.group.v1";

    /// Outcome of executing the messages of an accepted proposal.
    pub enum ProposalExecutorResult {
        Unspecified = 0 => "PROPOSAL_EXECUTOR_RESULT_UNSPECIFIED",
        /// The proposal has not been executed yet.
        NotRun = 1 => "PROPOSAL_EXECUTOR_RESULT_NOT_RUN",
        Success = 2 => "PROPOSAL_EXECUTOR_RESULT_SUCCESS",
        /// Execution failed; it may be retried while the proposal is still
        /// accepted.
        Failure = 3 => "PROPOSAL_EXECUTOR_RESULT_FAILURE",
    }
}

message! {
    package = "cosmos.group.v1";

    /// A group member to add or update. Setting `weight` to zero removes
    /// the member on update.
    pub struct MemberRequest {
        /// Bech32 account address of the member.
        1 => address: string,
        /// Voting weight, a decimal string.
        2 => weight: string,
        3 => metadata: string,
    }

    /// Voting and execution windows shared by every decision policy.
    pub struct DecisionPolicyWindows {
        /// How long a proposal stays open for votes after submission.
        1 => voting_period: message(Duration),
        /// Minimum time after submission before a proposal can execute.
        2 => min_execution_period: message(Duration),
    }

    /// Accepts a proposal once the sum of `YES` weights reaches `threshold`.
    pub struct ThresholdDecisionPolicy {
        /// Minimum weighted sum of `YES` votes, a decimal string.
        1 => threshold: string,
        2 => windows: message(DecisionPolicyWindows),
    }

    /// Accepts a proposal once the share of `YES` votes in the group's total
    /// weight reaches `percentage`.
    pub struct PercentageDecisionPolicy {
        /// A decimal string in `(0, 1]`.
        1 => percentage: string,
        2 => windows: message(DecisionPolicyWindows),
    }
}

/// A decision policy as carried by group policy messages, packed into an
/// [`Any`].
#[derive(Clone, Debug, PartialEq)]
pub enum DecisionPolicy {
    Threshold(ThresholdDecisionPolicy),
    Percentage(PercentageDecisionPolicy),
}

impl DecisionPolicy {
    /// Packs the policy into an [`Any`].
    pub fn to_any(&self) -> Result<Any, EncodeError> {
        match self {
            DecisionPolicy::Threshold(policy) => Any::from_msg(policy),
            DecisionPolicy::Percentage(policy) => Any::from_msg(policy),
        }
    }

    /// Unpacks a policy, choosing the variant from the type URL.
    pub fn from_any(any: &Any) -> Result<Self, DecodeError> {
        if any.is(ThresholdDecisionPolicy::FULL_NAME) {
            any.to_msg().map(DecisionPolicy::Threshold)
        } else if any.is(PercentageDecisionPolicy::FULL_NAME) {
            any.to_msg().map(DecisionPolicy::Percentage)
        } else {
            let mut err = DecodeError::new(format!(
                "not a decision policy: \"{}\"",
                any.type_url
            ));
            err.push("unexpected type URL", "type_url");
            Err(err)
        }
    }

    /// Voting and execution windows of the policy, if set.
    pub fn windows(&self) -> Option<&DecisionPolicyWindows> {
        match self {
            DecisionPolicy::Threshold(policy) => policy.windows.as_ref(),
            DecisionPolicy::Percentage(policy) => policy.windows.as_ref(),
        }
    }
}

impl From<ThresholdDecisionPolicy> for DecisionPolicy {
    fn from(policy: ThresholdDecisionPolicy) -> Self {
        DecisionPolicy::Threshold(policy)
    }
}

impl From<PercentageDecisionPolicy> for DecisionPolicy {
    fn from(policy: PercentageDecisionPolicy) -> Self {
        DecisionPolicy::Percentage(policy)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::{Message, UnknownEnumValue};

    #[test]
    fn vote_option_names() {
        assert_eq!(VoteOption::NoWithVeto.as_str_name(), "VOTE_OPTION_NO_WITH_VETO");
        assert_eq!(
            VoteOption::from_str_name("VOTE_OPTION_ABSTAIN"),
            Some(VoteOption::Abstain)
        );
        assert_eq!(VoteOption::from_str_name("ABSTAIN"), None);
        assert_eq!(VoteOption::default(), VoteOption::Unspecified);
    }

    #[test]
    fn executor_result_numbers() {
        assert_eq!(i32::from(ProposalExecutorResult::Failure), 3);
        assert_eq!(
            ProposalExecutorResult::try_from(2),
            Ok(ProposalExecutorResult::Success)
        );
        assert_eq!(ProposalExecutorResult::try_from(4), Err(UnknownEnumValue(4)));
        assert!(!ProposalExecutorResult::is_valid(-1));
    }

    #[test]
    fn decision_policy_any_roundtrip() {
        let policy = DecisionPolicy::Threshold(ThresholdDecisionPolicy {
            threshold: "2".to_string(),
            windows: Some(DecisionPolicyWindows {
                voting_period: Some(Duration {
                    seconds: 86_400,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        });

        let any = policy.to_any().unwrap();
        assert_eq!(any.type_url, "/cosmos.group.v1.ThresholdDecisionPolicy");
        assert_eq!(DecisionPolicy::from_any(&any).unwrap(), policy);
        assert_eq!(
            policy.windows().and_then(|w| w.voting_period.as_ref()).map(|d| d.seconds),
            Some(86_400)
        );
    }

    #[test]
    fn decision_policy_rejects_other_types() {
        let any = Any::from_msg(&MemberRequest::default()).unwrap();
        let err = DecisionPolicy::from_any(&any).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to decode Protobuf message: unexpected type URL.type_url: \
             not a decision policy: \"/cosmos.group.v1.MemberRequest\""
        );
    }

    #[test]
    fn windows_encoding() {
        let windows = DecisionPolicyWindows {
            voting_period: Some(Duration {
                seconds: 60,
                ..Default::default()
            }),
            min_execution_period: Some(Duration::default()),
            ..Default::default()
        };
        assert_eq!(
            windows.encode_to_vec(),
            [0x0A, 0x02, 0x08, 0x3C, 0x12, 0x00]
        );
    }
}
