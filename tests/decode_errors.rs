use group_proto::group::v1::*;
use group_proto::{DecodeError, Message};

fn decode_err<M: Message + Default>(encoded: &[u8]) -> DecodeError {
    let _ = env_logger::builder().is_test(true).try_init();
    M::decode(encoded).expect_err("decoding succeeded")
}

#[test]
fn truncated_string() {
    let err = decode_err::<MsgVote>(&[0x12, 0x05, b'a']);
    assert_eq!(err.description(), "buffer underflow");
    assert_eq!(
        err.to_string(),
        "failed to decode Protobuf message: MsgVote.voter: buffer underflow"
    );
}

#[test]
fn truncated_varint() {
    let err = decode_err::<MsgExec>(&[0x08, 0x80]);
    assert_eq!(err.description(), "invalid varint");
    assert_eq!(err.path().collect::<Vec<_>>(), [&("MsgExec", "proposal_id")]);
}

#[test]
fn varint_overflow() {
    let err = decode_err::<MsgExec>(&[
        0x08, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02,
    ]);
    assert_eq!(err.description(), "invalid varint");
}

#[test]
fn wrong_wire_type() {
    let err = decode_err::<MsgExec>(&[0x0A, 0x00]);
    assert_eq!(
        err.to_string(),
        "failed to decode Protobuf message: MsgExec.proposal_id: \
         invalid wire type: LengthDelimited (expected Varint)"
    );
}

#[test]
fn invalid_wire_type() {
    let err = decode_err::<MsgExec>(&[0x0F]);
    assert_eq!(err.description(), "invalid wire type value: 7");
    assert_eq!(err.path().count(), 0);
}

#[test]
fn tag_zero() {
    let err = decode_err::<MsgLeaveGroup>(&[0x00, 0x01]);
    assert_eq!(err.description(), "invalid tag value: 0");
}

#[test]
fn nested_path_is_innermost_first() {
    // MsgCreateGroup.members[0].address holds invalid UTF-8.
    let err = decode_err::<MsgCreateGroup>(&[0x12, 0x03, 0x0A, 0x01, 0xFF]);
    assert_eq!(
        err.to_string(),
        "failed to decode Protobuf message: MemberRequest.address: MsgCreateGroup.members: \
         invalid string value: data is not UTF-8 encoded"
    );
}

#[test]
fn nested_length_overrun() {
    // The member claims 2 bytes but its only field is 3 bytes long.
    let err = decode_err::<MsgCreateGroup>(&[0x12, 0x02, 0x0A, 0x01, b'a']);
    assert_eq!(err.description(), "delimited length exceeded");
    assert_eq!(err.path().collect::<Vec<_>>(), [&("MsgCreateGroup", "members")]);
}

#[test]
fn stray_end_group() {
    // End group for field 9, never started.
    let err = decode_err::<MsgExec>(&[0x4C]);
    assert_eq!(err.description(), "unexpected end group tag");
}

#[test]
fn unterminated_unknown_group() {
    let err = decode_err::<MsgExec>(&[0x4B, 0x08, 0x01]);
    assert_eq!(err.description(), "invalid varint");
}

#[cfg(not(feature = "no-recursion-limit"))]
#[test]
fn recursion_limit() {
    // 200 nested unknown groups with field number 9.
    let mut encoded = vec![0x4B; 200];
    encoded.extend(std::iter::repeat(0x4C).take(200));
    let err = decode_err::<MsgExec>(&encoded);
    assert_eq!(err.description(), "recursion limit reached");
}

#[test]
fn nested_unknown_groups_within_limit() {
    let mut encoded = vec![0x4B; 10];
    encoded.extend(std::iter::repeat(0x4C).take(10));
    let msg = MsgExec::decode(encoded.as_slice()).unwrap();
    assert_eq!(msg.encode_to_vec(), encoded);
}

#[cfg(feature = "std")]
#[test]
fn decode_error_into_io_error() {
    let err = decode_err::<MsgVote>(&[0x12, 0x05]);
    let io_err = std::io::Error::from(err);
    assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidData);
}
