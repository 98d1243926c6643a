//! Wire format primitives used by the `Field` implementations and the
//! `message!` macro.
//!
//! Each codec module handles a single value of one protobuf type. Repeated
//! fields are written as one key per element by the `Field` impls on `Vec`.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use ::bytes::{Buf, BufMut};

use crate::DecodeError;
use crate::Message;

pub mod varint;
pub use varint::{decode_varint, encode_varint, encoded_len_varint};

pub mod length_delimiter;
pub use length_delimiter::{
    decode_length_delimiter, encode_length_delimiter, length_delimiter_len,
};

pub mod wire_type;
pub use wire_type::{check_wire_type, WireType};

/// Decoding state threaded through every `merge` call.
///
/// Passed by value. Nested messages and groups get the context returned by
/// `enter_recursion`, so the budget shrinks only along the current path.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "no-recursion-limit", derive(Default))]
pub struct DecodeContext {
    /// Nesting levels left before `limit_reached` fails.
    #[cfg(not(feature = "no-recursion-limit"))]
    recurse_count: u32,
}

#[cfg(not(feature = "no-recursion-limit"))]
impl Default for DecodeContext {
    #[inline]
    fn default() -> DecodeContext {
        DecodeContext {
            recurse_count: crate::RECURSION_LIMIT,
        }
    }
}

impl DecodeContext {
    /// Returns the context for one level deeper.
    #[cfg(not(feature = "no-recursion-limit"))]
    #[inline]
    pub(crate) fn enter_recursion(&self) -> DecodeContext {
        DecodeContext {
            recurse_count: self.recurse_count - 1,
        }
    }

    #[cfg(feature = "no-recursion-limit")]
    #[inline]
    pub(crate) fn enter_recursion(&self) -> DecodeContext {
        DecodeContext {}
    }

    /// Fails once the nesting budget is spent.
    #[cfg(not(feature = "no-recursion-limit"))]
    #[inline]
    pub(crate) fn limit_reached(&self) -> Result<(), DecodeError> {
        if self.recurse_count == 0 {
            Err(DecodeError::new("recursion limit reached"))
        } else {
            Ok(())
        }
    }

    #[cfg(feature = "no-recursion-limit")]
    #[inline]
    #[allow(clippy::unnecessary_wraps)]
    pub(crate) fn limit_reached(&self) -> Result<(), DecodeError> {
        Ok(())
    }
}

pub const MIN_TAG: u32 = 1;
pub const MAX_TAG: u32 = (1 << 29) - 1;

/// Writes the key of a field: its number shifted left by three, or'ed with
/// the wire type.
#[inline]
pub fn encode_key(tag: u32, wire_type: WireType, buf: &mut impl BufMut) {
    debug_assert!((MIN_TAG..=MAX_TAG).contains(&tag));
    encode_varint(u64::from(tag << 3 | wire_type as u32), buf);
}

/// Reads a field key.
#[inline(always)]
pub fn decode_key(buf: &mut impl Buf) -> Result<(u32, WireType), DecodeError> {
    let key = decode_varint(buf)?;
    let key = u32::try_from(key)
        .map_err(|_| DecodeError::new(format!("invalid key value: {}", key)))?;
    let wire_type = WireType::try_from(u64::from(key & 0x07))?;
    match key >> 3 {
        0 => Err(DecodeError::new("invalid tag value: 0")),
        tag => Ok((tag, wire_type)),
    }
}

/// Width of the key for `tag`, between 1 and 5 bytes.
#[inline]
pub fn key_len(tag: u32) -> usize {
    encoded_len_varint(u64::from(tag << 3))
}

/// Reads a length prefix and checks that the buffer holds that many bytes.
fn decode_len(buf: &mut impl Buf) -> Result<usize, DecodeError> {
    let len = decode_varint(buf)?;
    if len > buf.remaining() as u64 {
        return Err(DecodeError::new("buffer underflow"));
    }
    Ok(len as usize)
}

/// Reads a length prefix, then calls `merge` until exactly that many bytes
/// have been consumed.
pub fn merge_loop<T, M, B>(
    value: &mut T,
    buf: &mut B,
    ctx: DecodeContext,
    mut merge: M,
) -> Result<(), DecodeError>
where
    M: FnMut(&mut T, &mut B, DecodeContext) -> Result<(), DecodeError>,
    B: Buf,
{
    let len = decode_len(buf)?;
    let limit = buf.remaining() - len;
    while buf.remaining() > limit {
        merge(value, buf, ctx.clone())?;
    }

    if buf.remaining() != limit {
        return Err(DecodeError::new("delimited length exceeded"));
    }
    Ok(())
}

/// Emits a codec module for a varint-encoded scalar.
macro_rules! varint {
    ($ty:ty, $proto_ty:ident, |$to:ident| $to_u64:expr, |$from:ident| $from_u64:expr) => {
        pub mod $proto_ty {
            use super::*;

            #[inline]
            fn to_u64($to: &$ty) -> u64 {
                $to_u64
            }

            pub fn encode(tag: u32, value: &$ty, buf: &mut impl BufMut) {
                encode_key(tag, WireType::Varint, buf);
                encode_varint(to_u64(value), buf);
            }

            /// Last occurrence wins.
            pub fn merge(
                wire_type: WireType,
                value: &mut $ty,
                buf: &mut impl Buf,
                _ctx: DecodeContext,
            ) -> Result<(), DecodeError> {
                check_wire_type(WireType::Varint, wire_type)?;
                let $from = decode_varint(buf)?;
                *value = $from_u64;
                Ok(())
            }

            #[inline]
            pub fn encoded_len(tag: u32, value: &$ty) -> usize {
                key_len(tag) + encoded_len_varint(to_u64(value))
            }

        }
    };
}

varint!(bool, bool, |value| u64::from(*value), |raw| raw != 0);
// Negative int32 values are sign-extended to ten bytes on the wire.
varint!(i32, int32, |value| i64::from(*value) as u64, |raw| raw as i32);
varint!(i64, int64, |value| *value as u64, |raw| raw as i64);
varint!(u64, uint64, |value| *value, |raw| raw);

pub mod bytes {
    use super::*;

    pub fn encode(tag: u32, value: &[u8], buf: &mut impl BufMut) {
        encode_key(tag, WireType::LengthDelimited, buf);
        encode_varint(value.len() as u64, buf);
        buf.put_slice(value);
    }

    /// Replaces `value` with the decoded bytes.
    pub fn merge(
        wire_type: WireType,
        value: &mut Vec<u8>,
        buf: &mut impl Buf,
        _ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        check_wire_type(WireType::LengthDelimited, wire_type)?;
        let len = decode_len(buf)?;
        value.clear();
        value.resize(len, 0);
        buf.copy_to_slice(value.as_mut_slice());
        Ok(())
    }

    #[inline]
    pub fn encoded_len(tag: u32, value: &[u8]) -> usize {
        key_len(tag) + encoded_len_varint(value.len() as u64) + value.len()
    }

    #[cfg(test)]
    mod test {
        use proptest::prelude::*;

        use super::super::test::check_type;
        use super::*;

        proptest! {
            #[test]
            fn check(value: Vec<u8>, tag in MIN_TAG..=MAX_TAG) {
                check_type::<Vec<u8>, [u8]>(value, tag, WireType::LengthDelimited,
                                            encode, merge, encoded_len)?;
            }
        }
    }
}

pub mod string {
    use super::*;

    pub fn encode(tag: u32, value: &str, buf: &mut impl BufMut) {
        super::bytes::encode(tag, value.as_bytes(), buf);
    }

    /// Replaces `value` with the decoded string. On any error, including
    /// invalid UTF-8, `value` is left empty.
    pub fn merge(
        wire_type: WireType,
        value: &mut String,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let mut bytes = mem::take(value).into_bytes();
        super::bytes::merge(wire_type, &mut bytes, buf, ctx)?;
        *value = String::from_utf8(bytes).map_err(|_| {
            DecodeError::new("invalid string value: data is not UTF-8 encoded")
        })?;
        Ok(())
    }

    #[inline]
    pub fn encoded_len(tag: u32, value: &str) -> usize {
        super::bytes::encoded_len(tag, value.as_bytes())
    }

}

pub mod message {
    use super::*;

    pub fn encode<M>(tag: u32, msg: &M, buf: &mut impl BufMut)
    where
        M: Message,
    {
        encode_key(tag, WireType::LengthDelimited, buf);
        encode_varint(msg.encoded_len() as u64, buf);
        msg.encode_raw(buf);
    }

    /// Merges one occurrence into `msg`; fields present in both keep the
    /// semantics of their own type.
    pub fn merge<M, B>(
        wire_type: WireType,
        msg: &mut M,
        buf: &mut B,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError>
    where
        M: Message,
        B: Buf,
    {
        check_wire_type(WireType::LengthDelimited, wire_type)?;
        ctx.limit_reached()?;
        merge_loop(
            msg,
            buf,
            ctx.enter_recursion(),
            |msg: &mut M, buf: &mut B, ctx| {
                let (tag, wire_type) = decode_key(buf)?;
                msg.merge_field(tag, wire_type, buf, ctx)
            },
        )
    }

    #[inline]
    pub fn encoded_len<M>(tag: u32, msg: &M) -> usize
    where
        M: Message,
    {
        let len = msg.encoded_len();
        key_len(tag) + encoded_len_varint(len as u64) + len
    }
}

/// Groups only show up here as unknown fields: no message of this crate
/// declares one, but a peer running a newer schema may still send them.
pub mod group {
    use super::*;

    pub fn encode<M>(tag: u32, msg: &M, buf: &mut impl BufMut)
    where
        M: Message,
    {
        encode_key(tag, WireType::StartGroup, buf);
        msg.encode_raw(buf);
        encode_key(tag, WireType::EndGroup, buf);
    }

    /// Merges fields into `msg` up to the end group key matching `tag`.
    pub fn merge<M>(
        tag: u32,
        wire_type: WireType,
        msg: &mut M,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError>
    where
        M: Message,
    {
        check_wire_type(WireType::StartGroup, wire_type)?;
        ctx.limit_reached()?;
        loop {
            match decode_key(buf)? {
                (field_tag, WireType::EndGroup) if field_tag == tag => return Ok(()),
                (_, WireType::EndGroup) => {
                    return Err(DecodeError::new("unexpected end group tag"))
                }
                (field_tag, field_wire_type) => {
                    msg.merge_field(field_tag, field_wire_type, buf, ctx.enter_recursion())?
                }
            }
        }
    }

    #[inline]
    pub fn encoded_len<M>(tag: u32, msg: &M) -> usize
    where
        M: Message,
    {
        2 * key_len(tag) + msg.encoded_len()
    }
}
