//! This module defines the `Field` trait, implemented by every Rust type that
//! can back a field of a message, along with implementations for the types the
//! group messages use.
//!
//! The `Field` trait should not be used directly by users of this crate; the
//! `message!` macro wires it into the generated `Message` implementations.

use alloc::string::String;
use alloc::vec::Vec;

use bytes::{Buf, BufMut};

use crate::encoding::{self, DecodeContext, WireType};
use crate::{DecodeError, Message};

/// A message field with proto3 semantics.
pub trait Field: Default {
    /// Encodes the field with the provided tag, if it carries a value.
    fn encode(&self, tag: u32, buf: &mut impl BufMut);

    /// Merges one occurrence of the field into `self`.
    fn merge(
        &mut self,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError>;

    /// Returns the length of the encoded field, including its key.
    fn encoded_len(&self, tag: u32) -> usize;

    /// Returns `true` if the field would not be emitted on the wire.
    fn is_default(&self) -> bool;

    /// Resets the field to its default value.
    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Implements `Field` for a scalar with implicit presence: the zero value is
/// never written.
macro_rules! scalar_field {
    ($ty:ty, $proto_ty:ident, $is_default:expr) => {
        impl Field for $ty {
            #[inline]
            fn encode(&self, tag: u32, buf: &mut impl BufMut) {
                if !Field::is_default(self) {
                    encoding::$proto_ty::encode(tag, self, buf);
                }
            }

            #[inline]
            fn merge(
                &mut self,
                wire_type: WireType,
                buf: &mut impl Buf,
                ctx: DecodeContext,
            ) -> Result<(), DecodeError> {
                encoding::$proto_ty::merge(wire_type, self, buf, ctx)
            }

            #[inline]
            fn encoded_len(&self, tag: u32) -> usize {
                if Field::is_default(self) {
                    0
                } else {
                    encoding::$proto_ty::encoded_len(tag, self)
                }
            }

            #[inline]
            fn is_default(&self) -> bool {
                let is_default: fn(&$ty) -> bool = $is_default;
                is_default(self)
            }
        }
    };
}

scalar_field!(bool, bool, |value| !*value);
scalar_field!(i32, int32, |value| *value == 0);
scalar_field!(i64, int64, |value| *value == 0);
scalar_field!(u64, uint64, |value| *value == 0);
scalar_field!(String, string, |value| value.is_empty());
scalar_field!(Vec<u8>, bytes, |value| value.is_empty());

impl<M> Field for Option<M>
where
    M: Message + Default,
{
    fn encode(&self, tag: u32, buf: &mut impl BufMut) {
        if let Some(msg) = self {
            encoding::message::encode(tag, msg, buf);
        }
    }

    fn merge(
        &mut self,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        encoding::message::merge(wire_type, self.get_or_insert_with(M::default), buf, ctx)
    }

    fn encoded_len(&self, tag: u32) -> usize {
        self.as_ref()
            .map_or(0, |msg| encoding::message::encoded_len(tag, msg))
    }

    fn is_default(&self) -> bool {
        self.is_none()
    }
}

impl Field for Vec<String> {
    fn encode(&self, tag: u32, buf: &mut impl BufMut) {
        for value in self {
            encoding::string::encode(tag, value, buf);
        }
    }

    /// Each occurrence appends one element.
    fn merge(
        &mut self,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let mut value = String::new();
        encoding::string::merge(wire_type, &mut value, buf, ctx)?;
        self.push(value);
        Ok(())
    }

    fn encoded_len(&self, tag: u32) -> usize {
        self.iter()
            .map(|value| encoding::string::encoded_len(tag, value))
            .sum()
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }
}

impl<M> Field for Vec<M>
where
    M: Message + Default,
{
    fn encode(&self, tag: u32, buf: &mut impl BufMut) {
        for msg in self {
            encoding::message::encode(tag, msg, buf);
        }
    }

    fn merge(
        &mut self,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let mut msg = M::default();
        encoding::message::merge(wire_type, &mut msg, buf, ctx)?;
        self.push(msg);
        Ok(())
    }

    fn encoded_len(&self, tag: u32) -> usize {
        self.iter()
            .map(|msg| encoding::message::encoded_len(tag, msg))
            .sum()
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod test {
    use alloc::vec;

    use super::*;
    use crate::types::Duration;

    fn encode_field<F: Field>(field: &F, tag: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        field.encode(tag, &mut buf);
        assert_eq!(buf.len(), field.encoded_len(tag));
        buf
    }

    #[test]
    fn zero_scalars_are_skipped() {
        assert!(encode_field(&false, 1).is_empty());
        assert!(encode_field(&0i32, 1).is_empty());
        assert!(encode_field(&0i64, 1).is_empty());
        assert!(encode_field(&0u64, 1).is_empty());
        assert!(encode_field(&String::new(), 1).is_empty());
        assert!(encode_field(&Vec::<u8>::new(), 1).is_empty());
    }

    #[test]
    fn scalars_are_written_with_their_key() {
        assert_eq!(encode_field(&true, 5), [0x28, 0x01]);
        assert_eq!(
            encode_field(&-1i32, 3),
            [0x18, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );
        assert_eq!(encode_field(&150u64, 1), [0x08, 0x96, 0x01]);
        assert_eq!(encode_field(&String::from("ab"), 2), [0x12, 0x02, b'a', b'b']);
    }

    #[test]
    fn empty_message_is_written_when_present() {
        let field = Some(Duration::default());
        assert_eq!(encode_field(&field, 2), [0x12, 0x00]);
        assert!(encode_field(&None::<Duration>, 2).is_empty());
    }

    #[test]
    fn repeated_strings_keep_empty_elements() {
        let field = vec![String::new(), String::from("x")];
        assert_eq!(encode_field(&field, 2), [0x12, 0x00, 0x12, 0x01, b'x']);
    }

    #[test]
    fn message_occurrences_merge() {
        let mut field: Option<Duration> = None;
        // seconds = 5, then nanos = 7 in a second occurrence.
        let occurrences: [&[u8]; 2] = [&[0x02, 0x08, 0x05], &[0x02, 0x10, 0x07]];
        for mut buf in occurrences {
            field
                .merge(WireType::LengthDelimited, &mut buf, DecodeContext::default())
                .unwrap();
        }
        let duration = field.unwrap();
        assert_eq!(duration.seconds, 5);
        assert_eq!(duration.nanos, 7);
    }

    #[test]
    fn repeated_message_wire_type_is_checked() {
        let mut field: Vec<Duration> = Vec::new();
        let error = field
            .merge(WireType::Varint, &mut &[0x01][..], DecodeContext::default())
            .unwrap_err();
        assert_eq!(
            error.description(),
            "invalid wire type: Varint (expected LengthDelimited)"
        );
        assert!(field.is_empty());
    }

    #[test]
    fn clear_resets_to_default() {
        let mut field = String::from("value");
        Field::clear(&mut field);
        assert!(Field::is_default(&field));
    }
}
