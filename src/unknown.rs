use alloc::format;
use alloc::vec::Vec;
use core::slice;

use bytes::{Buf, BufMut};

use crate::encoding::{self, DecodeContext, WireType, MAX_TAG, MIN_TAG};
use crate::{DecodeError, Message};

/// A set of unknown fields in a protobuf message.
///
/// Every message of this crate carries one, so that fields added by newer
/// versions of the schema survive a decode/encode round trip. Fields are kept
/// in the order they were read and written back in that same order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct UnknownFieldList {
    fields: Vec<(u32, UnknownField)>,
}

/// An unknown field in a protobuf message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnknownField {
    /// An unknown field with the `Varint` wire type.
    Varint(u64),
    /// An unknown field with the `SixtyFourBit` wire type.
    SixtyFourBit(u64),
    /// An unknown field with the `LengthDelimited` wire type.
    LengthDelimited(Vec<u8>),
    /// An unknown field with the group wire type.
    Group(UnknownFieldList),
    /// An unknown field with the `ThirtyTwoBit` wire type.
    ThirtyTwoBit(u32),
}

/// An iterator over the fields of an [UnknownFieldList].
#[derive(Debug)]
pub struct UnknownFieldIter<'a> {
    inner: slice::Iter<'a, (u32, UnknownField)>,
}

impl UnknownFieldList {
    /// Creates an empty [UnknownFieldList].
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns `true` if no unknown field has been recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Appends an unknown field after every field recorded so far.
    ///
    /// Fails if `tag` is not a valid field number (`1..=2^29 - 1`).
    pub fn push(&mut self, tag: u32, field: UnknownField) -> Result<(), DecodeError> {
        if !(MIN_TAG..=MAX_TAG).contains(&tag) {
            return Err(DecodeError::new(format!("invalid tag value: {}", tag)));
        }
        self.fields.push((tag, field));
        Ok(())
    }

    /// Gets an iterator over the fields contained in this set, in arrival
    /// order.
    pub fn iter(&self) -> UnknownFieldIter<'_> {
        UnknownFieldIter {
            inner: self.fields.iter(),
        }
    }
}

impl<'a> Iterator for UnknownFieldIter<'a> {
    type Item = (u32, &'a UnknownField);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(tag, field)| (*tag, field))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for UnknownFieldIter<'_> {}

impl Message for UnknownFieldList {
    fn encode_raw(&self, buf: &mut impl BufMut)
    where
        Self: Sized,
    {
        for (tag, field) in self.iter() {
            match field {
                UnknownField::Varint(value) => {
                    encoding::encode_key(tag, WireType::Varint, buf);
                    encoding::encode_varint(*value, buf);
                }
                UnknownField::SixtyFourBit(value) => {
                    encoding::encode_key(tag, WireType::SixtyFourBit, buf);
                    buf.put_u64_le(*value);
                }
                UnknownField::LengthDelimited(value) => {
                    encoding::bytes::encode(tag, value, buf);
                }
                UnknownField::Group(value) => {
                    encoding::group::encode(tag, value, buf);
                }
                UnknownField::ThirtyTwoBit(value) => {
                    encoding::encode_key(tag, WireType::ThirtyTwoBit, buf);
                    buf.put_u32_le(*value);
                }
            }
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError>
    where
        Self: Sized,
    {
        let field = match wire_type {
            WireType::Varint => UnknownField::Varint(encoding::decode_varint(buf)?),
            WireType::SixtyFourBit => {
                if buf.remaining() < 8 {
                    return Err(DecodeError::new("buffer underflow"));
                }
                UnknownField::SixtyFourBit(buf.get_u64_le())
            }
            WireType::LengthDelimited => {
                let mut value = Vec::new();
                encoding::bytes::merge(wire_type, &mut value, buf, ctx)?;
                UnknownField::LengthDelimited(value)
            }
            WireType::StartGroup => {
                let mut value = UnknownFieldList::default();
                encoding::group::merge(tag, wire_type, &mut value, buf, ctx)?;
                UnknownField::Group(value)
            }
            WireType::EndGroup => {
                return Err(DecodeError::new("unexpected end group tag"));
            }
            WireType::ThirtyTwoBit => {
                if buf.remaining() < 4 {
                    return Err(DecodeError::new("buffer underflow"));
                }
                UnknownField::ThirtyTwoBit(buf.get_u32_le())
            }
        };

        self.push(tag, field)
    }

    fn encoded_len(&self) -> usize {
        self.iter()
            .map(|(tag, field)| match field {
                UnknownField::Varint(value) => {
                    encoding::key_len(tag) + encoding::encoded_len_varint(*value)
                }
                UnknownField::SixtyFourBit(_) => encoding::key_len(tag) + 8,
                UnknownField::LengthDelimited(value) => encoding::bytes::encoded_len(tag, value),
                UnknownField::Group(value) => encoding::group::encoded_len(tag, value),
                UnknownField::ThirtyTwoBit(_) => encoding::key_len(tag) + 4,
            })
            .sum()
    }

    fn clear(&mut self) {
        self.fields.clear();
    }
}
