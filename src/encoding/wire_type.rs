use alloc::format;

use crate::DecodeError;

/// The low three bits of a field key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// `int32`, `int64`, `uint64`, `bool` and enums.
    Varint = 0,
    /// `fixed64`, `sfixed64` and `double`.
    SixtyFourBit = 1,
    /// Strings, bytes, embedded messages.
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    /// `fixed32`, `sfixed32` and `float`.
    ThirtyTwoBit = 5,
}

impl WireType {
    const ALL: [WireType; 6] = [
        WireType::Varint,
        WireType::SixtyFourBit,
        WireType::LengthDelimited,
        WireType::StartGroup,
        WireType::EndGroup,
        WireType::ThirtyTwoBit,
    ];
}

impl TryFrom<u64> for WireType {
    type Error = DecodeError;

    #[inline]
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| WireType::ALL.get(index).copied())
            .ok_or_else(|| DecodeError::new(format!("invalid wire type value: {}", value)))
    }
}

/// Fails unless `actual` is the wire type the field is declared with.
#[inline]
pub fn check_wire_type(expected: WireType, actual: WireType) -> Result<(), DecodeError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DecodeError::new(format!(
            "invalid wire type: {:?} (expected {:?})",
            actual, expected
        )))
    }
}
