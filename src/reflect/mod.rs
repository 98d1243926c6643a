//! Field-level reflection over messages.
//!
//! Every message declared with the `message!` macro implements
//! [`ReflectMessage`], an object-safe trait which reads and writes fields by
//! number through the dynamic [`Value`] type, without going through the wire
//! format.

#[macro_use]
mod macros;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::{DecodeError, UnknownFieldList};

/// Static description of a message type.
#[derive(Debug)]
pub struct MessageDescriptor {
    /// Fully-qualified name, without a leading dot.
    pub full_name: &'static str,
    /// Declared fields, sorted by field number.
    pub fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    /// Looks up a field by number.
    pub fn field(&self, number: u32) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.number == number)
    }

    /// Looks up a field by its name in the schema.
    pub fn field_by_name(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Static description of one message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub number: u32,
    pub kind: Kind,
    pub cardinality: Cardinality,
}

/// The element type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int32,
    Int64,
    Uint64,
    String,
    Bytes,
    /// An enumeration, identified by its fully-qualified name.
    Enum(&'static str),
    /// A message, identified by its fully-qualified name.
    Message(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// A scalar with implicit presence: set when not equal to its zero value.
    Singular,
    /// A message field: set when present.
    Optional,
    Repeated,
}

/// A dynamically typed field value.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U64(u64),
    String(String),
    Bytes(Vec<u8>),
    /// The raw number of an enumeration value, which may not be a declared
    /// variant.
    Enum(i32),
    Message(Box<dyn ReflectMessage>),
    List(Vec<Value>),
}

impl Value {
    /// Returns the message if this value holds one.
    pub fn as_message(&self) -> Option<&dyn ReflectMessage> {
        match self {
            Value::Message(msg) => Some(msg.as_ref()),
            _ => None,
        }
    }

    /// Returns the elements if this value is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Message(a), Value::Message(b)) => {
                a.descriptor().full_name == b.descriptor().full_name
                    && a.encode_dyn() == b.encode_dyn()
            }
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

/// An error returned by a reflective field access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectError {
    /// The message declares no field with this number.
    UnknownField { message: &'static str, number: u32 },
    /// The value does not match the field's kind or cardinality.
    KindMismatch {
        message: &'static str,
        field: &'static str,
        expected: Kind,
    },
    /// `mutable` was called on a field which is not a singular message.
    NotAMessage {
        message: &'static str,
        field: &'static str,
    },
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectError::UnknownField { message, number } => {
                write!(f, "{} has no field with number {}", message, number)
            }
            ReflectError::KindMismatch {
                message,
                field,
                expected,
            } => write!(
                f,
                "value does not match field {}.{}, expected {:?}",
                message, field, expected
            ),
            ReflectError::NotAMessage { message, field } => {
                write!(f, "field {}.{} is not a singular message", message, field)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReflectError {}

/// Reflective access to the fields of a message.
pub trait ReflectMessage: fmt::Debug + Send + Sync + 'static {
    /// Returns the static description of this message type.
    fn descriptor(&self) -> &'static MessageDescriptor;

    /// Returns `true` if the field is populated: a non-zero scalar, a present
    /// message or a non-empty list. Unknown numbers are never populated.
    fn has(&self, number: u32) -> bool;

    /// Returns the value of a field. Unpopulated fields yield their default.
    fn get(&self, number: u32) -> Result<Value, ReflectError>;

    /// Replaces the value of a field.
    fn set(&mut self, number: u32, value: Value) -> Result<(), ReflectError>;

    /// Resets a field to its default.
    fn clear_field(&mut self, number: u32) -> Result<(), ReflectError>;

    /// Returns a mutable reference to a singular message field, populating it
    /// with an empty message first if needed.
    fn mutable(&mut self, number: u32) -> Result<&mut dyn ReflectMessage, ReflectError>;

    /// Fields read from the wire which this message does not declare.
    fn unknown(&self) -> &UnknownFieldList;

    fn set_unknown(&mut self, fields: UnknownFieldList);

    /// Encodes the message to a newly allocated buffer.
    fn encode_dyn(&self) -> Vec<u8>;

    /// Decodes `buf` and merges it into the message.
    fn merge_dyn(&mut self, buf: &[u8]) -> Result<(), DecodeError>;

    fn clone_box(&self) -> Box<dyn ReflectMessage>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Visits every populated field in field number order, stopping early
    /// when `f` returns `false`.
    fn range(&self, f: &mut dyn FnMut(&'static FieldDescriptor, Value) -> bool) {
        for field in self.descriptor().fields {
            if !self.has(field.number) {
                continue;
            }
            if let Ok(value) = self.get(field.number) {
                if !f(field, value) {
                    break;
                }
            }
        }
    }
}

impl Clone for Box<dyn ReflectMessage> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl dyn ReflectMessage {
    /// Returns a reference to the concrete message, if it is of type `M`.
    pub fn downcast_ref<M: ReflectMessage>(&self) -> Option<&M> {
        self.as_any().downcast_ref()
    }

    /// Returns a mutable reference to the concrete message, if it is of type
    /// `M`.
    pub fn downcast_mut<M: ReflectMessage>(&mut self) -> Option<&mut M> {
        self.as_any_mut().downcast_mut()
    }
}

/// Conversion between a Rust field type and [`Value`].
///
/// Meant to be used only by the `message!` macro.
#[doc(hidden)]
pub trait FieldValue: Sized {
    fn to_value(&self, kind: &Kind) -> Value;

    /// Returns `None` if `value` does not fit the field.
    fn from_value(value: Value, kind: &Kind) -> Option<Self>;

    fn mutable(&mut self) -> Option<&mut dyn ReflectMessage> {
        None
    }
}

macro_rules! scalar_value {
    ($ty:ty, $variant:ident, $kind:ident) => {
        impl FieldValue for $ty {
            fn to_value(&self, _kind: &Kind) -> Value {
                Value::$variant(self.clone())
            }

            fn from_value(value: Value, kind: &Kind) -> Option<Self> {
                match (value, kind) {
                    (Value::$variant(value), Kind::$kind) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

scalar_value!(bool, Bool, Bool);
scalar_value!(i64, I64, Int64);
scalar_value!(u64, U64, Uint64);
scalar_value!(String, String, String);
scalar_value!(Vec<u8>, Bytes, Bytes);

// Enumerations are stored as their raw number, so `i32` serves both kinds.
impl FieldValue for i32 {
    fn to_value(&self, kind: &Kind) -> Value {
        match kind {
            Kind::Enum(_) => Value::Enum(*self),
            _ => Value::I32(*self),
        }
    }

    fn from_value(value: Value, kind: &Kind) -> Option<Self> {
        match (value, kind) {
            (Value::I32(value), Kind::Int32) | (Value::Enum(value), Kind::Enum(_)) => Some(value),
            _ => None,
        }
    }
}

fn downcast_message<M: ReflectMessage>(value: Value) -> Option<M> {
    match value {
        Value::Message(msg) => msg.into_any().downcast::<M>().ok().map(|msg| *msg),
        _ => None,
    }
}

impl<M> FieldValue for Option<M>
where
    M: ReflectMessage + Clone + Default,
{
    fn to_value(&self, _kind: &Kind) -> Value {
        Value::Message(Box::new(self.clone().unwrap_or_default()))
    }

    fn from_value(value: Value, _kind: &Kind) -> Option<Self> {
        downcast_message(value).map(Some)
    }

    fn mutable(&mut self) -> Option<&mut dyn ReflectMessage> {
        Some(self.get_or_insert_with(M::default))
    }
}

impl FieldValue for Vec<String> {
    fn to_value(&self, _kind: &Kind) -> Value {
        Value::List(self.iter().cloned().map(Value::String).collect())
    }

    fn from_value(value: Value, _kind: &Kind) -> Option<Self> {
        match value {
            Value::List(values) => values
                .into_iter()
                .map(|value| match value {
                    Value::String(value) => Some(value),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

impl<M> FieldValue for Vec<M>
where
    M: ReflectMessage + Clone,
{
    fn to_value(&self, _kind: &Kind) -> Value {
        Value::List(
            self.iter()
                .map(|msg| Value::Message(Box::new(msg.clone())))
                .collect(),
        )
    }

    fn from_value(value: Value, _kind: &Kind) -> Option<Self> {
        match value {
            Value::List(values) => values.into_iter().map(downcast_message).collect(),
            _ => None,
        }
    }
}
