//! Declaration macros for messages and enumerations.
//!
//! A message is declared as a list of `number => name: kind` fields, where
//! `kind` is one of `bool`, `int32`, `int64`, `uint64`, `string`, `bytes`,
//! `enumeration(Type)`, `message(Type)`, `repeated_string` or
//! `repeated_message(Type)`. The macro emits the struct along with its
//! `Message`, `Name` and `ReflectMessage` implementations.

macro_rules! __field_type {
    (bool) => { bool };
    (int32) => { i32 };
    (int64) => { i64 };
    (uint64) => { u64 };
    (string) => { $crate::alloc::string::String };
    (bytes) => { $crate::alloc::vec::Vec<u8> };
    (enumeration($ty:ty)) => { i32 };
    (message($ty:ty)) => { ::core::option::Option<$ty> };
    (repeated_string) => { $crate::alloc::vec::Vec<$crate::alloc::string::String> };
    (repeated_message($ty:ty)) => { $crate::alloc::vec::Vec<$ty> };
}

macro_rules! __field_kind {
    (bool) => { $crate::reflect::Kind::Bool };
    (int32) => { $crate::reflect::Kind::Int32 };
    (int64) => { $crate::reflect::Kind::Int64 };
    (uint64) => { $crate::reflect::Kind::Uint64 };
    (string) => { $crate::reflect::Kind::String };
    (bytes) => { $crate::reflect::Kind::Bytes };
    (enumeration($ty:ty)) => { $crate::reflect::Kind::Enum(<$ty>::FULL_NAME) };
    (message($ty:ty)) => { $crate::reflect::Kind::Message(<$ty>::FULL_NAME) };
    (repeated_string) => { $crate::reflect::Kind::String };
    (repeated_message($ty:ty)) => { $crate::reflect::Kind::Message(<$ty>::FULL_NAME) };
}

macro_rules! __field_cardinality {
    (message($ty:ty)) => { $crate::reflect::Cardinality::Optional };
    (repeated_string) => { $crate::reflect::Cardinality::Repeated };
    (repeated_message($ty:ty)) => { $crate::reflect::Cardinality::Repeated };
    ($($other:tt)*) => { $crate::reflect::Cardinality::Singular };
}

macro_rules! message {
    (
        package = $package:literal;
        $(
            $(#[$meta:meta])*
            pub struct $name:ident {
                $(
                    $(#[$field_meta:meta])*
                    $tag:literal => $field:ident : $kind:ident $(($arg:ty))?
                ),* $(,)?
            }
        )*
    ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, PartialEq, Debug, Default)]
            pub struct $name {
                $(
                    $(#[$field_meta])*
                    pub $field: __field_type!($kind $(($arg))?),
                )*
                /// Fields read from the wire which this message does not declare.
                pub unknown_fields: $crate::UnknownFieldList,
            }

            impl $name {
                /// Fully-qualified name of this message type.
                pub const FULL_NAME: &'static str = concat!($package, ".", stringify!($name));
            }

            impl $crate::Message for $name {
                fn encode_raw(&self, buf: &mut impl $crate::bytes::BufMut) {
                    $( $crate::Field::encode(&self.$field, $tag, buf); )*
                    $crate::Message::encode_raw(&self.unknown_fields, buf);
                }

                fn merge_field(
                    &mut self,
                    tag: u32,
                    wire_type: $crate::encoding::WireType,
                    buf: &mut impl $crate::bytes::Buf,
                    ctx: $crate::encoding::DecodeContext,
                ) -> ::core::result::Result<(), $crate::DecodeError> {
                    const STRUCT_NAME: &str = stringify!($name);
                    match tag {
                        $(
                            $tag => $crate::Field::merge(&mut self.$field, wire_type, buf, ctx)
                                .map_err(|mut error| {
                                    error.push(STRUCT_NAME, stringify!($field));
                                    error
                                }),
                        )*
                        _ => {
                            ::log::trace!(
                                "{}: keeping unknown field {} ({:?})",
                                STRUCT_NAME,
                                tag,
                                wire_type
                            );
                            $crate::Message::merge_field(
                                &mut self.unknown_fields,
                                tag,
                                wire_type,
                                buf,
                                ctx,
                            )
                        }
                    }
                }

                fn encoded_len(&self) -> usize {
                    0 $( + $crate::Field::encoded_len(&self.$field, $tag) )*
                        + $crate::Message::encoded_len(&self.unknown_fields)
                }

                fn clear(&mut self) {
                    $( $crate::Field::clear(&mut self.$field); )*
                    $crate::Message::clear(&mut self.unknown_fields);
                }
            }

            impl $crate::Name for $name {
                const NAME: &'static str = stringify!($name);
                const PACKAGE: &'static str = $package;
            }

            impl $crate::reflect::ReflectMessage for $name {
                fn descriptor(&self) -> &'static $crate::reflect::MessageDescriptor {
                    static DESCRIPTOR: $crate::reflect::MessageDescriptor =
                        $crate::reflect::MessageDescriptor {
                            full_name: $name::FULL_NAME,
                            fields: &[
                                $(
                                    $crate::reflect::FieldDescriptor {
                                        name: stringify!($field),
                                        number: $tag,
                                        kind: __field_kind!($kind $(($arg))?),
                                        cardinality: __field_cardinality!($kind $(($arg))?),
                                    },
                                )*
                            ],
                        };
                    &DESCRIPTOR
                }

                fn has(&self, number: u32) -> bool {
                    match number {
                        $( $tag => !$crate::Field::is_default(&self.$field), )*
                        _ => false,
                    }
                }

                fn get(
                    &self,
                    number: u32,
                ) -> ::core::result::Result<$crate::reflect::Value, $crate::reflect::ReflectError> {
                    match number {
                        $(
                            $tag => Ok($crate::reflect::FieldValue::to_value(
                                &self.$field,
                                &__field_kind!($kind $(($arg))?),
                            )),
                        )*
                        _ => Err($crate::reflect::ReflectError::UnknownField {
                            message: Self::FULL_NAME,
                            number,
                        }),
                    }
                }

                fn set(
                    &mut self,
                    number: u32,
                    value: $crate::reflect::Value,
                ) -> ::core::result::Result<(), $crate::reflect::ReflectError> {
                    match number {
                        $(
                            $tag => {
                                let kind = __field_kind!($kind $(($arg))?);
                                match $crate::reflect::FieldValue::from_value(value, &kind) {
                                    Some(value) => {
                                        self.$field = value;
                                        Ok(())
                                    }
                                    None => Err($crate::reflect::ReflectError::KindMismatch {
                                        message: Self::FULL_NAME,
                                        field: stringify!($field),
                                        expected: kind,
                                    }),
                                }
                            }
                        )*
                        _ => {
                            drop(value);
                            Err($crate::reflect::ReflectError::UnknownField {
                                message: Self::FULL_NAME,
                                number,
                            })
                        }
                    }
                }

                fn clear_field(
                    &mut self,
                    number: u32,
                ) -> ::core::result::Result<(), $crate::reflect::ReflectError> {
                    match number {
                        $(
                            $tag => {
                                $crate::Field::clear(&mut self.$field);
                                Ok(())
                            }
                        )*
                        _ => Err($crate::reflect::ReflectError::UnknownField {
                            message: Self::FULL_NAME,
                            number,
                        }),
                    }
                }

                fn mutable(
                    &mut self,
                    number: u32,
                ) -> ::core::result::Result<
                    &mut dyn $crate::reflect::ReflectMessage,
                    $crate::reflect::ReflectError,
                > {
                    match number {
                        $(
                            $tag => $crate::reflect::FieldValue::mutable(&mut self.$field).ok_or(
                                $crate::reflect::ReflectError::NotAMessage {
                                    message: Self::FULL_NAME,
                                    field: stringify!($field),
                                },
                            ),
                        )*
                        _ => Err($crate::reflect::ReflectError::UnknownField {
                            message: Self::FULL_NAME,
                            number,
                        }),
                    }
                }

                fn unknown(&self) -> &$crate::UnknownFieldList {
                    &self.unknown_fields
                }

                fn set_unknown(&mut self, fields: $crate::UnknownFieldList) {
                    self.unknown_fields = fields;
                }

                fn encode_dyn(&self) -> $crate::alloc::vec::Vec<u8> {
                    $crate::Message::encode_to_vec(self)
                }

                fn merge_dyn(
                    &mut self,
                    buf: &[u8],
                ) -> ::core::result::Result<(), $crate::DecodeError> {
                    $crate::Message::merge(self, buf)
                }

                fn clone_box(&self) -> $crate::alloc::boxed::Box<dyn $crate::reflect::ReflectMessage> {
                    $crate::alloc::boxed::Box::new(::core::clone::Clone::clone(self))
                }

                fn as_any(&self) -> &dyn ::core::any::Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                    self
                }

                fn into_any(
                    self: $crate::alloc::boxed::Box<Self>,
                ) -> $crate::alloc::boxed::Box<dyn ::core::any::Any> {
                    self
                }
            }
        )*
    };
}

macro_rules! enumeration {
    (
        package = $package:literal;
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident = $first_value:literal => $first_str:literal
            $(
                ,
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal => $str:literal
            )*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(i32)]
        pub enum $name {
            $(#[$first_meta])*
            #[default]
            $first = $first_value,
            $(
                $(#[$variant_meta])*
                $variant = $value,
            )*
        }

        impl $name {
            /// Fully-qualified name of this enumeration.
            pub const FULL_NAME: &'static str = concat!($package, ".", stringify!($name));

            /// Returns `true` if `value` is a variant of this enumeration.
            pub fn is_valid(value: i32) -> bool {
                <Self as ::core::convert::TryFrom<i32>>::try_from(value).is_ok()
            }

            /// String value of the enum field names used in the ProtoBuf
            /// definition.
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    Self::$first => $first_str,
                    $( Self::$variant => $str, )*
                }
            }

            /// Creates an enum from field names used in the ProtoBuf
            /// definition.
            pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
                match value {
                    $first_str => Some(Self::$first),
                    $( $str => Some(Self::$variant), )*
                    _ => None,
                }
            }
        }

        impl ::core::convert::TryFrom<i32> for $name {
            type Error = $crate::UnknownEnumValue;

            fn try_from(value: i32) -> ::core::result::Result<Self, Self::Error> {
                match value {
                    $first_value => Ok(Self::$first),
                    $( $value => Ok(Self::$variant), )*
                    _ => Err($crate::UnknownEnumValue(value)),
                }
            }
        }

        impl ::core::convert::From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value as i32
            }
        }
    };
}
