//! The `google.protobuf` well-known types the group messages depend on.
//!
//! `Any` carries decision policies and proposal messages, `Duration` the
//! voting and execution windows of a decision policy.

mod any;
mod duration;
mod type_url;

pub use duration::DurationError;
pub(crate) use type_url::TypeUrl;

message! {
    package = "google.protobuf";

    /// `Any` contains an arbitrary serialized protocol buffer message along
    /// with a URL that describes the type of the serialized message.
    pub struct Any {
        /// A URL/resource name that uniquely identifies the type of the
        /// serialized protocol buffer message, e.g.
        /// `/cosmos.group.v1.ThresholdDecisionPolicy`.
        1 => type_url: string,
        /// Must be a valid serialized protocol buffer of the above specified
        /// type.
        2 => value: bytes,
    }

    /// A signed, fixed-length span of time represented as a count of seconds
    /// and fractions of seconds at nanosecond resolution.
    pub struct Duration {
        /// Signed seconds of the span of time. Must be from -315,576,000,000
        /// to +315,576,000,000 inclusive.
        1 => seconds: int64,
        /// Signed fractions of a second at nanosecond resolution of the span
        /// of time. Durations less than one second are represented with a 0
        /// `seconds` field and a positive or negative `nanos` field.
        2 => nanos: int32,
    }
}
