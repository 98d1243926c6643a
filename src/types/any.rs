use alloc::format;
use alloc::vec::Vec;

use super::{Any, TypeUrl};
use crate::{DecodeError, EncodeError, Message, Name};

impl Any {
    /// Serialize the given message type `M` as [`Any`].
    pub fn from_msg<M>(msg: &M) -> Result<Self, EncodeError>
    where
        M: Name,
    {
        let type_url = M::type_url();
        let mut value = Vec::new();
        Message::encode(msg, &mut value)?;
        Ok(Any {
            type_url,
            value,
            ..Default::default()
        })
    }

    /// Decode the given message type `M` from [`Any`], validating that it has
    /// the expected type URL.
    pub fn to_msg<M>(&self) -> Result<M, DecodeError>
    where
        M: Default + Name + Sized,
    {
        if self.is(M::full_name().as_str()) {
            return M::decode(self.value.as_slice());
        }

        let mut err = DecodeError::new(format!(
            "expected type URL: \"{}\" (got: \"{}\")",
            M::type_url(),
            &self.type_url
        ));
        err.push("unexpected type URL", "type_url");
        Err(err)
    }

    /// Returns `true` if the type URL names the message `full_name`, whatever
    /// its authority.
    pub fn is(&self, full_name: &str) -> bool {
        TypeUrl::new(&self.type_url).is_some_and(|url| url.full_name == full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Duration;

    #[test]
    fn check_any_serialization() {
        let message = Duration {
            seconds: 90,
            nanos: 5,
            ..Default::default()
        };
        let any = Any::from_msg(&message).unwrap();
        assert_eq!(&any.type_url, "/google.protobuf.Duration");

        let message2 = any.to_msg::<Duration>().unwrap();
        assert_eq!(message, message2);

        // Wrong type URL
        let err = any.to_msg::<Any>().unwrap_err();
        assert_eq!(
            err.description(),
            "expected type URL: \"/google.protobuf.Any\" (got: \"/google.protobuf.Duration\")"
        );
    }

    #[test]
    fn any_authority_is_ignored() {
        let any = Any {
            type_url: "type.googleapis.com/google.protobuf.Duration".into(),
            value: alloc::vec![0x08, 0x01],
            ..Default::default()
        };
        assert_eq!(any.to_msg::<Duration>().unwrap().seconds, 1);
        assert!(any.is("google.protobuf.Duration"));
        assert!(!any.is("google.protobuf"));
    }
}
