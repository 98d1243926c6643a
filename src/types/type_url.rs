/// URL/resource name that uniquely identifies the type of the serialized
/// protocol buffer message, e.g. `/cosmos.group.v1.MsgVote` or
/// `type.googleapis.com/google.protobuf.Duration`.
///
/// The last segment of the URL's path must be the fully qualified name of
/// the type, in canonical form (a leading "." is not accepted).
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct TypeUrl<'a> {
    /// Fully qualified name of the type, e.g. `cosmos.group.v1.MsgVote`.
    pub(crate) full_name: &'a str,
}

impl<'a> TypeUrl<'a> {
    pub(crate) fn new(s: &'a str) -> Option<Self> {
        // Must contain at least one "/" character.
        let slash_pos = s.rfind('/')?;

        let full_name = s.get((slash_pos + 1)..)?;
        if full_name.starts_with('.') {
            return None;
        }

        Some(Self { full_name })
    }
}
