use alloc::borrow::Cow;
use core::fmt;

// -----------------------------------------------------------------------------
// MemberKind

/// How a member is written by the markup collaborator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A nested element named after the member.
    #[default]
    Element,
    /// An attribute of the owning element.
    Attribute,
    /// The text content of the owning element.
    Text,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemberKind::Element => "element",
            MemberKind::Attribute => "attribute",
            MemberKind::Text => "text",
        })
    }
}

// -----------------------------------------------------------------------------
// MemberDescriptor

/// Static description of one serializable member of a type.
///
/// Descriptors are independent of any instance. They can live in a `static`
/// since [`new`](Self::new) and the `with_*` builders are `const`.
///
/// # Examples
///
/// ```
/// use og_context::member::{MemberDescriptor, MemberKind};
///
/// static NOTE: MemberDescriptor = MemberDescriptor::new("note")
///     .with_kind(MemberKind::Text)
///     .with_serialize_if_null(true);
///
/// assert_eq!(NOTE.name(), "note");
/// assert!(NOTE.is_text());
/// assert!(NOTE.serialize_if_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberDescriptor {
    name: Cow<'static, str>,
    serialize_if_null: bool,
    kind: MemberKind,
}

impl MemberDescriptor {
    /// Creates an element member that is skipped when absent.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            serialize_if_null: false,
            kind: MemberKind::Element,
        }
    }

    /// Creates an element member from a runtime name.
    #[inline]
    pub fn from_name(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            serialize_if_null: false,
            kind: MemberKind::Element,
        }
    }

    #[inline]
    pub const fn with_serialize_if_null(mut self, serialize_if_null: bool) -> Self {
        self.serialize_if_null = serialize_if_null;
        self
    }

    #[inline]
    pub const fn with_kind(mut self, kind: MemberKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an absent value is still emitted (as an empty node).
    #[inline]
    pub const fn serialize_if_null(&self) -> bool {
        self.serialize_if_null
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, MemberKind::Text)
    }
}

impl fmt::Display for MemberDescriptor {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// -----------------------------------------------------------------------------
// Tests
