use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::error::Error;
use core::fmt;

use crate::member::MemberStack;
use crate::node::ObjectId;

/// Result type alias for context operations.
pub type Result<T, E = ContextError> = core::result::Result<T, E>;

// -----------------------------------------------------------------------------
// ContextError

/// Every way a [`SerializationContext`](crate::SerializationContext) call can fail.
///
/// All variants are fatal to the current operation: the caller is expected to
/// unwind the whole traversal with `?`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ContextError {
    /// An exit did not match the innermost open object.
    ///
    /// The innermost entry has already been popped when this is returned.
    #[error("structural mismatch: exited {found} but the innermost open object was {}{}", describe_open(.expected), describe_members(.members))]
    StructuralMismatch {
        expected: Option<ObjectId>,
        found: ObjectId,
        members: String,
    },

    /// The member stack was queried or popped while empty.
    #[error("no member is currently being processed")]
    EmptyContext,

    /// A node was entered while the same identity was still open.
    #[error("{id} is already open on the serialization path")]
    AlreadyOpen { id: ObjectId },

    /// Entering a node would exceed `SerializerOptions::max_depth`.
    #[error("entering {id} exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize, id: ObjectId },

    /// The context was finished with objects or members still open.
    #[error("context finished with {open_objects} open objects and {active_members} active members")]
    Unbalanced {
        open_objects: usize,
        active_members: usize,
    },

    /// A predicate or lifecycle hook failed.
    #[error(transparent)]
    Hook(#[from] HookError),
}

impl ContextError {
    #[inline]
    pub(crate) fn mismatch(expected: Option<ObjectId>, found: ObjectId) -> Self {
        Self::StructuralMismatch {
            expected,
            found,
            members: String::new(),
        }
    }

    /// Records the active member path on a structural mismatch.
    #[cfg(all(debug_assertions, feature = "debug"))]
    pub(crate) fn with_members(mut self, stack: &MemberStack<'_>) -> Self {
        if let Self::StructuralMismatch { members, .. } = &mut self
            && !stack.is_empty()
        {
            *members = stack.to_string();
        }
        self
    }

    #[cfg(not(all(debug_assertions, feature = "debug")))]
    #[inline(always)]
    pub(crate) fn with_members(self, _stack: &MemberStack<'_>) -> Self {
        self
    }

    /// Returns the hook error if this failure came from user code.
    pub fn as_hook_error(&self) -> Option<&HookError> {
        match self {
            Self::Hook(err) => Some(err),
            _ => None,
        }
    }
}

fn describe_open(expected: &Option<ObjectId>) -> String {
    match expected {
        Some(id) => id.to_string(),
        None => String::from("nothing"),
    }
}

fn describe_members(members: &str) -> String {
    if members.is_empty() {
        String::new()
    } else {
        alloc::format!(" (members: {members})")
    }
}

// -----------------------------------------------------------------------------
// HookError

/// The error a should-serialize predicate or lifecycle hook reports.
///
/// The context never inspects or rewraps it; it reaches the caller as
/// [`ContextError::Hook`] with the original source intact.
///
/// # Examples
///
/// ```
/// use og_context::HookError;
///
/// #[derive(Debug)]
/// struct Locked;
///
/// impl core::fmt::Display for Locked {
///     fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
///         f.write_str("record is locked")
///     }
/// }
///
/// impl core::error::Error for Locked {}
///
/// let err = HookError::new(Locked);
/// assert_eq!(err.to_string(), "record is locked");
/// assert!(err.downcast_ref::<Locked>().is_some());
///
/// let err = HookError::msg("veto");
/// assert!(err.downcast_ref::<Locked>().is_none());
/// ```
#[derive(Debug)]
pub struct HookError {
    message: Cow<'static, str>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl HookError {
    /// Creates an error carrying only a message.
    #[inline]
    pub fn msg(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an error raised by user code.
    pub fn new<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self {
            message: Cow::Owned(error.to_string()),
            source: Some(Box::new(error)),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the wrapped error if it is an `E`.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.source.as_deref()?.downcast_ref::<E>()
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for HookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.source {
            Some(source) => Some(&**source),
            None => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::error::Error;

    use super::{ContextError, HookError};

    #[derive(Debug)]
    struct Quota(u32);

    impl core::fmt::Display for Quota {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            write!(f, "quota of {} exceeded", self.0)
        }
    }

    impl Error for Quota {}

    #[test]
    fn hook_error_is_transparent() {
        let err: ContextError = HookError::new(Quota(3)).into();

        assert_eq!(err.to_string(), "quota of 3 exceeded");

        let hook = err.as_hook_error().unwrap();
        assert_eq!(hook.downcast_ref::<Quota>().unwrap().0, 3);
        assert!(hook.source().is_some());
    }

    #[test]
    fn message_only_has_no_source() {
        let err = HookError::msg("denied");

        assert_eq!(err.message(), "denied");
        assert!(err.source().is_none());
        assert!(err.downcast_ref::<Quota>().is_none());
    }

    #[test]
    fn unbalanced_message() {
        let err = ContextError::Unbalanced {
            open_objects: 2,
            active_members: 1,
        };

        assert_eq!(
            err.to_string(),
            "context finished with 2 open objects and 1 active members"
        );
        assert!(err.as_hook_error().is_none());
    }
}
