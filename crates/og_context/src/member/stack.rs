use alloc::vec::Vec;
use core::fmt;
use core::slice::Iter;

use crate::error::{ContextError, Result};
use crate::member::MemberDescriptor;

/// The chain of members currently being processed, innermost last.
///
/// Its depth always equals the member nesting depth of the traversal.
/// Querying it with nothing active is a protocol violation and fails with
/// [`ContextError::EmptyContext`].
#[derive(Default, Clone)]
pub struct MemberStack<'m> {
    stack: Vec<&'m MemberDescriptor>,
}

impl<'m> MemberStack<'m> {
    #[inline]
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, member: &'m MemberDescriptor) {
        self.stack.push(member);
    }

    /// Pops the innermost member.
    pub fn pop(&mut self) -> Result<&'m MemberDescriptor> {
        self.stack.pop().ok_or(ContextError::EmptyContext)
    }

    /// Returns the innermost member without removing it.
    pub fn current(&self) -> Result<&'m MemberDescriptor> {
        self.stack.last().copied().ok_or(ContextError::EmptyContext)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterates from the outermost member to the innermost.
    #[inline]
    pub fn iter(&self) -> Iter<'_, &'m MemberDescriptor> {
        self.stack.iter()
    }
}

/// Formats the path as `` `a` -> `b` -> `c` ``.
impl fmt::Display for MemberStack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.iter();

        if let Some(first) = iter.next() {
            write!(f, "`{first}`")?;
        }

        for member in iter {
            write!(f, " -> `{member}`")?;
        }

        Ok(())
    }
}

impl fmt::Debug for MemberStack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.stack.iter().map(|member| member.name()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::MemberStack;
    use crate::error::ContextError;
    use crate::member::MemberDescriptor;

    #[test]
    fn nesting() {
        let m1 = MemberDescriptor::new("order");
        let m2 = MemberDescriptor::new("lines");
        let m3 = MemberDescriptor::new("price");

        let mut stack = MemberStack::new();
        stack.push(&m1);
        stack.push(&m2);
        stack.push(&m3);

        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.current().unwrap(), &m3);
        assert_eq!(stack.to_string(), "`order` -> `lines` -> `price`");

        assert_eq!(stack.pop().unwrap(), &m3);
        assert_eq!(stack.current().unwrap(), &m2);
    }

    #[test]
    fn empty_is_an_error() {
        let m1 = MemberDescriptor::new("only");
        let mut stack = MemberStack::new();

        assert!(matches!(stack.current(), Err(ContextError::EmptyContext)));

        stack.push(&m1);
        stack.pop().unwrap();

        assert!(matches!(stack.pop(), Err(ContextError::EmptyContext)));
        assert!(stack.is_empty());
        assert_eq!(stack.to_string(), "");
    }
}
