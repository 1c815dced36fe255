use alloc::vec::Vec;
use core::slice::Iter;

use crate::error::{ContextError, Result};
use crate::node::ObjectId;

/// The identities open on the current path, from the root to the innermost node.
///
/// This is a visited set of the *path*, not of the whole graph: a node that
/// was entered and exited can be entered again. Lookups scan the path, its
/// length is bounded by the graph depth.
///
/// # Examples
///
/// ```
/// use og_context::{ContextError, ObjectId, VisitedSet};
///
/// let (a, b) = (String::from("a"), String::from("b"));
/// let (a, b) = (ObjectId::of(&a), ObjectId::of(&b));
///
/// let mut visited = VisitedSet::new();
/// visited.enter(a).unwrap();
/// visited.enter(b).unwrap();
///
/// // `a` is not the innermost object; `b` is popped anyway.
/// let err = visited.exit(a).unwrap_err();
/// assert!(matches!(err, ContextError::StructuralMismatch { .. }));
/// assert_eq!(visited.depth(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    path: Vec<ObjectId>,
}

impl VisitedSet {
    #[inline]
    pub const fn new() -> Self {
        Self { path: Vec::new() }
    }

    /// Records `id` as open.
    ///
    /// Fails with [`ContextError::AlreadyOpen`] if it is open already,
    /// an identity is never open twice at once.
    pub fn enter(&mut self, id: ObjectId) -> Result<()> {
        if self.contains(id) {
            return Err(ContextError::AlreadyOpen { id });
        }
        self.path.push(id);
        Ok(())
    }

    /// Closes the innermost open identity, which must be `id`.
    ///
    /// The innermost entry is removed even when it does not match, so an
    /// enclosing handler still sees a consistent path.
    pub fn exit(&mut self, id: ObjectId) -> Result<()> {
        match self.path.pop() {
            Some(open) if open == id => Ok(()),
            expected => Err(ContextError::mismatch(expected, id)),
        }
    }

    /// Whether `id` is open anywhere on the path.
    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.path.iter().rev().any(|open| *open == id)
    }

    #[inline]
    pub fn innermost(&self) -> Option<ObjectId> {
        self.path.last().copied()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Iterates from the root to the innermost identity.
    #[inline]
    pub fn iter(&self) -> Iter<'_, ObjectId> {
        self.path.iter()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::VisitedSet;
    use crate::error::ContextError;
    use crate::node::ObjectId;

    #[test]
    fn balanced() {
        let nodes = [1_u32, 2, 3, 4];
        let ids = nodes.each_ref().map(|n| ObjectId::of(n));

        let mut visited = VisitedSet::new();
        for id in ids {
            visited.enter(id).unwrap();
        }

        assert_eq!(visited.depth(), 4);
        assert_eq!(visited.innermost(), Some(ids[3]));
        assert!(ids.iter().all(|id| visited.contains(*id)));

        for id in ids.iter().rev() {
            visited.exit(*id).unwrap();
        }

        assert!(visited.is_empty());
        assert!(!visited.contains(ids[0]));
    }

    #[test]
    fn out_of_order_exit_still_pops() {
        let nodes = [1_u32, 2, 3];
        let ids = nodes.each_ref().map(|n| ObjectId::of(n));

        let mut visited = VisitedSet::new();
        for id in ids {
            visited.enter(id).unwrap();
        }

        match visited.exit(ids[0]) {
            Err(ContextError::StructuralMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, Some(ids[2]));
                assert_eq!(found, ids[0]);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        assert_eq!(visited.depth(), 2);
        assert_eq!(visited.innermost(), Some(ids[1]));
    }

    #[test]
    fn exit_with_nothing_open() {
        let value = 5_u8;
        let mut visited = VisitedSet::new();

        assert!(matches!(
            visited.exit(ObjectId::of(&value)),
            Err(ContextError::StructuralMismatch { expected: None, .. })
        ));
        assert!(visited.is_empty());
    }

    #[test]
    fn reentry_is_rejected() {
        let value = 5_u8;
        let id = ObjectId::of(&value);
        let mut visited = VisitedSet::new();

        visited.enter(id).unwrap();

        assert!(matches!(
            visited.enter(id),
            Err(ContextError::AlreadyOpen { .. })
        ));
        assert_eq!(visited.depth(), 1);

        visited.exit(id).unwrap();
        visited.enter(id).unwrap();
    }
}
