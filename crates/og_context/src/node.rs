use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::hooks::{GetTypeHooks, TypeHooks};

// -----------------------------------------------------------------------------
// Node

/// An object that can take part in a serialization walk.
///
/// `Node` is object safe, the context only ever sees `&dyn Node`. It is
/// implemented for every [`GetTypeHooks`] type, so implementing that trait
/// (usually through [`impl_type_hooks!`](crate::impl_type_hooks)) is all a
/// type needs.
///
/// # Examples
///
/// ```
/// use og_context::{Node, ObjectId};
///
/// struct Invoice { total: u64 }
/// og_context::impl_type_hooks!(Invoice);
///
/// let a = Invoice { total: 10 };
/// let b = Invoice { total: 10 };
///
/// assert!(a.node_type_name().ends_with("Invoice"));
/// assert_ne!(ObjectId::of(&a), ObjectId::of(&b));
/// ```
pub trait Node: Any {
    /// The concrete type name, used in diagnostics.
    fn node_type_name(&self) -> &'static str;

    /// Builds the hook table of the concrete type.
    ///
    /// Called at most once per type and [`HookRegistry`](crate::hooks::HookRegistry).
    fn build_type_hooks(&self) -> TypeHooks;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: GetTypeHooks> Node for T {
    #[inline]
    fn node_type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    #[inline]
    fn build_type_hooks(&self) -> TypeHooks {
        T::get_type_hooks()
    }

    #[inline(always)]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline(always)]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// -----------------------------------------------------------------------------
// ObjectId

/// The identity of one object in memory.
///
/// Two ids are equal only if they refer to the same address *and* the same
/// concrete type. The type is part of the key because a struct and its first
/// field share an address. Values that are merely equal never share an id.
///
/// Zero-sized values carry no storage, distinct instances may share an id.
#[derive(Clone, Copy)]
pub struct ObjectId {
    addr: usize,
    type_id: TypeId,
    type_name: &'static str,
}

impl ObjectId {
    /// Returns the identity of `node`.
    #[inline]
    pub fn of(node: &dyn Node) -> Self {
        Self {
            addr: core::ptr::from_ref(node).cast::<()>() as usize,
            type_id: node.as_any().type_id(),
            type_name: node.node_type_name(),
        }
    }

    #[inline]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for ObjectId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr && self.type_id == other.type_id
    }
}

impl Eq for ObjectId {}

impl Hash for ObjectId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr.hash(state);
        self.type_id.hash(state);
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`@{:#x}", self.type_name, self.addr)
    }
}

impl fmt::Debug for ObjectId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::ObjectId;

    #[derive(PartialEq)]
    struct Outer {
        inner: Inner,
        tail: u32,
    }

    #[derive(PartialEq)]
    struct Inner {
        value: u64,
    }

    crate::impl_type_hooks!(Outer);
    crate::impl_type_hooks!(Inner);

    #[test]
    fn identity_is_not_value_equality() {
        let a = Inner { value: 1 };
        let b = Inner { value: 1 };

        assert!(a == b);
        assert_ne!(ObjectId::of(&a), ObjectId::of(&b));
        assert_eq!(ObjectId::of(&a), ObjectId::of(&a));
    }

    #[test]
    fn shared_address_different_type() {
        let outer = Outer {
            inner: Inner { value: 7 },
            tail: 0,
        };

        let outer_id = ObjectId::of(&outer);
        let inner_id = ObjectId::of(&outer.inner);
        let tail_id = ObjectId::of(&outer.tail);

        assert_ne!(outer_id, inner_id);
        assert_ne!(outer_id, tail_id);
        assert_eq!(inner_id.type_name(), core::any::type_name::<Inner>());
    }

    #[test]
    fn same_address_through_trait_object() {
        let items = vec![String::from("a"), String::from("b")];
        let node: &dyn super::Node = &items[1];

        assert_eq!(ObjectId::of(node), ObjectId::of(&items[1]));
        assert_ne!(ObjectId::of(node), ObjectId::of(&items[0]));
        assert!(ObjectId::of(node).to_string().contains("String"));
    }
}
