use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use og_utils::TypeIdMap;

// -----------------------------------------------------------------------------
// Hook

/// A type-erased entry of a [`TypeHooks`] table.
///
/// Implemented for every `Clone + Send + Sync + 'static` type; the entries
/// this crate dispatch on are the `Hook*` structs of [`hooks`](crate::hooks).
pub trait Hook: Any + Send + Sync {
    fn clone_hook(&self) -> Box<dyn Hook>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: Clone + Any + Send + Sync> Hook for T {
    #[inline]
    fn clone_hook(&self) -> Box<dyn Hook> {
        Box::new(self.clone())
    }

    #[inline(always)]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Hook {
    /// Returns the entry as a `T` if it is one.
    #[inline]
    pub fn downcast_ref<T: Hook>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

// -----------------------------------------------------------------------------
// FromType

/// Builds a hook entry for the concrete type `T`.
///
/// # Example
///
/// ```
/// use og_context::hooks::{FromType, HookSerializeStart, OnSerializeStart, TypeHooks};
/// use og_context::{HookError, Parameters};
///
/// struct Audit;
///
/// impl OnSerializeStart for Audit {
///     fn on_serialize_start(&self, _: &Parameters) -> Result<(), HookError> {
///         Ok(())
///     }
/// }
///
/// let mut hooks = TypeHooks::of::<Audit>();
/// hooks.insert_hook::<HookSerializeStart>(FromType::<Audit>::from_type());
///
/// assert!(hooks.has_hook::<HookSerializeStart>());
/// ```
pub trait FromType<T> {
    fn from_type() -> Self;
}

// -----------------------------------------------------------------------------
// TypeHooks

/// The hook table of one concrete type.
///
/// Built once per type, usually by [`GetTypeHooks::get_type_hooks`], and cached
/// by a [`HookRegistry`](crate::hooks::HookRegistry). A missing entry means the
/// type does not have that capability.
pub struct TypeHooks {
    type_id: TypeId,
    type_name: &'static str,
    table: TypeIdMap<Box<dyn Hook>>,
}

impl TypeHooks {
    /// Creates an empty table for `T`.
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            table: TypeIdMap::new(),
        }
    }

    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Inserts an entry, replacing one of the same kind.
    #[inline(always)]
    pub fn insert_hook<H: Hook>(&mut self, hook: H) {
        self.insert_hook_by_id(TypeId::of::<H>(), Box::new(hook));
    }

    #[inline(never)]
    fn insert_hook_by_id(&mut self, id: TypeId, hook: Box<dyn Hook>) {
        self.table.insert(id, hook);
    }

    /// Inserts an entry and returns the table, for building tables in one expression.
    #[inline]
    pub fn with_hook<H: Hook>(mut self, hook: H) -> Self {
        self.insert_hook(hook);
        self
    }

    pub fn remove_hook<H: Hook>(&mut self) -> Option<Box<dyn Hook>> {
        self.table.remove_type::<H>()
    }

    #[inline]
    pub fn get_hook<H: Hook>(&self) -> Option<&H> {
        self.table.get_type::<H>()?.downcast_ref::<H>()
    }

    #[inline]
    pub fn has_hook<H: Hook>(&self) -> bool {
        self.table.contains_type::<H>()
    }

    #[inline]
    pub fn hook_len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Clone for TypeHooks {
    fn clone(&self) -> Self {
        let mut table = TypeIdMap::with_capacity(self.table.len());
        for (id, hook) in self.table.iter() {
            table.insert(*id, (**hook).clone_hook());
        }

        Self {
            type_id: self.type_id,
            type_name: self.type_name,
            table,
        }
    }
}

impl fmt::Debug for TypeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHooks")
            .field("type_name", &self.type_name)
            .field("hooks", &self.table.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeHooks

/// Declares the hook table of a type.
///
/// Every `GetTypeHooks` type is a [`Node`](crate::Node). Use
/// [`impl_type_hooks!`](crate::impl_type_hooks) for non-generic types and
/// implement it by hand otherwise.
///
/// Only the entries in the returned table are dispatched. Implementing a
/// capability trait such as [`OnSerializeEnd`](crate::hooks::OnSerializeEnd)
/// without inserting its `Hook*` entry leaves the hook silently unused.
///
///
/// ```
/// use og_context::hooks::{FromType, GetTypeHooks, HookShouldSerialize, ShouldSerialize, TypeHooks};
/// use og_context::{HookError, Parameters, SerializerOptions};
///
/// struct Page<T> { items: Vec<T> }
///
/// impl<T> ShouldSerialize for Page<T> {
///     fn should_serialize(&self, _: &SerializerOptions, _: &Parameters) -> Result<bool, HookError> {
///         Ok(!self.items.is_empty())
///     }
/// }
///
/// impl<T: 'static> GetTypeHooks for Page<T> {
///     fn get_type_hooks() -> TypeHooks {
///         TypeHooks::of::<Self>().with_hook::<HookShouldSerialize>(FromType::<Self>::from_type())
///     }
/// }
///
/// assert!(Page::<u8>::get_type_hooks().has_hook::<HookShouldSerialize>());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeHooks` so it cannot take part in a serialization walk",
    note = "consider `og_context::impl_type_hooks!({Self});`"
)]
pub trait GetTypeHooks: Any + Sized {
    fn get_type_hooks() -> TypeHooks;
}

/// Implements [`GetTypeHooks`] for a non-generic type.
///
/// List the hook entries after a colon; the type must implement the matching
/// capability traits.
///
/// A capability trait whose entry is not listed is never called: the table,
/// not the trait impl, decides what fires.
///
/// ```
/// use og_context::hooks::{HookSerializeEnd, OnSerializeEnd, GetTypeHooks};
/// use og_context::{HookError, Parameters};
///
/// struct Plain;
/// struct Audited;
/// struct Unlisted;
///
/// impl OnSerializeEnd for Audited {
///     fn on_serialize_end(&self, _: &Parameters) -> Result<(), HookError> {
///         Ok(())
///     }
/// }
///
/// impl OnSerializeEnd for Unlisted {
///     fn on_serialize_end(&self, _: &Parameters) -> Result<(), HookError> {
///         Ok(())
///     }
/// }
///
/// og_context::impl_type_hooks!(Plain);
/// og_context::impl_type_hooks!(Audited: HookSerializeEnd);
/// og_context::impl_type_hooks!(Unlisted);
///
/// assert!(Plain::get_type_hooks().is_empty());
/// assert!(Audited::get_type_hooks().has_hook::<HookSerializeEnd>());
/// // `OnSerializeEnd` is implemented but not listed, so it never fires.
/// assert!(!Unlisted::get_type_hooks().has_hook::<HookSerializeEnd>());
/// ```
#[macro_export]
macro_rules! impl_type_hooks {
    ($ty:ty $(: $($hook:ident),+ $(,)?)?) => {
        impl $crate::hooks::GetTypeHooks for $ty {
            fn get_type_hooks() -> $crate::hooks::TypeHooks {
                #[allow(unused_mut, reason = "types without hooks")]
                let mut hooks = $crate::hooks::TypeHooks::of::<Self>();
                $($(
                    hooks.insert_hook::<$crate::hooks::$hook>(
                        <$crate::hooks::$hook as $crate::hooks::FromType<Self>>::from_type(),
                    );
                )+)?
                hooks
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeHooks;
    use crate::hooks::{FromType, HookSerializeEnd, HookSerializeStart};
    use crate::hooks::{OnSerializeEnd, OnSerializeStart};
    use crate::{HookError, Parameters};

    struct Stamp;

    impl OnSerializeStart for Stamp {
        fn on_serialize_start(&self, _: &Parameters) -> Result<(), HookError> {
            Ok(())
        }
    }

    impl OnSerializeEnd for Stamp {
        fn on_serialize_end(&self, _: &Parameters) -> Result<(), HookError> {
            Err(HookError::msg("end"))
        }
    }

    crate::impl_type_hooks!(Stamp: HookSerializeStart, HookSerializeEnd);

    #[test]
    fn table_operations() {
        let mut hooks = TypeHooks::of::<Stamp>();
        assert!(hooks.is_empty());

        hooks.insert_hook::<HookSerializeStart>(FromType::<Stamp>::from_type());
        assert!(hooks.has_hook::<HookSerializeStart>());
        assert!(!hooks.has_hook::<HookSerializeEnd>());
        assert!(hooks.get_hook::<HookSerializeStart>().is_some());
        assert_eq!(hooks.hook_len(), 1);

        assert!(hooks.remove_hook::<HookSerializeStart>().is_some());
        assert!(hooks.is_empty());
    }

    #[test]
    fn clone_keeps_entries() {
        let hooks = <Stamp as crate::hooks::GetTypeHooks>::get_type_hooks();
        let cloned = hooks.clone();

        assert_eq!(cloned.type_id(), core::any::TypeId::of::<Stamp>());
        assert_eq!(cloned.hook_len(), 2);

        let end = cloned.get_hook::<HookSerializeEnd>().unwrap();
        assert!(end.call(&Stamp, &Parameters::new()).is_err());
    }

    struct Unlisted;

    impl OnSerializeStart for Unlisted {
        fn on_serialize_start(&self, _: &Parameters) -> Result<(), HookError> {
            panic!("not in the hook table");
        }
    }

    crate::impl_type_hooks!(Unlisted);

    #[test]
    fn unlisted_capability_never_fires() {
        let mut registry = crate::hooks::HookRegistry::new();
        let parameters = Parameters::new();
        let mut dispatcher = crate::hooks::LifecycleDispatcher::new(&mut registry, &parameters);

        dispatcher.serialize_start(&Unlisted).unwrap();
        assert!(registry.get_type::<Unlisted>().unwrap().is_empty());
    }
}
