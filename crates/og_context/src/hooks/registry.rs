use core::any::TypeId;
use core::fmt;

use og_utils::TypeIdMap;

use super::type_hooks::{FromType, GetTypeHooks, Hook, TypeHooks};
use crate::node::Node;

/// Caches the [`TypeHooks`] of every type seen so far, keyed by `TypeId`.
///
/// Tables are built lazily the first time an instance of a type is
/// dispatched on, and can also be registered up front. A table inserted by
/// hand replaces the one the type declares.
///
/// # Examples
///
/// ```
/// use og_context::hooks::{HookRegistry, HookSerializeStart, OnSerializeStart};
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
/// og_context::impl_type_hooks!(Audit);
///
/// let mut registry = HookRegistry::new();
/// assert!(registry.register::<Audit>());
/// assert!(!registry.register::<Audit>());
///
/// registry.register_hook::<Audit, HookSerializeStart>();
/// assert!(registry.get_type::<Audit>().unwrap().has_hook::<HookSerializeStart>());
/// ```
#[derive(Default, Clone)]
pub struct HookRegistry {
    tables: TypeIdMap<TypeHooks>,
}

impl HookRegistry {
    #[inline]
    pub const fn new() -> Self {
        Self {
            tables: TypeIdMap::new(),
        }
    }

    /// Registers the declared table of `T`.
    ///
    /// Returns `false` and keeps the existing table if `T` is known already.
    pub fn register<T: GetTypeHooks>(&mut self) -> bool {
        self.tables
            .try_insert(TypeId::of::<T>(), T::get_type_hooks)
    }

    /// Inserts `hooks`, replacing any table of the same type.
    pub fn insert(&mut self, hooks: TypeHooks) -> Option<TypeHooks> {
        self.tables.insert(hooks.type_id(), hooks)
    }

    /// Adds the entry `H` to the table of `T`, registering `T` first if needed.
    pub fn register_hook<T: GetTypeHooks, H: Hook + FromType<T>>(&mut self) {
        self.tables
            .get_or_insert_with(TypeId::of::<T>(), T::get_type_hooks)
            .insert_hook::<H>(H::from_type());
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeHooks> {
        self.tables.get(&type_id)
    }

    #[inline]
    pub fn get_type<T: 'static>(&self) -> Option<&TypeHooks> {
        self.tables.get_type::<T>()
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.tables.contains(&type_id)
    }

    #[inline]
    pub fn contains_type<T: 'static>(&self) -> bool {
        self.tables.contains_type::<T>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the table of the concrete type of `node`, building it on first use.
    pub(crate) fn resolve(&mut self, node: &dyn Node) -> &TypeHooks {
        let type_id = node.as_any().type_id();
        self.tables.get_or_insert_with(type_id, || {
            let hooks = node.build_type_hooks();
            log::debug!(
                "built hook table of `{}` with {} entries",
                hooks.type_name(),
                hooks.hook_len()
            );
            hooks
        })
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.tables.values().map(TypeHooks::type_name))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
