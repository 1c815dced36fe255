//! Capability checks and lifecycle dispatch.
//!
//! ## Menu
//!
//! - Capabilities a type may implement:
//!     - [`ShouldSerialize`]: veto serialization of an instance.
//!     - [`OnSerializeStart`], [`OnSerializeEnd`]: around the serialization of an instance.
//!     - [`OnDeserializeStart`], [`OnDeserializeEnd`]: around the population of an instance.
//! - [`Hook`]: a type-erased, cloneable entry of a hook table.
//! - [`FromType`]: builds a hook entry for a concrete type.
//! - Hook entries: [`HookShouldSerialize`], [`HookSerializeStart`], [`HookSerializeEnd`],
//!   [`HookDeserializeStart`], [`HookDeserializeEnd`].
//! - [`TypeHooks`]: the hook table of one type.
//! - [`GetTypeHooks`]: declares the hook table of a type, see [`impl_type_hooks!`](crate::impl_type_hooks).
//! - [`HookRegistry`]: caches hook tables by `TypeId`.
//! - [`LifecycleDispatcher`]: fires hooks for one operation.
//!
//! A type's capabilities are resolved once into its [`TypeHooks`] and cached;
//! dispatch never inspects an instance for traits.

// -----------------------------------------------------------------------------
// Modules

mod capabilities;
mod dispatch;
mod entries;
mod registry;
mod type_hooks;

// -----------------------------------------------------------------------------
// Exports

pub use capabilities::{OnDeserializeEnd, OnDeserializeStart, OnSerializeEnd, OnSerializeStart};
pub use capabilities::ShouldSerialize;
pub use dispatch::{LifecycleDispatcher, LifecycleEvent};
pub use entries::{HookDeserializeEnd, HookDeserializeStart};
pub use entries::{HookSerializeEnd, HookSerializeStart, HookShouldSerialize};
pub use registry::HookRegistry;
pub use type_hooks::{FromType, GetTypeHooks, Hook, TypeHooks};
