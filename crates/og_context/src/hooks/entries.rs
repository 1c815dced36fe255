//! Hook table entries.
//!
//! Each entry stores a function pointer specialised for one concrete type.
//! Given a `&dyn Node` it downcasts to that type and calls the capability.

use core::any::Any;

use super::capabilities::{OnDeserializeEnd, OnDeserializeStart};
use super::capabilities::{OnSerializeEnd, OnSerializeStart, ShouldSerialize};
use super::type_hooks::FromType;
use crate::error::HookError;
use crate::node::Node;
use crate::options::SerializerOptions;
use crate::parameters::Parameters;

// Entries are looked up by the node's own `TypeId`, so this only fires when a
// table was inserted under the wrong type by hand.
#[cold]
#[inline(never)]
fn mismatched(hook_type: &'static str, value_type: &'static str) -> ! {
    panic!("hook type mismatched, hook type `{hook_type}` with value type `{value_type}`");
}

// -----------------------------------------------------------------------------
// HookShouldSerialize

/// Entry for types implementing [`ShouldSerialize`].
#[derive(Clone, Copy)]
pub struct HookShouldSerialize {
    func: fn(&dyn Node, &SerializerOptions, &Parameters) -> Result<bool, HookError>,
}

impl<T: ShouldSerialize + Any> FromType<T> for HookShouldSerialize {
    fn from_type() -> Self {
        Self {
            func: |value, options, parameters| {
                match value.as_any().downcast_ref::<T>() {
                    Some(value) => value.should_serialize(options, parameters),
                    None => mismatched(core::any::type_name::<T>(), value.node_type_name()),
                }
            },
        }
    }
}

impl HookShouldSerialize {
    /// Calls `T::should_serialize`.
    ///
    /// # Panic
    /// - `value` is not of the type this entry was built for.
    #[inline(always)]
    pub fn call(
        &self,
        value: &dyn Node,
        options: &SerializerOptions,
        parameters: &Parameters,
    ) -> Result<bool, HookError> {
        (self.func)(value, options, parameters)
    }
}

// -----------------------------------------------------------------------------
// Serialize listeners

macro_rules! serialize_listener {
    ($(#[$attr:meta])* $name:ident => $capability:ident::$method:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy)]
        pub struct $name {
            func: fn(&dyn Node, &Parameters) -> Result<(), HookError>,
        }

        impl<T: $capability + Any> FromType<T> for $name {
            fn from_type() -> Self {
                Self {
                    func: |value, parameters| {
                        match value.as_any().downcast_ref::<T>() {
                            Some(value) => value.$method(parameters),
                            None => mismatched(core::any::type_name::<T>(), value.node_type_name()),
                        }
                    },
                }
            }
        }

        impl $name {
            #[doc = concat!("Calls `T::", stringify!($method), "`.")]
            ///
            /// # Panic
            /// - `value` is not of the type this entry was built for.
            #[inline(always)]
            pub fn call(&self, value: &dyn Node, parameters: &Parameters) -> Result<(), HookError> {
                (self.func)(value, parameters)
            }
        }
    };
}

serialize_listener!(
    /// Entry for types implementing [`OnSerializeStart`].
    HookSerializeStart => OnSerializeStart::on_serialize_start
);

serialize_listener!(
    /// Entry for types implementing [`OnSerializeEnd`].
    HookSerializeEnd => OnSerializeEnd::on_serialize_end
);

// -----------------------------------------------------------------------------
// Deserialize listeners

macro_rules! deserialize_listener {
    ($(#[$attr:meta])* $name:ident => $capability:ident::$method:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy)]
        pub struct $name {
            func: fn(&mut dyn Node, &Parameters) -> Result<(), HookError>,
        }

        impl<T: $capability + Any> FromType<T> for $name {
            fn from_type() -> Self {
                Self {
                    func: |value, parameters| {
                        let value_type = value.node_type_name();
                        match value.as_any_mut().downcast_mut::<T>() {
                            Some(value) => value.$method(parameters),
                            None => mismatched(core::any::type_name::<T>(), value_type),
                        }
                    },
                }
            }
        }

        impl $name {
            #[doc = concat!("Calls `T::", stringify!($method), "`.")]
            ///
            /// # Panic
            /// - `value` is not of the type this entry was built for.
            #[inline(always)]
            pub fn call(&self, value: &mut dyn Node, parameters: &Parameters) -> Result<(), HookError> {
                (self.func)(value, parameters)
            }
        }
    };
}

deserialize_listener!(
    /// Entry for types implementing [`OnDeserializeStart`].
    HookDeserializeStart => OnDeserializeStart::on_deserialize_start
);

deserialize_listener!(
    /// Entry for types implementing [`OnDeserializeEnd`].
    HookDeserializeEnd => OnDeserializeEnd::on_deserialize_end
);

// -----------------------------------------------------------------------------
// Tests
