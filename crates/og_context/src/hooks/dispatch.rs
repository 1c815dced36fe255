use core::fmt;

use super::entries::{HookDeserializeEnd, HookDeserializeStart};
use super::entries::{HookSerializeEnd, HookSerializeStart, HookShouldSerialize};
use super::registry::HookRegistry;
use super::type_hooks::Hook;
use crate::error::HookError;
use crate::node::Node;
use crate::options::SerializerOptions;
use crate::parameters::Parameters;

// -----------------------------------------------------------------------------
// LifecycleEvent

/// The points of an operation at which hooks fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    SerializeStart,
    SerializeEnd,
    DeserializeStart,
    DeserializeEnd,
}

impl LifecycleEvent {
    #[inline]
    pub const fn is_serialize(self) -> bool {
        matches!(self, Self::SerializeStart | Self::SerializeEnd)
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SerializeStart => "serialize start",
            Self::SerializeEnd => "serialize end",
            Self::DeserializeStart => "deserialize start",
            Self::DeserializeEnd => "deserialize end",
        })
    }
}

// -----------------------------------------------------------------------------
// LifecycleDispatcher

/// Fires the hooks of one operation.
///
/// Every call is a no-op returning `Ok` when the node's type lacks the
/// capability. Hook errors are returned unchanged.
///
/// # Examples
///
/// ```
/// use og_context::hooks::{HookRegistry, LifecycleDispatcher, OnDeserializeEnd};
/// use og_context::{HookError, Parameters};
///
/// struct Totals { lines: Vec<u32>, sum: u32 }
///
/// impl OnDeserializeEnd for Totals {
///     fn on_deserialize_end(&mut self, _: &Parameters) -> Result<(), HookError> {
///         self.sum = self.lines.iter().sum();
///         Ok(())
///     }
/// }
///
/// og_context::impl_type_hooks!(Totals: HookDeserializeEnd);
///
/// let mut registry = HookRegistry::new();
/// let parameters = Parameters::new();
/// let mut dispatcher = LifecycleDispatcher::new(&mut registry, &parameters);
///
/// let mut totals = Totals { lines: vec![3, 4], sum: 0 };
/// dispatcher.deserialize_end(&mut totals).unwrap();
/// assert_eq!(totals.sum, 7);
///
/// // `u8` has no hooks at all.
/// assert!(dispatcher.serialize_start(&1_u8).is_ok());
/// ```
pub struct LifecycleDispatcher<'a> {
    registry: &'a mut HookRegistry,
    parameters: &'a Parameters,
}

impl<'a> LifecycleDispatcher<'a> {
    #[inline]
    pub fn new(registry: &'a mut HookRegistry, parameters: &'a Parameters) -> Self {
        Self {
            registry,
            parameters,
        }
    }

    #[inline]
    pub fn parameters(&self) -> &'a Parameters {
        self.parameters
    }

    #[inline(always)]
    fn hook<H: Hook + Copy>(&mut self, node: &dyn Node) -> Option<H> {
        self.registry.resolve(node).get_hook::<H>().copied()
    }

    /// Asks the node whether it wants to be serialized, `true` if it has no opinion.
    pub fn should_serialize(
        &mut self,
        node: &dyn Node,
        options: &SerializerOptions,
    ) -> Result<bool, HookError> {
        match self.hook::<HookShouldSerialize>(node) {
            Some(hook) => hook.call(node, options, self.parameters),
            None => Ok(true),
        }
    }

    pub fn serialize_start(&mut self, node: &dyn Node) -> Result<(), HookError> {
        if let Some(hook) = self.hook::<HookSerializeStart>(node) {
            log::trace!("{} of `{}`", LifecycleEvent::SerializeStart, node.node_type_name());
            hook.call(node, self.parameters)?;
        }
        Ok(())
    }

    pub fn serialize_end(&mut self, node: &dyn Node) -> Result<(), HookError> {
        if let Some(hook) = self.hook::<HookSerializeEnd>(node) {
            log::trace!("{} of `{}`", LifecycleEvent::SerializeEnd, node.node_type_name());
            hook.call(node, self.parameters)?;
        }
        Ok(())
    }

    pub fn deserialize_start(&mut self, node: &mut dyn Node) -> Result<(), HookError> {
        if let Some(hook) = self.hook::<HookDeserializeStart>(node) {
            log::trace!("{} of `{}`", LifecycleEvent::DeserializeStart, node.node_type_name());
            hook.call(node, self.parameters)?;
        }
        Ok(())
    }

    pub fn deserialize_end(&mut self, node: &mut dyn Node) -> Result<(), HookError> {
        if let Some(hook) = self.hook::<HookDeserializeEnd>(node) {
            log::trace!("{} of `{}`", LifecycleEvent::DeserializeEnd, node.node_type_name());
            hook.call(node, self.parameters)?;
        }
        Ok(())
    }

    /// Fires the hook of `event` on `node`.
    ///
    /// Serialize events only read the node; the mutable borrow is needed for
    /// the deserialize events.
    pub fn dispatch(&mut self, event: LifecycleEvent, node: &mut dyn Node) -> Result<(), HookError> {
        match event {
            LifecycleEvent::SerializeStart => self.serialize_start(node),
            LifecycleEvent::SerializeEnd => self.serialize_end(node),
            LifecycleEvent::DeserializeStart => self.deserialize_start(node),
            LifecycleEvent::DeserializeEnd => self.deserialize_end(node),
        }
    }
}

impl fmt::Debug for LifecycleDispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleDispatcher")
            .field("registry", &self.registry)
            .field("parameters", &self.parameters)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::cell::Cell;

    use super::{LifecycleDispatcher, LifecycleEvent};
    use crate::hooks::{HookRegistry, OnDeserializeStart, OnSerializeEnd, OnSerializeStart};
    use crate::hooks::ShouldSerialize;
    use crate::{HookError, Parameters, SerializerOptions};

    struct Tracked {
        starts: Cell<u32>,
        ends: Cell<u32>,
        loaded: bool,
    }

    impl Tracked {
        fn new() -> Self {
            Self {
                starts: Cell::new(0),
                ends: Cell::new(0),
                loaded: false,
            }
        }
    }

    impl OnSerializeStart for Tracked {
        fn on_serialize_start(&self, _: &Parameters) -> Result<(), HookError> {
            self.starts.set(self.starts.get() + 1);
            Ok(())
        }
    }

    impl OnSerializeEnd for Tracked {
        fn on_serialize_end(&self, parameters: &Parameters) -> Result<(), HookError> {
            if parameters.contains::<bool>() {
                return Err(HookError::msg("end rejected"));
            }
            self.ends.set(self.ends.get() + 1);
            Ok(())
        }
    }

    impl OnDeserializeStart for Tracked {
        fn on_deserialize_start(&mut self, _: &Parameters) -> Result<(), HookError> {
            self.loaded = true;
            Ok(())
        }
    }

    impl ShouldSerialize for Tracked {
        fn should_serialize(
            &self,
            options: &SerializerOptions,
            _: &Parameters,
        ) -> Result<bool, HookError> {
            Ok(options.pretty)
        }
    }

    crate::impl_type_hooks!(
        Tracked: HookSerializeStart,
        HookSerializeEnd,
        HookDeserializeStart,
        HookShouldSerialize
    );

    #[test]
    fn fires_present_hooks_only() {
        let mut registry = HookRegistry::new();
        let parameters = Parameters::new();
        let mut dispatcher = LifecycleDispatcher::new(&mut registry, &parameters);

        let mut tracked = Tracked::new();

        dispatcher.dispatch(LifecycleEvent::SerializeStart, &mut tracked).unwrap();
        dispatcher.serialize_end(&tracked).unwrap();
        dispatcher.deserialize_start(&mut tracked).unwrap();
        // No `HookDeserializeEnd` entry.
        dispatcher.deserialize_end(&mut tracked).unwrap();

        assert_eq!(tracked.starts.get(), 1);
        assert_eq!(tracked.ends.get(), 1);
        assert!(tracked.loaded);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn dispatch_routes_every_event() {
        let mut registry = HookRegistry::new();
        let parameters = Parameters::new();
        let mut dispatcher = LifecycleDispatcher::new(&mut registry, &parameters);

        let mut tracked = Tracked::new();

        dispatcher.dispatch(LifecycleEvent::DeserializeStart, &mut tracked).unwrap();
        assert!(tracked.loaded);

        dispatcher.dispatch(LifecycleEvent::SerializeEnd, &mut tracked).unwrap();
        dispatcher.dispatch(LifecycleEvent::DeserializeEnd, &mut tracked).unwrap();
        assert_eq!(tracked.ends.get(), 1);
        assert_eq!(tracked.starts.get(), 0);
    }

    #[test]
    fn predicate_defaults_to_true() {
        let mut registry = HookRegistry::new();
        let parameters = Parameters::new();
        let mut dispatcher = LifecycleDispatcher::new(&mut registry, &parameters);

        let compact = SerializerOptions::new();
        let pretty = SerializerOptions::new().with_pretty(2);

        assert!(dispatcher.should_serialize(&"plain", &compact).unwrap());
        assert!(!dispatcher.should_serialize(&Tracked::new(), &compact).unwrap());
        assert!(dispatcher.should_serialize(&Tracked::new(), &pretty).unwrap());
    }

    #[test]
    fn hook_error_is_returned() {
        let mut registry = HookRegistry::new();
        let parameters = Parameters::new().with(true);
        let mut dispatcher = LifecycleDispatcher::new(&mut registry, &parameters);

        let tracked = Tracked::new();
        let err = dispatcher.serialize_end(&tracked).unwrap_err();

        assert_eq!(err.to_string(), "end rejected");
        assert_eq!(tracked.ends.get(), 0);
    }

    #[test]
    fn event_names() {
        assert_eq!(LifecycleEvent::DeserializeEnd.to_string(), "deserialize end");
        assert!(LifecycleEvent::SerializeEnd.is_serialize());
        assert!(!LifecycleEvent::DeserializeStart.is_serialize());
    }
}
