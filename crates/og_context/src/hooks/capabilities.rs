use crate::error::HookError;
use crate::options::SerializerOptions;
use crate::parameters::Parameters;

/// Lets an instance veto its own serialization.
///
/// Consulted after the null policy and before cycle suppression, so it is
/// never asked about an absent value.
pub trait ShouldSerialize {
    fn should_serialize(
        &self,
        options: &SerializerOptions,
        parameters: &Parameters,
    ) -> Result<bool, HookError>;
}

/// Notified when the instance is entered, before any of its members is evaluated.
pub trait OnSerializeStart {
    fn on_serialize_start(&self, parameters: &Parameters) -> Result<(), HookError>;
}

/// Notified when the instance is exited, after all of its members were evaluated.
pub trait OnSerializeEnd {
    fn on_serialize_end(&self, parameters: &Parameters) -> Result<(), HookError>;
}

/// Notified before the reader populates the instance.
pub trait OnDeserializeStart {
    fn on_deserialize_start(&mut self, parameters: &Parameters) -> Result<(), HookError>;
}

/// Notified after the reader populated the instance.
///
/// The usual place to rebuild derived state.
pub trait OnDeserializeEnd {
    fn on_deserialize_end(&mut self, parameters: &Parameters) -> Result<(), HookError>;
}
