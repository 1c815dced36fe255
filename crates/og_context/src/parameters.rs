use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use og_utils::TypeIdMap;

/// Caller supplied values handed unchanged to every hook and predicate.
///
/// The bag holds at most one value per type. It is filled before the
/// operation starts; the context only ever lends it out immutably.
///
/// # Examples
///
/// ```
/// use og_context::Parameters;
///
/// #[derive(Debug, PartialEq)]
/// struct Tenant(&'static str);
///
/// let parameters = Parameters::new().with(Tenant("acme")).with(42_u32);
///
/// assert_eq!(parameters.get::<Tenant>(), Some(&Tenant("acme")));
/// assert_eq!(parameters.get::<u32>(), Some(&42));
/// assert!(parameters.get::<u64>().is_none());
/// ```
#[derive(Default)]
pub struct Parameters {
    values: TypeIdMap<Box<dyn Any + Send + Sync>>,
}

impl Parameters {
    #[inline]
    pub const fn new() -> Self {
        Self {
            values: TypeIdMap::new(),
        }
    }

    /// Adds `value`, replacing any previous value of the same type.
    #[inline]
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    /// Adds `value` and returns the previous value of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> Option<T> {
        let old = self.values.insert_type::<T>(Box::new(value))?;
        old.downcast::<T>().ok().map(|old| *old)
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        let value: &(dyn Any + Send + Sync) = &**self.values.get_type::<T>()?;
        value.downcast_ref::<T>()
    }

    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.values.contains_type::<T>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameters")
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::Parameters;

    #[test]
    fn one_value_per_type() {
        let mut parameters = Parameters::new();

        assert!(parameters.is_empty());
        assert_eq!(parameters.insert(String::from("first")), None);
        assert_eq!(
            parameters.insert(String::from("second")),
            Some(String::from("first"))
        );

        assert_eq!(parameters.len(), 1);
        assert!(parameters.contains::<String>());
        assert_eq!(parameters.get::<String>().unwrap(), "second");
    }

    #[test]
    fn distinct_types() {
        let parameters = Parameters::new().with(1_u8).with(2_u16);

        assert_eq!(parameters.get::<u8>(), Some(&1));
        assert_eq!(parameters.get::<u16>(), Some(&2));
        assert!(!parameters.contains::<u32>());
    }
}
