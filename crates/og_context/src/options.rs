use alloc::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Format and behavior settings of one operation.
///
/// The context owns its options and lets format collaborators read or replace
/// them mid-walk (see [`SerializationContext::options_mut`]). Every field has
/// a default, so partial configurations deserialize from any serde format.
///
/// # Examples
///
/// ```
/// use og_context::SerializerOptions;
///
/// let options: SerializerOptions = serde_json::from_str(r#"{ "culture": "de-DE" }"#).unwrap();
///
/// assert_eq!(options.culture, "de-DE");
/// assert_eq!(options.indent_width, 2);
/// assert_eq!(options.max_depth, None);
/// ```
///
/// [`SerializationContext::options_mut`]: crate::SerializationContext::options_mut
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerOptions {
    /// Culture used to format numbers and dates, `"invariant"` by default.
    pub culture: Cow<'static, str>,
    /// Whether the writer indents nested nodes.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent_width: u8,
    /// Deepest object nesting a serialization may open, unlimited if `None`.
    pub max_depth: Option<usize>,
}

impl SerializerOptions {
    pub const INVARIANT_CULTURE: &'static str = "invariant";

    /// The default options, usable in `const` contexts.
    pub const fn new() -> Self {
        Self {
            culture: Cow::Borrowed(Self::INVARIANT_CULTURE),
            pretty: false,
            indent_width: 2,
            max_depth: None,
        }
    }

    pub fn with_culture(mut self, culture: impl Into<Cow<'static, str>>) -> Self {
        self.culture = culture.into();
        self
    }

    #[inline]
    pub const fn with_pretty(mut self, indent_width: u8) -> Self {
        self.pretty = true;
        self.indent_width = indent_width;
        self
    }

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[inline]
    pub fn is_invariant_culture(&self) -> bool {
        self.culture == Self::INVARIANT_CULTURE
    }
}

impl Default for SerializerOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::SerializerOptions;

    #[test]
    fn defaults() {
        let options = SerializerOptions::default();

        assert!(options.is_invariant_culture());
        assert!(!options.pretty);
        assert_eq!(options.indent_width, 2);
        assert_eq!(options.max_depth, None);
    }

    #[test]
    fn builders() {
        let options = SerializerOptions::new()
            .with_culture("fr-FR")
            .with_pretty(4)
            .with_max_depth(16);

        assert_eq!(options.culture, "fr-FR");
        assert!(options.pretty);
        assert_eq!(options.indent_width, 4);
        assert_eq!(options.max_depth, Some(16));
        assert!(!options.is_invariant_culture());
    }

    #[test]
    fn from_ron() {
        let options: SerializerOptions =
            ron::from_str("(pretty: true, indent_width: 4, max_depth: Some(8))").unwrap();

        assert!(options.pretty);
        assert_eq!(options.indent_width, 4);
        assert_eq!(options.max_depth, Some(8));
        assert!(options.is_invariant_culture());
    }

    #[test]
    fn json_round_trip() {
        let options = SerializerOptions::new().with_culture("ja-JP").with_max_depth(3);

        let text = serde_json::to_string(&options).unwrap();
        let back: SerializerOptions = serde_json::from_str(&text).unwrap();

        assert_eq!(back, options);
    }
}
