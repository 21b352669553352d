//! Render configuration.
//!
//! Every section deserializes with defaults, so a partial TOML or JSON
//! document only needs to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::options::SelectOption;

/// Default nesting limit for recursive schemas.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Settings shared by every field of a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// User-facing strings.
    pub i18n: I18n,

    /// Where automatically generated labels go.
    pub auto: AutoLabel,

    /// Push a composite's disabled flag down into every field it contains.
    pub cascade_disabled: bool,

    /// Placeholder entry prepended to single selects. `None` disables it.
    pub null_option: Option<SelectOption>,

    /// Maximum nesting of structures and lists before rendering fails.
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            auto: AutoLabel::default(),
            cascade_disabled: false,
            null_option: Some(SelectOption::new("", "-")),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderConfig {
    pub fn with_i18n(mut self, i18n: I18n) -> Self {
        self.i18n = i18n;
        self
    }

    pub fn with_auto(mut self, auto: AutoLabel) -> Self {
        self.auto = auto;
        self
    }

    pub fn with_cascade_disabled(mut self, cascade: bool) -> Self {
        self.cascade_disabled = cascade;
        self
    }

    pub fn with_null_option(mut self, option: Option<SelectOption>) -> Self {
        self.null_option = option;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// User-facing strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18n {
    /// Suffix of automatic labels on optional fields.
    pub optional: String,
    /// Suffix of automatic labels on required fields.
    pub required: String,
    pub add: String,
    pub remove: String,
    pub up: String,
    pub down: String,
}

impl Default for I18n {
    fn default() -> Self {
        Self {
            optional: " (optional)".to_string(),
            required: String::new(),
            add: "Add".to_string(),
            remove: "Remove".to_string(),
            up: "Up".to_string(),
            down: "Down".to_string(),
        }
    }
}

/// Automatic label placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoLabel {
    /// Generate a label for fields without one.
    #[default]
    Labels,
    /// Put the generated text in the textbox placeholder instead.
    Placeholders,
    /// Generate nothing.
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.i18n.optional, " (optional)");
        assert_eq!(config.i18n.required, "");
        assert_eq!(config.auto, AutoLabel::Labels);
        assert!(!config.cascade_disabled);
        assert_eq!(config.null_option, Some(SelectOption::new("", "-")));
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: RenderConfig = serde_json::from_str(
            r#"{ "auto": "placeholders", "i18n": { "add": "New" } }"#,
        )
        .unwrap();
        assert_eq!(config.auto, AutoLabel::Placeholders);
        assert_eq!(config.i18n.add, "New");
        assert_eq!(config.i18n.remove, "Remove");
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_null_option_can_be_disabled() {
        let config: RenderConfig = serde_json::from_str(r#"{ "null_option": null }"#).unwrap();
        assert_eq!(config.null_option, None);
    }
}
