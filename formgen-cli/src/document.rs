//! Form documents: everything needed to render one form.
//!
//! A document bundles the schema with its options, the current value and
//! the validation errors. It is read from JSON or TOML, chosen by file
//! extension:
//!
//! ```json
//! {
//!   "schema": { "root": { "kind": "structure", "fields": {
//!     "name": { "kind": "primitive", "type": "string" }
//!   } } },
//!   "options": { "fields": { "name": { "help": "Your full name" } } },
//!   "value": { "name": "Ada" },
//!   "errors": { "name": "Too short" }
//! }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use formgen::{FieldOptions, FormState, Schema};

use crate::error::{CliResult, DocumentError};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(DocumentError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// A schema with its options, value and validation errors.
#[derive(Debug, Clone, Deserialize)]
pub struct FormDocument {
    pub schema: Schema,

    #[serde(default)]
    pub options: FieldOptions,

    #[serde(default)]
    pub value: Value,

    #[serde(default)]
    pub errors: IndexMap<String, String>,
}

impl FormDocument {
    /// Load a document from disk.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(DocumentError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let format = DocumentFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let document = Self::parse(&content, format)
            .map_err(|message| DocumentError::invalid(path.to_path_buf(), message))?;
        tracing::debug!(
            path = %path.display(),
            definitions = document.schema.definitions.len(),
            errors = document.errors.len(),
            "Loaded form document"
        );
        Ok(document)
    }

    /// Parse document text in the given format.
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self, String> {
        match format {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// The form state described by the document.
    pub fn state(&self) -> FormState {
        FormState::new(self.value.clone()).with_errors(self.errors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgen::{Factory, SchemaNode};
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/form.JSON")).unwrap(),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("form.toml")).unwrap(),
            DocumentFormat::Toml
        );
        assert!(matches!(
            DocumentFormat::from_path(&PathBuf::from("form")),
            Err(DocumentError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_parse_json_document() {
        let document = FormDocument::parse(
            r#"{
                "schema": { "root": { "kind": "list", "element": { "kind": "primitive", "type": "string" } } },
                "value": ["a"]
            }"#,
            DocumentFormat::Json,
        )
        .unwrap();
        assert_eq!(
            document.schema.root,
            SchemaNode::list(SchemaNode::string())
        );
        assert!(document.errors.is_empty());
        assert_eq!(document.state().value, serde_json::json!(["a"]));
    }

    #[test]
    fn test_parse_toml_document() {
        let document = FormDocument::parse(
            r#"
[schema.root]
kind = "structure"

[schema.root.fields.agree]
kind = "primitive"
type = "boolean"

[options.fields.agree]
factory = "checkbox"
label = "I agree"

[value]
agree = true

[errors]
agree = "Must be accepted"
"#,
            DocumentFormat::Toml,
        )
        .unwrap();
        assert_eq!(
            document.options.fields["agree"].factory,
            Some(Factory::Checkbox)
        );
        let state = document.state();
        assert_eq!(state.value, serde_json::json!({ "agree": true }));
        assert_eq!(state.errors["agree"], "Must be accepted");
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(FormDocument::parse("{", DocumentFormat::Json).is_err());
    }
}
