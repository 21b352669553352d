//! Rendering form documents into serialized node trees.

use std::sync::Arc;

use formgen::events::OnChange;
use formgen::ids::SequentialIds;
use formgen::{Form, Node, RenderConfig};

use crate::document::FormDocument;
use crate::error::CliResult;

/// A rendered document.
#[derive(Debug)]
pub struct RenderOutput {
    pub tree: Node,
    /// The tree as JSON. Event handlers appear as the names of their events.
    pub content: String,
}

/// Renders documents with the Semantic templates.
///
/// Identifiers are numbered per document, so rendering the same document
/// twice produces identical output.
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    config: RenderConfig,
    pretty: bool,
}

impl DocumentRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn render(&self, document: &FormDocument) -> CliResult<RenderOutput> {
        let form = Form::new(document.schema.clone())
            .with_options(document.options.clone())
            .with_config(self.config.clone())
            .with_ids(Arc::new(SequentialIds::default()));

        let mut state = document.state();
        // Nothing listens: the output is a static snapshot.
        let tree = form.render(&mut state, OnChange::default())?;

        let content = if self.pretty {
            serde_json::to_string_pretty(&tree)?
        } else {
            serde_json::to_string(&tree)?
        };
        Ok(RenderOutput { tree, content })
    }
}
