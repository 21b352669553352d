//! # formgen-cli
//!
//! CLI library for rendering form documents into node trees.
//!
//! A form document holds a schema, its field options, the current value and
//! validation errors. The CLI renders it with the semantic templates and
//! writes the resulting tree as JSON, for snapshotting or for handing to a
//! presentation layer outside Rust.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`document`] - Loading JSON and TOML form documents
//! - [`render`] - Rendering documents with deterministic identifiers
//! - [`writer`] - File output and dry-run support
//! - [`error`] - Error types and handling

pub mod config;
pub mod document;
pub mod error;
pub mod render;
pub mod writer;

pub use config::{Config, ConfigManager};
pub use document::{DocumentFormat, FormDocument};
pub use error::{CliError, CliResult};
pub use render::{DocumentRenderer, RenderOutput};
pub use writer::{FileWriter, WriteResult};
