//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `formgen.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use formgen::RenderConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "formgen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Settings handed to the renderer.
    pub render: RenderConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for rendered trees.
    pub dir: PathBuf,

    /// Output filename.
    pub file: String,

    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            file: "form.json".to_string(),
            pretty: true,
        }
    }
}

impl OutputConfig {
    /// Full path of the output file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// Without a path, `formgen.toml` in the working directory is used when
    /// it exists and defaults otherwise. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::not_found(path.to_path_buf()).into());
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILENAME),
        };

        if !config_path.exists() {
            tracing::debug!("No configuration file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path.clone(), e.to_string()))?;

        tracing::debug!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(ref file) = args.output_file {
            config.output.file = file.clone();
        }

        if let Some(pretty) = args.pretty {
            config.output.pretty = pretty;
        }

        if let Some(cascade) = args.cascade_disabled {
            config.render.cascade_disabled = cascade;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# formgen configuration file

[output]
# Output directory for rendered node trees
dir = "./generated"

# Output file name
file = "form.json"

# Pretty-print the JSON output
pretty = true

[render]
# Where generated labels go: "labels", "placeholders" or "none"
auto = "labels"

# Copy a structure's or list's disabled flag onto every field inside it
cascade_disabled = false

# Nesting limit for recursive schemas
max_depth = 32

# Placeholder entry prepended to single selects
[render.null_option]
value = ""
text = "-"

[render.i18n]
optional = " (optional)"
required = ""
add = "Add"
remove = "Remove"
up = "Up"
down = "Down"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Output filename override.
    pub output_file: Option<String>,

    /// Pretty-print override.
    pub pretty: Option<bool>,

    /// Disabled cascading override.
    pub cascade_disabled: Option<bool>,
}
