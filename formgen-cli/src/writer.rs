//! Writing rendered trees and configuration files to disk.

use crate::error::{CliResult, WriteError};
use std::path::{Path, PathBuf};

/// Outcome of a write.
#[derive(Debug)]
pub enum WriteResult {
    /// The file was written.
    Written { path: PathBuf, bytes: usize },
    /// The file already held this content and was left alone.
    Unchanged { path: PathBuf },
    /// The file exists and overwriting was not allowed.
    Exists { path: PathBuf },
    /// Nothing was written; `content` is what would have been.
    DryRun { content: String, path: PathBuf },
}

/// File writer with dry-run and overwrite control.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
    overwrite: bool,
}

impl FileWriter {
    /// A writer that replaces existing files.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            overwrite: true,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Write `content` to `path`, creating parent directories.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            });
        }

        if path.exists() {
            if !self.overwrite {
                return Ok(WriteResult::Exists {
                    path: path.to_path_buf(),
                });
            }
            if std::fs::read_to_string(path).is_ok_and(|existing| existing == content) {
                tracing::debug!(path = %path.display(), "Output unchanged");
                return Ok(WriteResult::Unchanged {
                    path: path.to_path_buf(),
                });
            }
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");

        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. }
            | WriteResult::Unchanged { path }
            | WriteResult::Exists { path }
            | WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Whether the file on disk now holds the content.
    pub fn is_current(&self) -> bool {
        matches!(
            self,
            WriteResult::Written { .. } | WriteResult::Unchanged { .. }
        )
    }

    /// Bytes written (0 unless the file was written).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TREE: &str = r#"{"tag":"div","children":[]}"#;

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/form.json");

        let result = FileWriter::new(false).write(&path, TREE).unwrap();

        assert!(matches!(result, WriteResult::Written { bytes, .. } if bytes == TREE.len()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), TREE);
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("form.json");

        let writer = FileWriter::new(true);
        assert!(writer.is_dry_run());
        let result = writer.write(&path, TREE).unwrap();

        assert!(!path.exists());
        assert!(!result.is_current());
        assert_eq!(result.bytes(), 0);
        match result {
            WriteResult::DryRun { content, .. } => assert_eq!(content, TREE),
            other => panic!("expected dry run, got {other:?}"),
        }
    }

    #[test]
    fn test_identical_content_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, TREE).unwrap();

        let result = FileWriter::new(false).write(&path, TREE).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
        assert!(result.is_current());
        assert_eq!(result.path(), path.as_path());
    }

    #[test]
    fn test_existing_file_kept_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("formgen.toml");
        std::fs::write(&path, "# mine").unwrap();

        let result = FileWriter::new(false)
            .with_overwrite(false)
            .write(&path, "# theirs")
            .unwrap();
        assert!(matches!(result, WriteResult::Exists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        let result = FileWriter::new(false).write(&path, "# theirs").unwrap();
        assert!(result.is_current());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# theirs");
    }
}
