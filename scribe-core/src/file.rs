use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// A generated source file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: String,
    overwrite: Overwrite,
}

/// How to handle files that already exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    #[default]
    Always,
    /// Only create if the file doesn't exist (hand-edited stubs)
    IfMissing,
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

impl File {
    /// Create a file that is always overwritten.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: Overwrite::Always,
        }
    }

    /// Set the overwrite rule.
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Path relative to the output directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file below `base`, creating parent directories as needed.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let target = base.join(&self.path);

        if self.overwrite == Overwrite::IfMissing && target.exists() {
            return Ok(WriteResult::Skipped);
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
        }
        std::fs::write(&target, &self.content)
            .wrap_err_with(|| format!("failed to write '{}'", target.display()))?;
        Ok(WriteResult::Written)
    }
}
