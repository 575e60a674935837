//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{
    Manifest,
    validate::{ParseContext, validate_manifest},
};
use crate::{Error, Result};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "scribe.toml")
    }
}

impl Manifest {
    /// Parse a scribe.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a scribe.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse and validate a manifest.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = ParseContext::new(content, filename);
    let manifest: Manifest =
        toml::from_str(content).map_err(|e| ctx.source_context().parse_error(e))?;
    validate_manifest(&manifest, &ctx)?;
    Ok(manifest)
}
