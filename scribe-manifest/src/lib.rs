//! `scribe.toml` manifests describing Java types to generate.
//!
//! Parsing and validation report [`miette`] diagnostics that point into the
//! manifest source.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::*;
