//! Lower `scribe.toml` manifests into Java compilation units.

mod generator;

pub use generator::{GenerateResult, Generator};
pub use scribe_core::{File, Overwrite};
