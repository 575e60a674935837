//! Core building blocks for the Scribe source writer.
//!
//! This crate knows nothing about any particular target language. It
//! provides the pieces every declaration writer is assembled from:
//!
//! - [`Sink`] - append-only text destinations (`String`, [`IoSink`])
//! - [`Indent`] - indentation unit configuration
//! - [`ScopeStack`] - the stack of open lexical scopes
//! - [`CodeWriter`] - line-oriented writer keeping indentation in step with scopes
//! - [`File`] - generated files and the rules for writing them to disk

mod error;
mod file;
mod indent;
mod scope;
mod sink;
mod writer;

pub use error::{Error, Result};
pub use file::{File, Overwrite, WriteResult};
pub use indent::Indent;
pub use scope::{ScopeFrame, ScopeKind, ScopeStack};
pub use sink::{IoSink, Sink};
pub use writer::CodeWriter;
