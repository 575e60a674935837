//! Java source generation on top of `scribe-core`.
//!
//! [`JavaWriter`] assembles a compilation unit through small sequential
//! calls (package, imports, types, fields, methods, constructors) and
//! streams well-indented text into any [`scribe_core::Sink`].
//!
//! # Module Organization
//!
//! - [`JavaWriter`] - the declaration writer
//! - [`ImportRegistry`], [`Import`] - import bookkeeping
//! - [`Annotation`] and literal helpers - annotation rendering
//! - [`Javadoc`] - documentation comments
//! - [`TypeName`], [`PackageName`] - name handling and validation
//! - [`Visibility`], [`FieldModifiers`], [`TypeKind`] - modifiers

mod annotation;
mod imports;
mod javadoc;
mod modifiers;
mod names;
mod writer;

pub use annotation::{Annotation, array, class_literal, enum_constant, string_literal};
pub use imports::{Import, ImportRegistry};
pub use javadoc::Javadoc;
pub use modifiers::{FieldModifiers, TypeKind, Visibility};
pub use names::{PackageName, TypeName, identifier_problem, is_java_keyword, is_package_name};
pub use writer::JavaWriter;
