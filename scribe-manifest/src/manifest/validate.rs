//! Validation context and utilities for manifest parsing.

use std::{collections::HashSet, sync::Arc};

use miette::SourceSpan;
use scribe_java::{identifier_problem, is_java_keyword, is_package_name};

use super::{AnnotationDecl, Kind, Manifest, TypeDecl};
use crate::{Result, error::SourceContext};

/// Source information plus the current path through the manifest.
///
/// ```ignore
/// let ctx = ParseContext::new(src, "scribe.toml");
/// ctx.validate_name("Person", "type")?;
///
/// let nested = ctx.push("Person");
/// nested.validate_name("age", "field")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe what is being validated, e.g. "field in 'Person'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Check that `name` is a usable Java identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_java_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = identifier_problem(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Check a dotted name such as `com.example.model` segment by segment.
    pub fn validate_qualified(&self, name: &str, kind: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(self.error(format!("{} must not be blank", self.context_for(kind)), None));
        }
        for segment in name.split('.') {
            if let Some(reason) = identifier_problem(segment) {
                return Err(self.source.invalid_identifier_error(
                    name,
                    self.context_for(kind),
                    format!("has a segment '{segment}' that {reason}"),
                    find_value_span(self.src(), name),
                ));
            }
        }
        Ok(())
    }

    /// Check that verbatim text such as a type or a parameter is not blank.
    pub fn require_text(&self, text: &str, kind: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(self.error(format!("{} must not be blank", self.context_for(kind)), None));
        }
        Ok(())
    }

    pub fn error(&self, message: impl Into<String>, span: Option<SourceSpan>) -> Box<crate::Error> {
        self.source.validation_error(message, span)
    }
}

/// Validate the whole manifest after deserialization.
pub(crate) fn validate_manifest(manifest: &Manifest, ctx: &ParseContext<'_>) -> Result<()> {
    ctx.validate_qualified(&manifest.package, "package")?;

    for import in &manifest.imports {
        let target = import.strip_suffix(".*").unwrap_or(import);
        ctx.validate_qualified(target, "import")?;
    }
    for import in &manifest.static_imports {
        ctx.validate_qualified(import, "static import")?;
        if is_package_name(import) {
            return Err(ctx.error(
                format!("static import '{import}' names a package, list a type such as 'java.util.Collections'"),
                find_value_span(ctx.src(), import),
            ));
        }
    }

    if manifest.types.is_empty() {
        return Err(ctx.error("the manifest declares no types", None));
    }

    for (name, decl) in &manifest.types {
        ctx.validate_name(name, "type")?;
        validate_type(decl, &ctx.push(name))?;
    }
    Ok(())
}

fn validate_type(decl: &TypeDecl, ctx: &ParseContext<'_>) -> Result<()> {
    if decl.kind == Kind::Interface {
        if let Some(superclass) = &decl.extends {
            return Err(ctx.error(
                format!(
                    "interface '{}' cannot extend class '{superclass}', list super-interfaces under `implements`",
                    ctx.path_string()
                ),
                find_value_span(ctx.src(), superclass),
            ));
        }
        if !decl.constructors.is_empty() {
            return Err(ctx.error(
                format!("interface '{}' cannot declare constructors", ctx.path_string()),
                None,
            ));
        }
    }

    if let Some(superclass) = &decl.extends {
        ctx.require_text(superclass, "superclass")?;
    }
    for interface in &decl.implements {
        ctx.require_text(interface, "interface")?;
    }
    validate_annotations(&decl.annotations, ctx)?;

    let mut seen = HashSet::new();
    for field in &decl.fields {
        ctx.validate_name(&field.name, "field")?;
        ctx.require_text(&field.ty, "field type")?;
        if !seen.insert(field.name.as_str()) {
            return Err(ctx.error(
                format!("field '{}' is declared twice in '{}'", field.name, ctx.path_string()),
                find_name_span(ctx.src(), &field.name),
            ));
        }
        validate_annotations(&field.annotations, ctx)?;
    }

    for constructor in &decl.constructors {
        for param in &constructor.params {
            ctx.require_text(param, "constructor parameter")?;
        }
        validate_annotations(&constructor.annotations, ctx)?;
    }

    for method in &decl.methods {
        ctx.validate_name(&method.name, "method")?;
        if decl.kind == Kind::Interface && !method.is_static {
            return Err(ctx.error(
                format!(
                    "method '{}' in interface '{}' must be static to carry a body",
                    method.name,
                    ctx.path_string()
                ),
                find_name_span(ctx.src(), &method.name),
            ));
        }
        ctx.require_text(&method.returns, "return type")?;
        for param in &method.params {
            ctx.require_text(param, "method parameter")?;
        }
        validate_annotations(&method.annotations, ctx)?;
    }

    Ok(())
}

fn validate_annotations(annotations: &[AnnotationDecl], ctx: &ParseContext<'_>) -> Result<()> {
    for annotation in annotations {
        ctx.validate_qualified(annotation.type_name(), "annotation")?;
        if let AnnotationDecl::Full { members, .. } = annotation {
            for (key, value) in members {
                ctx.validate_name(key, "annotation member")?;
                ctx.require_text(value, "annotation member value")?;
            }
        }
    }
    Ok(())
}

/// Find the span of a name in the TOML source.
///
/// Looks for `.name]`, `.name.`, inline keys and `name = "value"`.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let headers = [format!(".{}]", name), format!(".{}.", name)];
    for pattern in &headers {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    let inline = [
        (format!("{{ {} ", name), 2usize),
        (format!("{{ {}=", name), 2usize),
        (format!("{{{}=", name), 1usize),
        (format!(", {} ", name), 2usize),
        (format!(", {}=", name), 2usize),
        (format!(",{}=", name), 1usize),
    ];
    for (pattern, skip) in &inline {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + skip, name.len())));
        }
    }

    for quote in ['"', '\''] {
        let pattern = format!("name = {quote}{name}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 8, name.len())));
        }
    }

    None
}

/// Find the span of a quoted string value.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, value.len())));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_name_span_table_header() {
        let src = "[types.Person]\ndoc = \"x\"";
        let span = find_name_span(src, "Person").unwrap();
        assert_eq!(span.offset(), 7);
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_find_name_span_nested_header() {
        let src = "[[types.Person.fields]]\nname = \"age\"";
        let span = find_name_span(src, "Person").unwrap();
        assert_eq!(span.offset(), 8);
    }

    #[test]
    fn test_find_name_span_array_entry() {
        let src = "[[types.Person.fields]]\nname = \"class\"\ntype = \"int\"";
        let span = find_name_span(src, "class").unwrap();
        assert_eq!(span.offset(), 32);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_find_name_span_inline_table() {
        let src = "members = { value = '\"x\"' }";
        let span = find_name_span(src, "value").unwrap();
        assert_eq!(span.offset(), 12);
    }

    #[test]
    fn test_find_name_span_not_in_string() {
        let src = "doc = \"A Person record\"";
        assert!(find_name_span(src, "Person").is_none());
    }

    #[test]
    fn test_find_value_span() {
        let src = "package = \"com.example\"";
        let span = find_value_span(src, "com.example").unwrap();
        assert_eq!(span.offset(), 11);
        assert_eq!(span.len(), 11);
    }

    #[test]
    fn test_context_for() {
        let ctx = ParseContext::new("", "scribe.toml");
        assert_eq!(ctx.context_for("type"), "type");
        assert_eq!(ctx.push("Person").context_for("field"), "field in 'Person'");
    }

    #[test]
    fn test_validate_name() {
        let ctx = ParseContext::new("", "scribe.toml");
        assert!(ctx.validate_name("firstName", "field").is_ok());
        assert!(ctx.validate_name("$id", "field").is_ok());

        let err = ctx.validate_name("class", "field").unwrap_err();
        assert!(matches!(*err, crate::Error::ReservedKeyword { .. }));

        let err = ctx.validate_name("1st", "field").unwrap_err();
        assert!(matches!(*err, crate::Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_validate_qualified() {
        let ctx = ParseContext::new("", "scribe.toml");
        assert!(ctx.validate_qualified("com.example.model", "package").is_ok());
        assert!(ctx.validate_qualified("com..model", "package").is_err());
        assert!(ctx.validate_qualified("com.int", "package").is_err());
        assert!(ctx.validate_qualified("  ", "package").is_err());
    }
}
