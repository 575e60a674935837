//! Java names: packages, type references and identifier validation.

use std::fmt;

use scribe_core::{Error, Result};

/// Java reserved words, including the literals `true`, `false` and `null`.
const JAVA_KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

/// Check if a word is reserved in Java.
pub fn is_java_keyword(s: &str) -> bool {
    JAVA_KEYWORDS.contains(&s)
}

/// Explain why `s` is not a usable Java identifier, or `None` if it is.
pub fn identifier_problem(s: &str) -> Option<&'static str> {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return Some("must not be blank");
    };
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return Some("must start with a letter, '_' or '$'");
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        return Some("may only contain letters, digits, '_' or '$'");
    }
    if is_java_keyword(s) {
        return Some("is a reserved Java keyword");
    }
    None
}

pub(crate) fn validate_identifier(what: &'static str, s: &str) -> Result<()> {
    match identifier_problem(s) {
        Some(reason) => Err(Error::invalid_argument(what, s, reason)),
        None => Ok(()),
    }
}

/// Validate a possibly generic type name (`Foo`, `Foo<T extends Bar>`),
/// returning the bare identifier.
pub(crate) fn validate_type_name<'a>(what: &'static str, s: &'a str) -> Result<&'a str> {
    let s = s.trim();
    let (base, params) = match s.find('<') {
        Some(idx) => (&s[..idx], &s[idx..]),
        None => (s, ""),
    };
    validate_identifier(what, base)?;
    if !params.is_empty() && !params.ends_with('>') {
        return Err(Error::invalid_argument(
            what,
            s,
            "type parameter list is not closed",
        ));
    }
    Ok(base)
}

/// Reject blank text for arguments that are rendered verbatim.
pub(crate) fn require_text(what: &'static str, s: &str) -> Result<()> {
    if s.trim().is_empty() {
        Err(Error::invalid_argument(what, s, "must not be blank"))
    } else {
        Ok(())
    }
}

/// Validate a dotted name such as `com.example.model`.
pub(crate) fn validate_qualified(what: &'static str, s: &str) -> Result<()> {
    require_text(what, s)?;
    for segment in s.split('.') {
        if let Some(reason) = identifier_problem(segment) {
            return Err(Error::invalid_argument(
                what,
                s,
                format!("segment '{segment}' {reason}"),
            ));
        }
    }
    Ok(())
}

/// Whether a dotted name refers to a package: none of its segments starts
/// with an uppercase letter. [`TypeName::parse`] splits on the same rule.
pub fn is_package_name(s: &str) -> bool {
    !s.trim()
        .split('.')
        .any(|segment| segment.starts_with(char::is_uppercase))
}

/// A package name, e.g. `java.util`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory path for sources in this package (`java/util`).
    pub fn to_path(&self) -> String {
        self.0.replace('.', "/")
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_qualified("package name", &self.0)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A reference to a type, split into its package and its (possibly nested)
/// simple name.
///
/// Parsing a qualified string follows the Java naming convention: the
/// first segment starting with an uppercase letter begins the type name.
///
/// ```
/// use scribe_java::TypeName;
///
/// let entry = TypeName::from("java.util.Map.Entry");
/// assert_eq!(entry.package(), "java.util");
/// assert_eq!(entry.simple_name(), "Map.Entry");
/// assert_eq!(entry.qualified(), "java.util.Map.Entry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeName {
    package: String,
    simple: String,
}

impl TypeName {
    /// Create a type reference from a package and a simple name.
    pub fn new(package: impl Into<String>, simple: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple: simple.into(),
        }
    }

    /// Parse a qualified name such as `java.util.Map.Entry`.
    pub fn parse(qualified: &str) -> Self {
        let segments: Vec<&str> = qualified.trim().split('.').collect();
        let split = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_uppercase()))
            .unwrap_or(segments.len().saturating_sub(1));
        Self {
            package: segments[..split].join("."),
            simple: segments[split..].join("."),
        }
    }

    /// The package, empty for unqualified names.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The simple name, including enclosing types for nested types.
    pub fn simple_name(&self) -> &str {
        &self.simple
    }

    /// The outermost enclosing type's simple name.
    pub fn top_level_name(&self) -> &str {
        self.simple.split('.').next().unwrap_or(&self.simple)
    }

    /// The fully qualified name.
    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.simple.clone()
        } else {
            format!("{}.{}", self.package, self.simple)
        }
    }

    /// Qualified name of the outermost enclosing type.
    pub fn top_level_qualified(&self) -> String {
        if self.package.is_empty() {
            self.top_level_name().to_string()
        } else {
            format!("{}.{}", self.package, self.top_level_name())
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_qualified("type name", &self.qualified())
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

impl From<&str> for TypeName {
    fn from(qualified: &str) -> Self {
        Self::parse(qualified)
    }
}

impl From<String> for TypeName {
    fn from(qualified: String) -> Self {
        Self::parse(&qualified)
    }
}

impl From<&TypeName> for TypeName {
    fn from(ty: &TypeName) -> Self {
        ty.clone()
    }
}
