//! Annotation specifications and literal rendering helpers.

use indexmap::IndexMap;

use crate::names::TypeName;

/// An annotation to attach to the next declaration.
///
/// Member values are pre-rendered Java literals; use the helpers in this
/// module ([`string_literal`], [`class_literal`], [`enum_constant`],
/// [`array`]) or pass source text directly. Members render in insertion
/// order, and setting the same key twice keeps the first position with
/// the latest value.
///
/// ```
/// use scribe_java::{Annotation, string_literal};
///
/// let ann = Annotation::new("javax.persistence.Table")
///     .member("name", string_literal("users"))
///     .member("schema", string_literal("app"));
/// assert_eq!(ann.render("Table"), r#"@Table(name="users", schema="app")"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    ty: TypeName,
    members: IndexMap<String, String>,
}

impl Annotation {
    /// Create a marker annotation (no members).
    pub fn new(ty: impl Into<TypeName>) -> Self {
        Self {
            ty: ty.into(),
            members: IndexMap::new(),
        }
    }

    /// Add a member with a pre-rendered value.
    pub fn member(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.members.insert(key.into(), value.into());
        self
    }

    /// Set the `value` member, rendered without its key.
    pub fn value(self, value: impl Into<String>) -> Self {
        self.member("value", value)
    }

    /// Add members from an already extracted ordered list.
    pub fn members<K, V>(mut self, members: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.members
            .extend(members.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn type_name(&self) -> &TypeName {
        &self.ty
    }

    /// Iterate over members in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_marker(&self) -> bool {
        self.members.is_empty()
    }

    /// Render using `name` as the written form of the annotation type.
    pub fn render(&self, name: &str) -> String {
        if self.members.is_empty() {
            return format!("@{name}");
        }
        if let (1, Some(value)) = (self.members.len(), self.members.get("value")) {
            return format!("@{name}({value})");
        }
        let members: Vec<String> = self
            .members
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        format!("@{name}({})", members.join(", "))
    }
}

/// Quote and escape a Java string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A class literal, e.g. `String.class`.
pub fn class_literal(ty: &str) -> String {
    format!("{ty}.class")
}

/// An enum constant reference, e.g. `RetentionPolicy.RUNTIME`.
pub fn enum_constant(ty: &str, constant: &str) -> String {
    format!("{ty}.{constant}")
}

/// An array initializer of pre-rendered values. A single element is
/// rendered bare, as Java allows for annotation members.
pub fn array<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let values: Vec<String> = values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect();
    match values.as_slice() {
        [single] => single.clone(),
        _ => format!("{{{}}}", values.join(", ")),
    }
}
