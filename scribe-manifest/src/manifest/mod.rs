//! Manifest types and parsing for scribe.toml files.

mod parse;
mod validate;

use indexmap::IndexMap;
use scribe_core::Indent;
use scribe_java::{FieldModifiers, TypeKind, Visibility};
use serde::Deserialize;
pub use parse::parse_manifest;
pub use validate::ParseContext;

/// Root manifest for scribe.toml
///
/// ```toml
/// package = "com.example.model"
/// imports = ["java.util.List"]
///
/// [types.Person]
/// doc = "A person."
///
/// [[types.Person.fields]]
/// name = "name"
/// type = "String"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Package every generated type belongs to
    pub package: String,

    /// Plain imports (`pkg.Type` or `pkg.*`)
    #[serde(default)]
    pub imports: Vec<String>,

    /// Types whose static members are imported
    #[serde(default)]
    pub static_imports: Vec<String>,

    /// Output formatting
    #[serde(default)]
    pub style: Style,

    /// Declared types, in file order
    #[serde(default)]
    pub types: IndexMap<String, TypeDecl>,
}

impl Manifest {
    /// Iterate over declared types in file order.
    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeDecl)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Formatting options for generated files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Style {
    /// Indentation width in spaces, or `"tab"`
    #[serde(default)]
    pub indent: Indent,
}

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Class,
    Interface,
}

impl From<Kind> for TypeKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Class => TypeKind::Class,
            Kind::Interface => TypeKind::Interface,
        }
    }
}

/// Access level as written in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Protected,
    Package,
    Private,
}

impl From<Access> for Visibility {
    fn from(access: Access) -> Self {
        match access {
            Access::Public => Visibility::Public,
            Access::Protected => Visibility::Protected,
            Access::Package => Visibility::Package,
            Access::Private => Visibility::Private,
        }
    }
}

fn access_private() -> Access {
    Access::Private
}

fn access_public() -> Access {
    Access::Public
}

fn void() -> String {
    "void".to_string()
}

/// A class or interface declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    #[serde(default)]
    pub kind: Kind,

    /// Superclass (classes only)
    pub extends: Option<String>,

    /// Implemented interfaces, or super-interfaces for an interface
    #[serde(default)]
    pub implements: Vec<String>,

    /// Javadoc text; newlines separate lines
    pub doc: Option<String>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDecl>,

    #[serde(default)]
    pub fields: Vec<FieldDecl>,

    #[serde(default)]
    pub constructors: Vec<ConstructorDecl>,

    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// A field declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default = "access_private")]
    pub visibility: Access,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    #[serde(default, rename = "final")]
    pub is_final: bool,

    /// Initializer expression, written verbatim
    pub init: Option<String>,

    pub doc: Option<String>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDecl>,
}

impl FieldDecl {
    pub fn modifiers(&self) -> FieldModifiers {
        FieldModifiers {
            visibility: self.visibility.into(),
            is_static: self.is_static,
            is_final: self.is_final,
        }
    }
}

/// A constructor of the enclosing class.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructorDecl {
    /// Parameters such as `"String name"`
    #[serde(default)]
    pub params: Vec<String>,

    /// Body statements, written verbatim
    #[serde(default)]
    pub body: Vec<String>,

    pub doc: Option<String>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDecl>,
}

/// A method declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDecl {
    pub name: String,

    #[serde(default = "void")]
    pub returns: String,

    #[serde(default = "access_public")]
    pub visibility: Access,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    #[serde(default)]
    pub params: Vec<String>,

    #[serde(default)]
    pub body: Vec<String>,

    pub doc: Option<String>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDecl>,
}

/// An annotation: either a bare qualified type name or a table with
/// pre-rendered member values.
///
/// ```toml
/// annotations = [
///     "javax.persistence.Entity",
///     { type = "javax.persistence.Table", members = { name = '"people"' } },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AnnotationDecl {
    Marker(String),
    Full {
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        members: IndexMap<String, String>,
    },
}

impl AnnotationDecl {
    /// The annotation's qualified type name.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Marker(ty) | Self::Full { ty, .. } => ty,
        }
    }
}
