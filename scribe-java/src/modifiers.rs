//! Access levels and declaration modifiers.

use scribe_core::ScopeKind;

/// Java access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    /// Package-private (no modifier keyword).
    Package,
    Private,
}

impl Visibility {
    /// The modifier keyword, `None` for package-private.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::Package => None,
            Self::Private => Some("private"),
        }
    }
}

/// The kind of type declaration a writer can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
        }
    }

    pub(crate) fn scope_kind(&self) -> ScopeKind {
        match self {
            Self::Class => ScopeKind::Class,
            Self::Interface => ScopeKind::Interface,
        }
    }
}

/// Modifier combination for a field declaration.
///
/// ```
/// use scribe_java::FieldModifiers;
///
/// assert_eq!(FieldModifiers::PRIVATE.with_static().with_final().render(), "private static final");
/// assert_eq!(FieldModifiers::PACKAGE.render(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldModifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
}

impl FieldModifiers {
    pub const PUBLIC: Self = Self::new(Visibility::Public);
    pub const PROTECTED: Self = Self::new(Visibility::Protected);
    pub const PACKAGE: Self = Self::new(Visibility::Package);
    pub const PRIVATE: Self = Self::new(Visibility::Private);

    pub const fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            is_static: false,
            is_final: false,
        }
    }

    pub const fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub const fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Render as space separated keywords in canonical order.
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(keyword) = self.visibility.keyword() {
            parts.push(keyword);
        }
        if self.is_static {
            parts.push("static");
        }
        if self.is_final {
            parts.push("final");
        }
        parts.join(" ")
    }
}
