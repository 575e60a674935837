//! Import bookkeeping and rendering.

use std::collections::BTreeSet;

use scribe_core::Result;

use crate::names::{PackageName, TypeName, is_package_name, validate_qualified};

/// A single import target.
///
/// Ordering compares the qualified name first, which is what import
/// blocks are sorted by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Import {
    qualified_name: String,
    wildcard: bool,
}

impl Import {
    /// Import a single type.
    pub fn ty(ty: &TypeName) -> Self {
        Self {
            qualified_name: ty.qualified(),
            wildcard: false,
        }
    }

    /// Import every type of a package (`pkg.*`).
    pub fn package(package: &PackageName) -> Self {
        Self {
            qualified_name: package.as_str().to_string(),
            wildcard: true,
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Whether this imports a whole package.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    fn target(&self) -> String {
        if self.wildcard {
            format!("{}.*", self.qualified_name)
        } else {
            self.qualified_name.clone()
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_qualified("import", &self.qualified_name)
    }
}

impl From<TypeName> for Import {
    fn from(ty: TypeName) -> Self {
        Self::ty(&ty)
    }
}

impl From<&TypeName> for Import {
    fn from(ty: &TypeName) -> Self {
        Self::ty(ty)
    }
}

impl From<PackageName> for Import {
    fn from(package: PackageName) -> Self {
        Self::package(&package)
    }
}

impl From<&PackageName> for Import {
    fn from(package: &PackageName) -> Self {
        Self::package(package)
    }
}

/// `"java.util.*"` and `"java.util"` import a package, `"java.util.List"`
/// imports a type.
impl From<&str> for Import {
    fn from(target: &str) -> Self {
        let target = target.trim();
        match target.strip_suffix(".*") {
            Some(package) => Self::package(&PackageName::new(package)),
            None if is_package_name(target) => Self::package(&PackageName::new(target)),
            None => Self::ty(&TypeName::parse(target)),
        }
    }
}

/// Tracks every import rendered into one output unit.
///
/// Each batch is rendered sorted and deduplicated. Targets already
/// rendered by an earlier batch are skipped, so an import line never
/// appears twice in a file.
///
/// # Example
///
/// ```
/// use scribe_java::{Import, ImportRegistry};
///
/// let mut registry = ImportRegistry::new();
/// let lines = registry.add(["java.util.List", "java.io.File", "java.util.List"].map(Import::from));
/// assert_eq!(lines, vec!["import java.io.File;", "import java.util.List;"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportRegistry {
    plain: BTreeSet<Import>,
    statics: BTreeSet<Import>,
}

impl ImportRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register plain imports, returning the lines to emit.
    pub fn add(&mut self, entries: impl IntoIterator<Item = Import>) -> Vec<String> {
        let batch: BTreeSet<Import> = entries.into_iter().collect();
        batch
            .into_iter()
            .filter(|import| self.plain.insert(import.clone()))
            .map(|import| format!("import {};", import.target()))
            .collect()
    }

    /// Register static member imports for whole types, returning the lines
    /// to emit.
    pub fn add_static(&mut self, types: impl IntoIterator<Item = TypeName>) -> Vec<String> {
        let batch: BTreeSet<Import> = types
            .into_iter()
            .map(|ty| Import {
                qualified_name: ty.qualified(),
                wildcard: true,
            })
            .collect();
        batch
            .into_iter()
            .filter(|import| self.statics.insert(import.clone()))
            .map(|import| format!("import static {};", import.target()))
            .collect()
    }

    /// Whether `ty` can be referred to by its simple name.
    ///
    /// True for unqualified names, `java.lang` types, types in
    /// `current_package`, and types whose top-level type or package has
    /// been imported. A single-type import of another type with the same
    /// simple name hides the first three.
    pub fn is_visible(&self, ty: &TypeName, current_package: Option<&PackageName>) -> bool {
        if self.is_shadowed(ty) {
            return false;
        }
        let package = ty.package();
        if package.is_empty() || package == "java.lang" {
            return true;
        }
        if current_package.is_some_and(|p| p.as_str() == package) {
            return true;
        }
        let direct = Import {
            qualified_name: ty.top_level_qualified(),
            wildcard: false,
        };
        let wildcard = Import {
            qualified_name: package.to_string(),
            wildcard: true,
        };
        self.plain.contains(&direct) || self.plain.contains(&wildcard)
    }

    fn is_shadowed(&self, ty: &TypeName) -> bool {
        let name = ty.top_level_name();
        let qualified = ty.top_level_qualified();
        self.plain.iter().any(|import| {
            !import.wildcard
                && import.qualified_name != qualified
                && import.qualified_name.rsplit('.').next() == Some(name)
        })
    }

    /// Check if an import has been rendered.
    pub fn contains(&self, import: &Import) -> bool {
        self.plain.contains(import)
    }

    /// Iterate over plain imports in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Import> {
        self.plain.iter()
    }

    /// Iterate over static imports in sorted order.
    pub fn iter_static(&self) -> impl Iterator<Item = &Import> {
        self.statics.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() && self.statics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_is_sorted_and_deduplicated() {
        let mut registry = ImportRegistry::new();
        let lines = registry.add(
            ["org.junit.Test", "java.io.StringWriter", "java.io.IOException", "org.junit.Test"]
                .map(Import::from),
        );

        assert_eq!(
            lines,
            vec![
                "import java.io.IOException;",
                "import java.io.StringWriter;",
                "import org.junit.Test;",
            ]
        );
    }

    #[test]
    fn test_package_imports_render_wildcards() {
        let mut registry = ImportRegistry::new();
        let lines = registry.add([
            Import::package(&PackageName::new("java.util")),
            Import::package(&PackageName::new("java.lang.reflect")),
        ]);

        assert_eq!(
            lines,
            vec!["import java.lang.reflect.*;", "import java.util.*;"]
        );
    }

    #[test]
    fn test_str_with_star_is_package_import() {
        let import = Import::from("java.util.*");
        assert!(import.is_wildcard());
        assert_eq!(import.qualified_name(), "java.util");
    }

    #[test]
    fn test_str_without_type_segment_is_package_import() {
        let lines = ImportRegistry::new().add(["java.lang.reflect", "java.util"].map(Import::from));
        assert_eq!(
            lines,
            vec!["import java.lang.reflect.*;", "import java.util.*;"]
        );
    }

    #[test]
    fn test_single_type_import_hides_java_lang_and_package_types() {
        let mut registry = ImportRegistry::new();
        registry.add(["com.acme.Override", "com.acme.Local"].map(Import::from));
        let current = PackageName::new("com.example");

        let hidden = TypeName::parse("java.lang.Override");
        assert!(!registry.is_visible(&hidden, Some(&current)));
        let hidden = TypeName::parse("com.example.Local");
        assert!(!registry.is_visible(&hidden, Some(&current)));

        let imported = TypeName::parse("com.acme.Override");
        assert!(registry.is_visible(&imported, Some(&current)));
        let unrelated = TypeName::parse("java.lang.String");
        assert!(registry.is_visible(&unrelated, Some(&current)));
    }

    #[test]
    fn test_later_batches_skip_rendered_imports() {
        let mut registry = ImportRegistry::new();
        registry.add([Import::from("java.util.List")]);
        let lines = registry.add(["java.util.List", "java.util.Map"].map(Import::from));

        assert_eq!(lines, vec!["import java.util.Map;"]);
    }

    #[test]
    fn test_static_imports() {
        let mut registry = ImportRegistry::new();
        let lines = registry.add_static([
            TypeName::parse("java.util.Collections"),
            TypeName::parse("java.util.Arrays"),
        ]);

        assert_eq!(
            lines,
            vec![
                "import static java.util.Arrays.*;",
                "import static java.util.Collections.*;",
            ]
        );
        assert_eq!(registry.iter_static().count(), 2);
        assert_eq!(registry.iter().count(), 0);
    }

    #[test]
    fn test_visibility() {
        let mut registry = ImportRegistry::new();
        registry.add([Import::from("org.junit.Test"), Import::from("javax.persistence.*")]);
        let here = PackageName::new("com.example");

        assert!(registry.is_visible(&TypeName::parse("org.junit.Test"), None));
        assert!(registry.is_visible(&TypeName::parse("javax.persistence.Entity"), None));
        assert!(registry.is_visible(&TypeName::parse("java.lang.Override"), None));
        assert!(registry.is_visible(&TypeName::parse("com.example.Local"), Some(&here)));
        assert!(registry.is_visible(&TypeName::parse("Bare"), None));
        assert!(!registry.is_visible(&TypeName::parse("org.junit.Before"), None));
        assert!(!registry.is_visible(&TypeName::parse("java.lang.annotation.Retention"), None));
    }

    #[test]
    fn test_nested_type_visible_through_outer_import() {
        let mut registry = ImportRegistry::new();
        registry.add([Import::from("java.util.Map")]);
        assert!(registry.is_visible(&TypeName::parse("java.util.Map.Entry"), None));
    }
}
