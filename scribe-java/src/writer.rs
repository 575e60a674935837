//! Streaming writer for Java compilation units.

use scribe_core::{CodeWriter, Error, Indent, Result, ScopeFrame, ScopeKind, ScopeStack, Sink};
use tracing::debug;

use crate::{
    annotation::{Annotation, string_literal},
    imports::{Import, ImportRegistry},
    javadoc::Javadoc,
    modifiers::{FieldModifiers, TypeKind, Visibility},
    names::{
        PackageName, TypeName, is_package_name, require_text, validate_identifier,
        validate_type_name,
    },
};

/// Writes one Java source file, top to bottom.
///
/// Every call appends to the sink immediately. Javadoc and annotations are
/// the exception: they are queued and written directly above the next
/// type, method, constructor or field declaration.
///
/// All methods return `&mut Self` so calls chain with `?`.
///
/// # Example
///
/// ```
/// use scribe_java::JavaWriter;
///
/// # fn main() -> scribe_core::Result<()> {
/// let mut w = JavaWriter::new(String::new());
/// w.package_decl("com.example")?
///     .imports(["java.util.List"])?
///     .begin_class("Greeter")?
///     .private_field("String", "name")?
///     .begin_constructor(&["String name"])?
///     .line("this.name = name;")?
///     .end()?
///     .end()?;
///
/// assert_eq!(
///     w.finish()?,
///     concat!(
///         "package com.example;\n",
///         "\n",
///         "import java.util.List;\n",
///         "\n",
///         "public class Greeter {\n",
///         "    private String name;\n",
///         "    public Greeter(String name) {\n",
///         "        this.name = name;\n",
///         "    }\n",
///         "}\n",
///         "\n",
///     )
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JavaWriter<S = String> {
    out: CodeWriter<S>,
    imports: ImportRegistry,
    package: Option<PackageName>,
    pending_annotations: Vec<Annotation>,
    pending_javadoc: Option<Javadoc>,
    type_opened: bool,
}

impl<S: Sink> JavaWriter<S> {
    /// Create a writer with 4-space indentation.
    pub fn new(sink: S) -> Self {
        Self::with_indent(sink, Indent::default())
    }

    /// Create a writer with the specified indentation.
    pub fn with_indent(sink: S, indent: Indent) -> Self {
        Self {
            out: CodeWriter::with_indent(sink, indent),
            imports: ImportRegistry::new(),
            package: None,
            pending_annotations: Vec::new(),
            pending_javadoc: None,
            type_opened: false,
        }
    }

    // =========================================================================
    // Header: package and imports
    // =========================================================================

    /// Declare the package. Must be the first thing written.
    pub fn package_decl(&mut self, name: &str) -> Result<&mut Self> {
        if let Some(existing) = &self.package {
            return Err(Error::sequencing(
                "package_decl",
                format!("package '{existing}' is already declared"),
            ));
        }
        if self.out.has_output() || self.has_pending() {
            return Err(Error::sequencing(
                "package_decl",
                "the package declaration must come before any other content",
            ));
        }
        let package = PackageName::new(name.trim());
        package.validate()?;

        debug!(package = %package, "package declared");
        self.out.push_line(&format!("package {package};"))?;
        self.out.push_blank()?;
        self.package = Some(package);
        Ok(self)
    }

    /// Import types (`pkg.Type`) and packages (`pkg.*`).
    ///
    /// The batch is written sorted and deduplicated, followed by a blank
    /// line. Targets imported by an earlier call are not repeated.
    pub fn imports<I>(&mut self, targets: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Import>,
    {
        self.check_import_position("imports")?;
        let entries: Vec<Import> = targets.into_iter().map(Into::into).collect();
        for entry in &entries {
            entry.validate()?;
        }
        let lines = self.imports.add(entries);
        self.write_import_block(&lines)
    }

    /// Import all static members of the given types (`import static pkg.Type.*;`).
    pub fn static_imports<I>(&mut self, types: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<TypeName>,
    {
        self.check_import_position("static_imports")?;
        let types: Vec<TypeName> = types.into_iter().map(Into::into).collect();
        for ty in &types {
            ty.validate()?;
            let qualified = ty.qualified();
            if is_package_name(&qualified) {
                return Err(Error::invalid_argument(
                    "static import",
                    qualified,
                    "names a package, static imports take a type",
                ));
            }
        }
        let lines = self.imports.add_static(types);
        self.write_import_block(&lines)
    }

    // =========================================================================
    // Decorations
    // =========================================================================

    /// Queue a javadoc comment for the next declaration.
    pub fn javadoc<I>(&mut self, lines: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if self.pending_javadoc.is_some() {
            return Err(Error::sequencing(
                "javadoc",
                "a javadoc block is already waiting for a declaration",
            ));
        }
        let doc = Javadoc::new(lines);
        if doc.is_empty() {
            return Err(Error::invalid_argument(
                "javadoc",
                "",
                "at least one line is required",
            ));
        }
        self.pending_javadoc = Some(doc);
        Ok(self)
    }

    /// Queue an annotation for the next declaration.
    pub fn annotation(&mut self, annotation: Annotation) -> Result<&mut Self> {
        annotation.type_name().validate()?;
        for (key, value) in annotation.iter() {
            validate_identifier("annotation member", key)?;
            require_text("annotation member value", value)?;
        }
        self.pending_annotations.push(annotation);
        Ok(self)
    }

    /// Queue `@SuppressWarnings("value")`.
    pub fn suppress_warnings(&mut self, value: &str) -> Result<&mut Self> {
        self.annotation(
            Annotation::new(TypeName::new("java.lang", "SuppressWarnings"))
                .value(string_literal(value)),
        )
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Open a class or interface.
    ///
    /// Classes render `extends` for the superclass and `implements` for the
    /// interfaces. Interfaces render their super-interfaces with `extends`
    /// and cannot have a superclass.
    pub fn begin_type(
        &mut self,
        kind: TypeKind,
        name: &str,
        superclass: Option<&str>,
        interfaces: &[&str],
    ) -> Result<&mut Self> {
        let owner = validate_type_name("type name", name)?.to_string();
        if let Some(superclass) = superclass {
            require_text("superclass", superclass)?;
        }
        for interface in interfaces {
            require_text("interface", interface)?;
        }

        let mut header = format!("public {} {}", kind.keyword(), name.trim());
        match kind {
            TypeKind::Class => {
                if let Some(superclass) = superclass {
                    header.push_str(" extends ");
                    header.push_str(superclass.trim());
                }
                if !interfaces.is_empty() {
                    header.push_str(" implements ");
                    header.push_str(&interfaces.join(", "));
                }
            }
            TypeKind::Interface => {
                if let Some(superclass) = superclass {
                    return Err(Error::invalid_argument(
                        "superclass",
                        superclass,
                        "an interface cannot extend a class",
                    ));
                }
                if !interfaces.is_empty() {
                    header.push_str(" extends ");
                    header.push_str(&interfaces.join(", "));
                }
            }
        }
        header.push_str(" {");

        self.flush_decorations()?;
        self.out
            .open(&header, ScopeFrame::owned(kind.scope_kind(), owner))?;
        self.type_opened = true;
        Ok(self)
    }

    /// Open `public class Name {`.
    pub fn begin_class(&mut self, name: &str) -> Result<&mut Self> {
        self.begin_type(TypeKind::Class, name, None, &[])
    }

    /// Open a class with a superclass and/or interfaces.
    pub fn begin_class_extends(
        &mut self,
        name: &str,
        superclass: Option<&str>,
        interfaces: &[&str],
    ) -> Result<&mut Self> {
        self.begin_type(TypeKind::Class, name, superclass, interfaces)
    }

    /// Open an interface extending the given interfaces.
    pub fn begin_interface(&mut self, name: &str, extends: &[&str]) -> Result<&mut Self> {
        self.begin_type(TypeKind::Interface, name, None, extends)
    }

    // =========================================================================
    // Methods and constructors
    // =========================================================================

    /// Open a method with the parameters rendered as given.
    pub fn begin_method(
        &mut self,
        visibility: Visibility,
        is_static: bool,
        return_type: &str,
        name: &str,
        params: &[&str],
    ) -> Result<&mut Self> {
        self.begin_method_mapped(visibility, is_static, return_type, name, params, str::to_string)
    }

    /// Open a method, passing each parameter through `mapper` first.
    ///
    /// The mapper must turn one parameter into exactly one parameter.
    pub fn begin_method_mapped<F>(
        &mut self,
        visibility: Visibility,
        is_static: bool,
        return_type: &str,
        name: &str,
        params: &[&str],
        mapper: F,
    ) -> Result<&mut Self>
    where
        F: Fn(&str) -> String,
    {
        require_text("return type", return_type)?;
        validate_identifier("method name", name.trim())?;
        let params = render_params(params, mapper)?;

        let mut header = String::new();
        if let Some(keyword) = visibility.keyword() {
            header.push_str(keyword);
            header.push(' ');
        }
        if is_static {
            header.push_str("static ");
        }
        header.push_str(&format!("{} {}({params}) {{", return_type.trim(), name.trim()));

        self.flush_decorations()?;
        self.out.open(&header, ScopeFrame::new(ScopeKind::Method))?;
        Ok(self)
    }

    /// Open `public <ret> <name>(<params>) {`.
    pub fn begin_public_method(
        &mut self,
        return_type: &str,
        name: &str,
        params: &[&str],
    ) -> Result<&mut Self> {
        self.begin_method(Visibility::Public, false, return_type, name, params)
    }

    /// Open `public static <ret> <name>(<params>) {`.
    pub fn begin_static_method(
        &mut self,
        return_type: &str,
        name: &str,
        params: &[&str],
    ) -> Result<&mut Self> {
        self.begin_method(Visibility::Public, true, return_type, name, params)
    }

    /// Open a public constructor of the enclosing class.
    pub fn begin_constructor(&mut self, params: &[&str]) -> Result<&mut Self> {
        self.begin_constructor_mapped(params, str::to_string)
    }

    /// Open a public constructor, passing each parameter through `mapper`.
    ///
    /// The constructor is named after the class scope it is opened in, which
    /// must be the innermost open scope.
    pub fn begin_constructor_mapped<F>(&mut self, params: &[&str], mapper: F) -> Result<&mut Self>
    where
        F: Fn(&str) -> String,
    {
        let owner = match self.out.scopes().top() {
            Some(frame) if frame.kind() == ScopeKind::Class => frame.owner().map(str::to_string),
            Some(frame) => {
                return Err(Error::scope_mismatch(
                    "begin_constructor",
                    format!("constructors must be declared in a class, not a {}", frame.kind()),
                ));
            }
            None => None,
        };
        let owner = owner.ok_or_else(|| {
            Error::scope_mismatch("begin_constructor", "there is no enclosing class")
        })?;
        let params = render_params(params, mapper)?;

        self.flush_decorations()?;
        self.out.open(
            &format!("public {owner}({params}) {{"),
            ScopeFrame::new(ScopeKind::Constructor),
        )?;
        Ok(self)
    }

    /// Open a statement block such as `if (x)` or `static`.
    ///
    /// Pending decorations are left for the next declaration.
    pub fn begin_block(&mut self, header: &str) -> Result<&mut Self> {
        require_text("block header", header)?;
        self.out.open(
            &format!("{} {{", header.trim_end()),
            ScopeFrame::new(ScopeKind::Block),
        )?;
        Ok(self)
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Write a field declaration with any modifier combination.
    pub fn field_decl(
        &mut self,
        modifiers: FieldModifiers,
        ty: &str,
        name: &str,
        initializer: Option<&str>,
    ) -> Result<&mut Self> {
        require_text("field type", ty)?;
        validate_identifier("field name", name.trim())?;
        if let Some(init) = initializer {
            require_text("field initializer", init)?;
        }

        let mut line = modifiers.render();
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(ty.trim());
        line.push(' ');
        line.push_str(name.trim());
        if let Some(init) = initializer {
            line.push_str(" = ");
            line.push_str(init.trim());
        }
        line.push(';');

        self.flush_decorations()?;
        self.out.push_line(&line)?;
        Ok(self)
    }

    pub fn private_field(&mut self, ty: &str, name: &str) -> Result<&mut Self> {
        self.field_decl(FieldModifiers::PRIVATE, ty, name, None)
    }

    pub fn protected_field(&mut self, ty: &str, name: &str) -> Result<&mut Self> {
        self.field_decl(FieldModifiers::PROTECTED, ty, name, None)
    }

    pub fn public_field(&mut self, ty: &str, name: &str) -> Result<&mut Self> {
        self.field_decl(FieldModifiers::PUBLIC, ty, name, None)
    }

    /// Package-private field (no modifier keyword).
    pub fn field(&mut self, ty: &str, name: &str) -> Result<&mut Self> {
        self.field_decl(FieldModifiers::PACKAGE, ty, name, None)
    }

    pub fn private_final(&mut self, ty: &str, name: &str) -> Result<&mut Self> {
        self.field_decl(FieldModifiers::PRIVATE.with_final(), ty, name, None)
    }

    pub fn public_final(&mut self, ty: &str, name: &str) -> Result<&mut Self> {
        self.field_decl(FieldModifiers::PUBLIC.with_final(), ty, name, None)
    }

    pub fn public_final_init(&mut self, ty: &str, name: &str, value: &str) -> Result<&mut Self> {
        self.field_decl(FieldModifiers::PUBLIC.with_final(), ty, name, Some(value))
    }

    pub fn public_static_final(&mut self, ty: &str, name: &str, value: &str) -> Result<&mut Self> {
        let modifiers = FieldModifiers::PUBLIC.with_static().with_final();
        self.field_decl(modifiers, ty, name, Some(value))
    }

    pub fn private_static_final(&mut self, ty: &str, name: &str, value: &str) -> Result<&mut Self> {
        let modifiers = FieldModifiers::PRIVATE.with_static().with_final();
        self.field_decl(modifiers, ty, name, Some(value))
    }

    // =========================================================================
    // Bodies
    // =========================================================================

    /// Write `text` verbatim at the current indentation.
    pub fn line(&mut self, text: &str) -> Result<&mut Self> {
        self.out.push_line(text)?;
        Ok(self)
    }

    /// Write several verbatim lines.
    pub fn lines<I>(&mut self, lines: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            self.out.push_line(line.as_ref())?;
        }
        Ok(self)
    }

    /// Write an empty line.
    pub fn blank(&mut self) -> Result<&mut Self> {
        self.out.push_blank()?;
        Ok(self)
    }

    /// Close the innermost open scope.
    pub fn end(&mut self) -> Result<&mut Self> {
        if self.out.scopes().is_empty() {
            return Err(Error::scope_mismatch("end", "there is no open scope to close"));
        }
        if self.has_pending() {
            return Err(Error::sequencing(
                "end",
                "javadoc or annotations are waiting for a declaration",
            ));
        }
        self.out.close()?;
        Ok(self)
    }

    // =========================================================================
    // State
    // =========================================================================

    /// How `ty` should be written here: its simple name when visible
    /// through the imports or package, its qualified name otherwise.
    pub fn raw_name(&self, ty: &TypeName) -> String {
        if self.imports.is_visible(ty, self.package.as_ref()) {
            ty.simple_name().to_string()
        } else {
            ty.qualified()
        }
    }

    /// Current indentation depth.
    pub fn depth(&self) -> usize {
        self.out.depth()
    }

    /// The open scopes, outermost first.
    pub fn scopes(&self) -> &ScopeStack {
        self.out.scopes()
    }

    /// The declared package, if any.
    pub fn package(&self) -> Option<&PackageName> {
        self.package.as_ref()
    }

    pub fn import_registry(&self) -> &ImportRegistry {
        &self.imports
    }

    /// Whether javadoc or annotations are queued.
    pub fn has_pending(&self) -> bool {
        self.pending_javadoc.is_some() || !self.pending_annotations.is_empty()
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &S {
        self.out.sink()
    }

    /// Check that the file is complete and return the sink.
    pub fn finish(self) -> Result<S> {
        if let Some(frame) = self.out.scopes().top() {
            return Err(Error::scope_mismatch(
                "finish",
                format!(
                    "{} scope(s) still open, innermost is a {}",
                    self.out.depth(),
                    frame.kind()
                ),
            ));
        }
        if self.has_pending() {
            return Err(Error::sequencing(
                "finish",
                "javadoc or annotations are waiting for a declaration",
            ));
        }
        Ok(self.out.into_inner())
    }

    /// Return the sink without checking for open scopes.
    pub fn into_inner(self) -> S {
        self.out.into_inner()
    }

    fn check_import_position(&self, operation: &'static str) -> Result<()> {
        if self.type_opened || self.out.depth() > 0 {
            return Err(Error::sequencing(
                operation,
                "imports must come before the first type declaration",
            ));
        }
        Ok(())
    }

    fn write_import_block(&mut self, lines: &[String]) -> Result<&mut Self> {
        if lines.is_empty() {
            return Ok(self);
        }
        debug!(count = lines.len(), "imports rendered");
        for line in lines {
            self.out.push_line(line)?;
        }
        self.out.push_blank()?;
        Ok(self)
    }

    fn flush_decorations(&mut self) -> Result<()> {
        if let Some(doc) = self.pending_javadoc.take() {
            for line in doc.render() {
                self.out.push_line(&line)?;
            }
        }
        for annotation in std::mem::take(&mut self.pending_annotations) {
            let name = self.raw_name(annotation.type_name());
            self.out.push_line(&annotation.render(&name))?;
        }
        Ok(())
    }
}

/// Map and join parameters, rejecting blanks and mapped values that would
/// split into several parameters.
fn render_params<F>(params: &[&str], mapper: F) -> Result<String>
where
    F: Fn(&str) -> String,
{
    let mut rendered = Vec::with_capacity(params.len());
    for param in params {
        require_text("parameter", param)?;
        let mapped = mapper(param.trim());
        require_text("mapped parameter", &mapped)?;
        if has_top_level_comma(&mapped) {
            return Err(Error::invalid_argument(
                "mapped parameter",
                mapped,
                "the mapper must produce exactly one parameter",
            ));
        }
        rendered.push(mapped.trim().to_string());
    }
    Ok(rendered.join(", "))
}

/// Commas nested in generics, annotations or arrays don't separate parameters.
fn has_top_level_comma(s: &str) -> bool {
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}
