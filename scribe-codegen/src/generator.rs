use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use scribe_core::{File, Overwrite, WriteResult};
use scribe_java::{Annotation, JavaWriter, PackageName};
use scribe_manifest::{AnnotationDecl, Manifest, TypeDecl};
use tracing::{debug, info};

/// Outcome of [`Generator::generate`].
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Paths written, relative to the output directory
    pub written: Vec<PathBuf>,
    /// Paths left alone because they already existed
    pub skipped: Vec<PathBuf>,
}

/// Generates one Java source file per type declared in a manifest.
pub struct Generator<'a> {
    manifest: &'a Manifest,
    overwrite: Overwrite,
}

impl<'a> Generator<'a> {
    pub fn new(manifest: &'a Manifest) -> Self {
        Self {
            manifest,
            overwrite: Overwrite::Always,
        }
    }

    /// Choose what happens to files that already exist.
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Render every file in memory, in declaration order.
    pub fn preview(&self) -> Result<Vec<File>> {
        let package_dir = PackageName::new(self.manifest.package.as_str()).to_path();

        self.manifest
            .types()
            .map(|(name, decl)| {
                let content = self
                    .render_type(name, decl)
                    .wrap_err_with(|| format!("failed to generate type '{name}'"))?;
                let path = Path::new(&package_dir).join(format!("{name}.java"));
                debug!(path = %path.display(), bytes = content.len(), "rendered type");
                Ok(File::new(path, content).with_overwrite(self.overwrite))
            })
            .collect()
    }

    /// Render every file and write it below `output_dir`.
    pub fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();
        for file in self.preview()? {
            let path = file.path().to_path_buf();
            match file.write(output_dir)? {
                WriteResult::Written => {
                    info!(path = %path.display(), "wrote file");
                    result.written.push(path);
                }
                WriteResult::Skipped => {
                    debug!(path = %path.display(), "kept existing file");
                    result.skipped.push(path);
                }
            }
        }
        Ok(result)
    }

    fn render_type(&self, name: &str, decl: &TypeDecl) -> scribe_core::Result<String> {
        let manifest = self.manifest;
        let mut w = JavaWriter::with_indent(String::new(), manifest.style.indent);

        w.package_decl(&manifest.package)?
            .imports(manifest.imports.iter().map(String::as_str))?
            .static_imports(manifest.static_imports.iter().map(String::as_str))?;

        decorate(&mut w, decl.doc.as_deref(), &decl.annotations)?;
        let interfaces: Vec<&str> = decl.implements.iter().map(String::as_str).collect();
        w.begin_type(decl.kind.into(), name, decl.extends.as_deref(), &interfaces)?;

        for field in &decl.fields {
            decorate(&mut w, field.doc.as_deref(), &field.annotations)?;
            w.field_decl(field.modifiers(), &field.ty, &field.name, field.init.as_deref())?;
        }
        if !decl.fields.is_empty() && (!decl.constructors.is_empty() || !decl.methods.is_empty()) {
            w.blank()?;
        }

        for constructor in &decl.constructors {
            decorate(&mut w, constructor.doc.as_deref(), &constructor.annotations)?;
            let params: Vec<&str> = constructor.params.iter().map(String::as_str).collect();
            w.begin_constructor(&params)?
                .lines(&constructor.body)?
                .end()?;
        }

        for method in &decl.methods {
            decorate(&mut w, method.doc.as_deref(), &method.annotations)?;
            let params: Vec<&str> = method.params.iter().map(String::as_str).collect();
            w.begin_method(
                method.visibility.into(),
                method.is_static,
                &method.returns,
                &method.name,
                &params,
            )?
            .lines(&method.body)?
            .end()?;
        }

        w.end()?;

        // One trailing newline per file
        let mut content = w.finish()?;
        content.truncate(content.trim_end().len());
        content.push('\n');
        Ok(content)
    }
}

fn decorate(
    w: &mut JavaWriter,
    doc: Option<&str>,
    annotations: &[AnnotationDecl],
) -> scribe_core::Result<()> {
    if let Some(doc) = doc.map(str::trim).filter(|doc| !doc.is_empty()) {
        w.javadoc([doc])?;
    }
    for annotation in annotations {
        w.annotation(to_annotation(annotation))?;
    }
    Ok(())
}

fn to_annotation(decl: &AnnotationDecl) -> Annotation {
    match decl {
        AnnotationDecl::Marker(ty) => Annotation::new(ty.as_str()),
        AnnotationDecl::Full { ty, members } => Annotation::new(ty.as_str())
            .members(members.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(src: &str) -> Manifest {
        src.parse().unwrap()
    }

    #[test]
    fn test_one_file_per_type_in_package_dir() {
        let manifest = manifest(
            r#"
package = "com.example"
[types.B]
[types.A]
"#,
        );
        let files = Generator::new(&manifest).preview().unwrap();
        let paths: Vec<&Path> = files.iter().map(File::path).collect();
        assert_eq!(
            paths,
            [Path::new("com/example/B.java"), Path::new("com/example/A.java")]
        );
    }

    #[test]
    fn test_empty_class() {
        let manifest = manifest("package = \"a\"\n[types.Empty]\n");
        let files = Generator::new(&manifest).preview().unwrap();
        assert_eq!(files[0].content(), "package a;\n\npublic class Empty {\n}\n");
    }

    #[test]
    fn test_fields_only_have_no_trailing_blank() {
        let manifest = manifest(
            r#"
package = "a"
[types.P]
[[types.P.fields]]
name = "x"
type = "int"
"#,
        );
        let files = Generator::new(&manifest).preview().unwrap();
        assert_eq!(
            files[0].content(),
            "package a;\n\npublic class P {\n    private int x;\n}\n"
        );
    }

    #[test]
    fn test_value_annotation_and_same_package_type() {
        let manifest = manifest(
            r#"
package = "com.example"
[types.T]
annotations = [
    { type = "java.lang.SuppressWarnings", members = { value = '"unchecked"' } },
    "com.example.Marker",
    "org.other.Tag",
]
"#,
        );
        let files = Generator::new(&manifest).preview().unwrap();
        let content = files[0].content();
        assert!(content.contains("@SuppressWarnings(\"unchecked\")\n@Marker\n@org.other.Tag\n"));
    }

    #[test]
    fn test_package_import_renders_wildcard() {
        let manifest = manifest("package = \"a\"\nimports = [\"java.util\"]\n[types.T]\n");
        let files = Generator::new(&manifest).preview().unwrap();
        assert_eq!(
            files[0].content(),
            "package a;\n\nimport java.util.*;\n\npublic class T {\n}\n"
        );
    }

    #[test]
    fn test_writer_error_names_the_type() {
        let manifest = manifest(
            r#"
package = "a"
[types.T]
[[types.T.constructors]]
params = ["int a, int b"]
"#,
        );
        let err = Generator::new(&manifest).preview().unwrap_err();
        assert_eq!(err.to_string(), "failed to generate type 'T'");
    }

    #[test]
    fn test_generate_writes_below_output_dir() {
        let manifest = manifest("package = \"com.example\"\n[types.A]\n");
        let dir = tempfile::tempdir().unwrap();

        let result = Generator::new(&manifest).generate(dir.path()).unwrap();
        assert_eq!(result.written, [PathBuf::from("com/example/A.java")]);

        let written = std::fs::read_to_string(dir.path().join("com/example/A.java")).unwrap();
        assert_eq!(written, "package com.example;\n\npublic class A {\n}\n");
    }

    #[test]
    fn test_skip_existing_keeps_edited_files() {
        let manifest = manifest("package = \"a\"\n[types.A]\n[types.B]\n");
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("a/A.java"), "// edited\n").unwrap();

        let result = Generator::new(&manifest)
            .with_overwrite(Overwrite::IfMissing)
            .generate(dir.path())
            .unwrap();
        assert_eq!(result.skipped, [PathBuf::from("a/A.java")]);
        assert_eq!(result.written, [PathBuf::from("a/B.java")]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("a/A.java")).unwrap(),
            "// edited\n"
        );
    }
}
