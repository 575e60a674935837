use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use scribe_manifest::{Kind, Manifest, TypeDecl};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to scribe.toml (defaults to ./scribe.toml)
    #[arg(short, long, default_value = "scribe.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();

        println!("✓ {} is valid\n", self.config.display());
        println!("  package {}", manifest.package);
        if !manifest.imports.is_empty() || !manifest.static_imports.is_empty() {
            println!(
                "  {}, {}",
                plural(manifest.imports.len(), "import"),
                plural(manifest.static_imports.len(), "static import")
            );
        }
        println!();

        println!("  {}:", plural(manifest.types.len(), "type"));
        for (name, decl) in manifest.types() {
            println!("    {}", describe(name, decl));
        }

        Ok(())
    }
}

/// One summary line per type, e.g. `class Person (2 fields, 1 method)`.
fn describe(name: &str, decl: &TypeDecl) -> String {
    let kind = match decl.kind {
        Kind::Class => "class",
        Kind::Interface => "interface",
    };
    let mut members = Vec::new();
    if !decl.fields.is_empty() {
        members.push(plural(decl.fields.len(), "field"));
    }
    if !decl.constructors.is_empty() {
        members.push(plural(decl.constructors.len(), "constructor"));
    }
    if !decl.methods.is_empty() {
        members.push(plural(decl.methods.len(), "method"));
    }

    if members.is_empty() {
        format!("{kind} {name}")
    } else {
        format!("{kind} {name} ({})", members.join(", "))
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let manifest: Manifest = r#"
package = "a"

[types.Person]
[[types.Person.fields]]
name = "name"
type = "String"
[[types.Person.fields]]
name = "age"
type = "int"
[[types.Person.methods]]
name = "greet"

[types.Marker]
kind = "interface"
"#
        .parse()
        .unwrap();

        assert_eq!(
            describe("Person", &manifest.types["Person"]),
            "class Person (2 fields, 1 method)"
        );
        assert_eq!(describe("Marker", &manifest.types["Marker"]), "interface Marker");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "type"), "0 types");
        assert_eq!(plural(1, "type"), "1 type");
    }
}
