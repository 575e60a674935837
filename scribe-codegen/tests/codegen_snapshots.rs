//! Snapshot tests for generated Java sources.
//!
//! Run `cargo insta review` to update snapshots after intentional changes.

use std::str::FromStr;

use scribe_codegen::Generator;
use scribe_manifest::Manifest;

/// Generate files from a manifest and return `(path, content)` pairs.
fn generate_files(manifest_toml: &str) -> Vec<(String, String)> {
    let manifest = Manifest::from_str(manifest_toml).expect("Failed to parse manifest");
    let files = Generator::new(&manifest)
        .preview()
        .expect("Failed to generate files");

    files
        .into_iter()
        .map(|f| (f.path().display().to_string(), f.content().to_string()))
        .collect()
}

fn get_file<'a>(files: &'a [(String, String)], path: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, c)| c.as_str())
}

const MODEL: &str = r#"
package = "com.example.model"
imports = ["java.util.List", "javax.persistence.*"]
static_imports = ["java.util.Objects"]

[types.Person]
doc = "A person known to the system."
annotations = [
    "javax.persistence.Entity",
    { type = "javax.persistence.Table", members = { name = '"people"' } },
]
implements = ["java.io.Serializable"]

[[types.Person.fields]]
name = "serialVersionUID"
type = "long"
static = true
final = true
init = "1L"

[[types.Person.fields]]
name = "name"
type = "String"
doc = "Display name."

[[types.Person.fields]]
name = "tags"
type = "List<String>"
annotations = ["javax.persistence.Transient"]

[[types.Person.constructors]]
params = ["String name", "List<String> tags"]
body = ["this.name = Objects.requireNonNull(name);", "this.tags = tags;"]

[[types.Person.methods]]
name = "getName"
returns = "String"
body = ["return name;"]

[[types.Person.methods]]
name = "of"
returns = "Person"
static = true
params = ["String name"]
doc = """
Creates a person without tags.

@param name the display name"""
body = ["return new Person(name, List.of());"]

[types.Named]
kind = "interface"
doc = "Something with a name."
implements = ["Comparable<Named>"]

[[types.Named.fields]]
name = "UNKNOWN"
type = "String"
visibility = "public"
static = true
final = true
init = '"?"'

[[types.Named.methods]]
name = "describe"
returns = "String"
static = true
params = ["Named named"]
body = ["return \"Named(\" + named + \")\";"]
"#;

#[test]
fn test_person_class() {
    let files = generate_files(MODEL);
    let person = get_file(&files, "com/example/model/Person.java").expect("Person.java not found");
    insta::assert_snapshot!("person_class", person.trim_end());
}

#[test]
fn test_named_interface() {
    let files = generate_files(MODEL);
    let named = get_file(&files, "com/example/model/Named.java").expect("Named.java not found");
    insta::assert_snapshot!("named_interface", named.trim_end());
}

#[test]
fn test_files_follow_declaration_order() {
    let files = generate_files(MODEL);
    let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        paths,
        [
            "com/example/model/Person.java",
            "com/example/model/Named.java"
        ]
    );
}

#[test]
fn test_tab_indent() {
    let files = generate_files(
        r#"
        package = "a"

        [style]
        indent = "tab"

        [types.Tabbed]

        [[types.Tabbed.methods]]
        name = "run"
        body = ["go();"]
        "#,
    );

    let tabbed = get_file(&files, "a/Tabbed.java").expect("Tabbed.java not found");
    assert_eq!(
        tabbed,
        "package a;\n\npublic class Tabbed {\n\tpublic void run() {\n\t\tgo();\n\t}\n}\n"
    );
}

#[test]
fn test_subclass_with_two_space_indent() {
    let files = generate_files(
        r#"
        package = "a"

        [style]
        indent = 2

        [types.Child]
        extends = "Parent"
        implements = ["Runnable", "AutoCloseable"]

        [[types.Child.methods]]
        name = "run"
        annotations = ["java.lang.Override"]
        "#,
    );

    let child = get_file(&files, "a/Child.java").expect("Child.java not found");
    assert_eq!(
        child,
        "package a;\n\n\
         public class Child extends Parent implements Runnable, AutoCloseable {\n  \
         @Override\n  \
         public void run() {\n  \
         }\n\
         }\n"
    );
}
