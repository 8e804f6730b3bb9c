//! Module index and optional runnable-service scaffold.

use minijinja::{Environment, context};

use oxgen_core::GeneratedFile;
use oxgen_core::config::GenOptions;
use oxgen_core::resolve::GenDefinition;
use oxgen_core::spec::SpecDocument;

use crate::naming::{caps, snake};

/// Emit `<model_module>/mod.rs` declaring and re-exporting one module per
/// definition, in definition order.
pub fn emit_models_mod(defs: &[GenDefinition]) -> String {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template("mod.rs.j2", include_str!("../../templates/mod.rs.j2"))
        .expect("template should be valid");
    let tmpl = env.get_template("mod.rs.j2").unwrap();

    let modules: Vec<minijinja::Value> = defs
        .iter()
        .map(|def| {
            context! {
                module => snake(&def.name),
                name => caps(&def.name),
            }
        })
        .collect();

    tmpl.render(context! { modules => modules })
        .expect("render should succeed")
}

/// Emit the runnable service scaffold: a crate manifest and a `main` that
/// mounts the generated router.
pub fn emit_scaffold(doc: &SpecDocument, options: &GenOptions) -> Vec<GeneratedFile> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template("Cargo.toml.j2", include_str!("../../templates/Cargo.toml.j2"))
        .expect("template should be valid");
    env.add_template("main.rs.j2", include_str!("../../templates/main.rs.j2"))
        .expect("template should be valid");

    let package = options
        .service_name
        .clone()
        .unwrap_or_else(|| slugify(&doc.info.title));

    let manifest = env
        .get_template("Cargo.toml.j2")
        .unwrap()
        .render(context! { package => package })
        .expect("render should succeed");

    let main = env
        .get_template("main.rs.j2")
        .unwrap()
        .render(context! {
            model_module => options.model_module.clone(),
            operations_module => options.operations_module.clone(),
            server_module => options.server_module.clone(),
        })
        .expect("render should succeed");

    vec![
        GeneratedFile {
            path: "Cargo.toml".to_string(),
            content: manifest,
        },
        GeneratedFile {
            path: "src/main.rs".to_string(),
            content: main,
        },
    ]
}

/// Lowercased title with runs of non-alphanumerics collapsed to dashes.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash && !slug.is_empty() {
            slug.push('-');
            prev_dash = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "generated-service".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Swagger Petstore"), "swagger-petstore");
        assert_eq!(slugify("  My  API!  "), "my-api");
        assert_eq!(slugify(""), "generated-service");
    }

    #[test]
    fn test_scaffold_uses_module_names() {
        let doc = oxgen_core::spec::from_yaml(
            "swagger: \"2.0\"\ninfo: { title: Petstore, version: \"1.0\" }\n",
        )
        .unwrap();
        let options = GenOptions::default();
        let files = emit_scaffold(&doc, &options);
        assert_eq!(files.len(), 2);
        assert!(files[0].content.contains("name = \"petstore\""));
        assert!(files[1].content.contains("mod models;"));
        assert!(files[1].content.contains("let app = server::router();"));
    }
}
