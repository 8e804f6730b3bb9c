//! Operation walking, tag grouping, and the operation-stub file.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use oxgen_core::config::{GenOptions, IncludeFilters};
use oxgen_core::error::EmitError;
use oxgen_core::spec::{HttpMethod, Operation, Parameter, ParameterLocation, SpecDocument};

use crate::naming::snake;
use crate::printer::{Printer, ln};

/// One operation bound to its path and method.
#[derive(Debug, Clone, Copy)]
pub struct BoundOperation<'a> {
    pub method: HttpMethod,
    pub path: &'a str,
    pub op: &'a Operation,
}

/// The route group key: the operation's first tag only.
pub fn first_tag(op: &Operation) -> Result<&str, EmitError> {
    op.tags
        .first()
        .map(String::as_str)
        .ok_or_else(|| EmitError::MissingTag(op.id.clone()))
}

/// Walk the document's operations in path order, methods in fixed order
/// within a path, applying the configured allow-lists.
pub fn collect_operations<'a>(
    doc: &'a SpecDocument,
    filters: &IncludeFilters,
) -> Result<Vec<BoundOperation<'a>>, EmitError> {
    let mut ops = Vec::new();
    for (path, item) in &doc.paths {
        for (method, op) in item.operations() {
            let tag = first_tag(op)?;
            if !filters.tag_allowed(tag) || !filters.operation_allowed(&op.id) {
                continue;
            }
            ops.push(BoundOperation { method, path, op });
        }
    }
    Ok(ops)
}

/// Group operations by first tag, preserving first-seen group order.
pub fn group_by_tag<'a>(
    ops: &[BoundOperation<'a>],
) -> Result<IndexMap<String, Vec<BoundOperation<'a>>>, EmitError> {
    let mut groups: IndexMap<String, Vec<BoundOperation<'a>>> = IndexMap::new();
    for bound in ops {
        let tag = first_tag(bound.op)?;
        groups.entry(tag.to_string()).or_default().push(*bound);
    }
    Ok(groups)
}

/// The Rust type a primitive (non-body) parameter parses into.
pub fn param_rust_type(param: &Parameter) -> &'static str {
    match param.param_type.as_deref() {
        Some("integer") => match param.format.as_deref() {
            Some("int32") => "i32",
            _ => "i64",
        },
        Some("number") => match param.format.as_deref() {
            Some("float") => "f32",
            _ => "f64",
        },
        Some("boolean") => "bool",
        _ => "String",
    }
}

/// The referenced definition name of a body parameter.
pub fn body_model(param: &Parameter) -> Option<&str> {
    param.schema.as_ref().and_then(|s| s.ref_name())
}

/// Render the operations file: one stub per operation, an extension point
/// with no logic.
pub fn emit_operations(doc: &SpecDocument, options: &GenOptions) -> Result<String, EmitError> {
    let ops = collect_operations(doc, &options.include)?;
    let mut p = Printer::new();

    ln!(p, "// Code generated by oxgen. DO NOT EDIT.");
    p.blank();
    ln!(p, "use oxgen_support::validate::Validation;");

    let models = referenced_models(&ops);
    if !models.is_empty() {
        p.blank();
        ln!(
            p,
            "use crate::",
            &options.model_module,
            "::{",
            models.into_iter().collect::<Vec<_>>().join(", "),
            "};"
        );
    }

    for bound in &ops {
        emit_stub(&mut p, bound.op);
    }

    Ok(p.finish())
}

/// Model names referenced by request bodies or schema'd 200 responses,
/// sorted for a stable import line.
fn referenced_models(ops: &[BoundOperation<'_>]) -> BTreeSet<String> {
    let mut models = BTreeSet::new();
    for bound in ops {
        if let Some(model) = bound.op.success_model() {
            models.insert(model.to_string());
        }
        for param in &bound.op.parameters {
            if param.location == ParameterLocation::Body
                && let Some(model) = body_model(param)
            {
                models.insert(model.to_string());
            }
        }
    }
    models
}

fn emit_stub(p: &mut Printer, op: &Operation) {
    let mut args = Vec::new();
    for param in op.ordered_parameters() {
        match param.location {
            ParameterLocation::Body => {
                if let Some(model) = body_model(param) {
                    args.push(format!("{}: &{}", snake(model), model));
                }
            }
            _ => {
                args.push(format!("{}: {}", snake(&param.name), param_rust_type(param)));
            }
        }
    }
    let signature = args.join(", ");

    p.blank();
    match op.success_model() {
        Some(model) => {
            ln!(
                p,
                "pub async fn ",
                snake(&op.id),
                "(",
                &signature,
                ") -> Result<",
                model,
                ", Validation> {"
            );
            ln!(p, "    Ok(", model, "::default())");
        }
        None => {
            ln!(
                p,
                "pub async fn ",
                snake(&op.id),
                "(",
                &signature,
                ") -> Result<(), Validation> {"
            );
            ln!(p, "    Ok(())");
        }
    }
    ln!(p, "}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> SpecDocument {
        oxgen_core::spec::from_yaml(yaml).unwrap()
    }

    const SPEC: &str = r##"
swagger: "2.0"
info: { title: petstore, version: "1.0" }
paths:
  /pets:
    post:
      operationId: addPet
      tags: [pets]
      parameters:
        - name: body
          in: body
          required: true
          schema: { $ref: "#/definitions/Pet" }
  /pets/pet:
    get:
      operationId: getPetById
      tags: [pets]
      parameters:
        - name: petId
          in: query
          required: true
          type: integer
          format: int64
      responses:
        "200":
          schema: { $ref: "#/definitions/Pet" }
definitions:
  Pet:
    type: object
    properties:
      name: { type: string }
"##;

    #[test]
    fn test_stub_signatures() {
        let doc = doc(SPEC);
        let out = emit_operations(&doc, &GenOptions::default()).unwrap();
        assert!(out.contains("pub async fn add_pet(pet: &Pet) -> Result<(), Validation> {"));
        assert!(out.contains("    Ok(())"));
        assert!(out.contains("pub async fn get_pet_by_id(pet_id: i64) -> Result<Pet, Validation> {"));
        assert!(out.contains("    Ok(Pet::default())"));
        assert!(out.contains("use crate::models::{Pet};"));
    }

    #[test]
    fn test_missing_tag_is_an_input_error() {
        let doc = doc(
            r#"
swagger: "2.0"
info: { title: t, version: "1" }
paths:
  /things:
    get:
      operationId: listThings
"#,
        );
        let err = emit_operations(&doc, &GenOptions::default()).unwrap_err();
        assert!(matches!(err, EmitError::MissingTag(id) if id == "listThings"));
    }

    #[test]
    fn test_operation_allow_list() {
        let doc = doc(SPEC);
        let mut options = GenOptions::default();
        options.include.operations = vec!["addPet".to_string()];
        let out = emit_operations(&doc, &options).unwrap();
        assert!(out.contains("pub async fn add_pet"));
        assert!(!out.contains("pub async fn get_pet_by_id"));
    }

    #[test]
    fn test_param_rust_type_widths() {
        let p: Parameter =
            serde_yaml_ng::from_str("name: n\nin: query\ntype: integer\nformat: int32\n").unwrap();
        assert_eq!(param_rust_type(&p), "i32");
        let p: Parameter = serde_yaml_ng::from_str("name: n\nin: query\ntype: number\n").unwrap();
        assert_eq!(param_rust_type(&p), "f64");
        let p: Parameter = serde_yaml_ng::from_str("name: n\nin: query\ntype: string\n").unwrap();
        assert_eq!(param_rust_type(&p), "String");
    }
}
