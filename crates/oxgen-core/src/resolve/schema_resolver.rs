use heck::ToSnakeCase;
use indexmap::IndexMap;
use log::debug;

use crate::error::ResolveError;
use crate::spec::{Schema, SchemaOrRef, SpecDocument};

use super::format_registry::FormatRegistry;

/// The Rust-side type a resolved field is stored as.
#[derive(Debug, Clone, PartialEq)]
pub enum HostType {
    Str,
    I32,
    I64,
    F32,
    F64,
    Bool,
    DateTime,
    /// Direct reference to another named definition.
    Model(String),
}

impl HostType {
    pub fn rust_type(&self) -> String {
        match self {
            HostType::Str => "String".to_string(),
            HostType::I32 => "i32".to_string(),
            HostType::I64 => "i64".to_string(),
            HostType::F32 => "f32".to_string(),
            HostType::F64 => "f64".to_string(),
            HostType::Bool => "bool".to_string(),
            HostType::DateTime => "DateTime<Utc>".to_string(),
            HostType::Model(name) => name.clone(),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, HostType::Str)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, HostType::I32 | HostType::I64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, HostType::F32 | HostType::F64)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, HostType::DateTime)
    }

    pub fn is_model(&self) -> bool {
        matches!(self, HostType::Model(_))
    }

    /// The `skip_serializing_if` predicate for an optional field of this
    /// type, or `None` when the field is wrapped in `Option` instead.
    pub fn zero_predicate(&self) -> Option<&'static str> {
        match self {
            HostType::Str => Some("String::is_empty"),
            HostType::I32 => Some("oxgen_support::ser::is_zero_i32"),
            HostType::I64 => Some("oxgen_support::ser::is_zero_i64"),
            HostType::F32 => Some("oxgen_support::ser::is_zero_f32"),
            HostType::F64 => Some("oxgen_support::ser::is_zero_f64"),
            HostType::Bool => Some("oxgen_support::ser::is_false"),
            HostType::DateTime | HostType::Model(_) => None,
        }
    }
}

/// A field's host type together with the spec format it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    pub host_type: HostType,
    pub source_format: Option<String>,
}

/// The aggregated per-field constraint set driving validator emission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SharedValidations {
    pub required: bool,
    pub has_validations: bool,
    pub max_length: Option<u64>,
    pub min_length: Option<u64>,
    pub pattern: Option<String>,
    pub multiple_of: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub enum_values: Vec<serde_json::Value>,
}

/// One resolved schema node: a definition root or a single property.
#[derive(Debug, Clone, PartialEq)]
pub struct GenSchema {
    pub name: String,
    pub resolved_type: ResolvedType,
    pub validations: SharedValidations,
}

/// A generation descriptor for one named definition. Built fresh per run
/// and discarded after emission.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDefinition {
    pub name: String,
    pub module: String,
    pub imports: Vec<String>,
    pub schema: GenSchema,
    pub properties: Vec<GenSchema>,
}

/// Resolve one named definition into a `GenDefinition`.
///
/// Deterministic: identical (schema, definitions, registry) input yields a
/// structurally identical tree. Any unresolved reference or unsupported
/// property shape aborts the run — no partial output.
pub fn resolve_definition(
    name: &str,
    schema: &Schema,
    definitions: &IndexMap<String, Schema>,
    registry: &FormatRegistry,
    module: &str,
) -> Result<GenDefinition, ResolveError> {
    match schema.schema_type.as_deref() {
        None | Some("object") => {}
        Some(other) => {
            return Err(ResolveError::UnsupportedShape {
                name: name.to_string(),
                detail: format!("model definitions must be objects, found type {other:?}"),
            });
        }
    }

    let mut properties = Vec::with_capacity(schema.properties.len());
    for (prop_name, prop) in &schema.properties {
        properties.push(resolve_property(
            prop_name,
            prop,
            &schema.required,
            definitions,
            registry,
        )?);
    }

    let root = GenSchema {
        name: name.to_string(),
        resolved_type: ResolvedType {
            host_type: HostType::Model(name.to_string()),
            source_format: None,
        },
        validations: SharedValidations {
            has_validations: properties.iter().any(|p| p.validations.has_validations),
            ..SharedValidations::default()
        },
    };

    debug!(
        "resolved definition {name}: {} properties, validations: {}",
        properties.len(),
        root.validations.has_validations
    );

    Ok(GenDefinition {
        name: name.to_string(),
        module: module.to_string(),
        imports: default_imports(&properties),
        schema: root,
        properties,
    })
}

/// Resolve every definition in the document, in declaration order.
/// An empty `models_filter` admits all definitions.
pub fn resolve_definitions(
    doc: &SpecDocument,
    registry: &FormatRegistry,
    module: &str,
    models_filter: &[String],
) -> Result<Vec<GenDefinition>, ResolveError> {
    let mut defs = Vec::new();
    for (name, schema) in &doc.definitions {
        if !models_filter.is_empty() && !models_filter.iter().any(|m| m == name) {
            continue;
        }
        defs.push(resolve_definition(
            name,
            schema,
            &doc.definitions,
            registry,
            module,
        )?);
    }
    Ok(defs)
}

fn resolve_property(
    name: &str,
    prop: &SchemaOrRef,
    required: &[String],
    definitions: &IndexMap<String, Schema>,
    registry: &FormatRegistry,
) -> Result<GenSchema, ResolveError> {
    let is_required = required.iter().any(|r| r == name);

    match prop {
        SchemaOrRef::Ref { ref_path } => {
            let target = prop.ref_name().unwrap_or(ref_path.as_str());
            if !definitions.contains_key(target) {
                return Err(ResolveError::UnresolvedRef(ref_path.clone()));
            }
            Ok(GenSchema {
                name: name.to_string(),
                resolved_type: ResolvedType {
                    host_type: HostType::Model(target.to_string()),
                    source_format: None,
                },
                validations: SharedValidations {
                    required: is_required,
                    ..SharedValidations::default()
                },
            })
        }
        SchemaOrRef::Schema(schema) => {
            let host_type = host_type_for(name, schema)?;
            // An extended format keeps the primitive host type; the
            // registry only decides whether a predicate check is emitted.
            let extended = host_type.is_string()
                && schema
                    .format
                    .as_deref()
                    .is_some_and(|f| registry.contains(f));

            Ok(GenSchema {
                name: name.to_string(),
                resolved_type: ResolvedType {
                    host_type,
                    source_format: schema.format.clone(),
                },
                validations: SharedValidations {
                    required: is_required,
                    has_validations: schema.has_constraints() || extended,
                    max_length: schema.max_length,
                    min_length: schema.min_length,
                    pattern: schema.pattern.clone(),
                    multiple_of: schema.multiple_of,
                    minimum: schema.minimum,
                    maximum: schema.maximum,
                    exclusive_minimum: schema.exclusive_minimum,
                    exclusive_maximum: schema.exclusive_maximum,
                    enum_values: schema.enum_values.clone(),
                },
            })
        }
    }
}

fn host_type_for(name: &str, schema: &Schema) -> Result<HostType, ResolveError> {
    match schema.schema_type.as_deref() {
        Some("string") => match schema.format.as_deref() {
            // Temporal formats pick the host type before the registry is
            // consulted; anything else stays textual.
            Some("date-time") | Some("date") => Ok(HostType::DateTime),
            _ => Ok(HostType::Str),
        },
        Some("integer") => match schema.format.as_deref() {
            Some("int32") => Ok(HostType::I32),
            _ => Ok(HostType::I64),
        },
        Some("number") => match schema.format.as_deref() {
            Some("float") => Ok(HostType::F32),
            _ => Ok(HostType::F64),
        },
        Some("boolean") => Ok(HostType::Bool),
        other => Err(ResolveError::UnsupportedShape {
            name: name.to_string(),
            detail: format!("expected a primitive type or a direct reference, found {other:?}"),
        }),
    }
}

/// The import lines every emitted model file for these properties needs.
fn default_imports(properties: &[GenSchema]) -> Vec<String> {
    let mut imports = Vec::new();

    if properties
        .iter()
        .any(|p| !p.validations.enum_values.is_empty())
    {
        imports.push("use std::sync::OnceLock;".to_string());
    }
    if properties
        .iter()
        .any(|p| p.resolved_type.host_type.is_temporal())
    {
        imports.push("use chrono::{DateTime, Utc};".to_string());
    }
    imports.push("use serde::{Deserialize, Serialize};".to_string());
    if properties.iter().any(|p| p.validations.has_validations) {
        imports.push("use oxgen_support::validate::{self, Validation};".to_string());
    }
    for prop in properties {
        if let HostType::Model(target) = &prop.resolved_type.host_type {
            let line = format!("use super::{}::{};", target.to_snake_case(), target);
            if !imports.contains(&line) {
                imports.push(line);
            }
        }
    }

    imports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(yaml: &str) -> Schema {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_host_type_mapping() {
        let defs = IndexMap::new();
        let registry = FormatRegistry::with_defaults();
        let s = schema(
            r#"
type: object
properties:
  id: { type: integer, format: int64 }
  score: { type: number, format: float }
  tag: { type: string }
  active: { type: boolean }
"#,
        );
        let def = resolve_definition("Thing", &s, &defs, &registry, "models").unwrap();
        let types: Vec<String> = def
            .properties
            .iter()
            .map(|p| p.resolved_type.host_type.rust_type())
            .collect();
        assert_eq!(types, vec!["i64", "f32", "String", "bool"]);
    }

    #[test]
    fn test_unknown_format_is_inert() {
        let defs = IndexMap::new();
        let registry = FormatRegistry::with_defaults();
        let s = schema(
            r#"
type: object
properties:
  blob: { type: string, format: no-such-format }
"#,
        );
        let def = resolve_definition("Thing", &s, &defs, &registry, "models").unwrap();
        let prop = &def.properties[0];
        assert_eq!(prop.resolved_type.host_type, HostType::Str);
        assert_eq!(prop.resolved_type.source_format.as_deref(), Some("no-such-format"));
        assert!(!prop.validations.has_validations);
    }

    #[test]
    fn test_registered_format_forces_validations() {
        let defs = IndexMap::new();
        let registry = FormatRegistry::with_defaults();
        let s = schema(
            r#"
type: object
properties:
  contact: { type: string, format: email }
"#,
        );
        let def = resolve_definition("Thing", &s, &defs, &registry, "models").unwrap();
        let prop = &def.properties[0];
        assert_eq!(prop.resolved_type.host_type, HostType::Str);
        assert!(prop.validations.has_validations);
    }

    #[test]
    fn test_array_property_is_unsupported() {
        let defs = IndexMap::new();
        let registry = FormatRegistry::with_defaults();
        let s = schema(
            r#"
type: object
properties:
  tags: { type: array }
"#,
        );
        let err = resolve_definition("Thing", &s, &defs, &registry, "models").unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedShape { .. }));
    }
}
