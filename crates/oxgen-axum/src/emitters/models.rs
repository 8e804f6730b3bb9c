//! Emits one model file per resolved definition: the serde record, a
//! fail-fast `validate()` entry point, and one validator per constrained
//! field embedding its compiled rule chain.

use oxgen_core::resolve::{FormatRegistry, GenDefinition, GenSchema, HostType};
use oxgen_core::rules::{ValidationRule, compile_rules};

use crate::naming::{caps, shouty_snake, snake};
use crate::printer::{Printer, ln};

/// Render the model file for one definition.
pub fn emit_model(def: &GenDefinition, registry: &FormatRegistry) -> String {
    let mut p = Printer::new();
    let model = caps(&def.name);

    ln!(p, "// Code generated by oxgen. DO NOT EDIT.");
    p.blank();
    for import in &def.imports {
        ln!(p, import);
    }
    p.blank();

    emit_struct(&mut p, def, &model);
    emit_enum_caches(&mut p, def, &model);

    ln!(p, "impl ", &model, " {");
    emit_validate_entry(&mut p, def);

    let validated: Vec<&GenSchema> = def
        .properties
        .iter()
        .filter(|prop| prop.validations.has_validations)
        .collect();
    for prop in validated {
        let rules = compile_rules(prop, registry);
        emit_enum_helper(&mut p, &model, prop);
        emit_prop_validator(&mut p, prop, &rules);
    }
    ln!(p, "}");

    p.finish()
}

fn emit_struct(p: &mut Printer, def: &GenDefinition, model: &str) {
    ln!(p, "#[derive(Debug, Clone, Default, Serialize, Deserialize)]");
    ln!(p, "pub struct ", model, " {");
    for prop in &def.properties {
        let field = snake(&prop.name);
        let host = &prop.resolved_type.host_type;
        if prop.validations.required {
            // No default: absence is a decode error.
            ln!(p, "    #[serde(rename = \"", &prop.name, "\")]");
            ln!(p, "    pub ", &field, ": ", host.rust_type(), ",");
        } else if let Some(predicate) = host.zero_predicate() {
            ln!(
                p,
                "    #[serde(rename = \"",
                &prop.name,
                "\", default, skip_serializing_if = \"",
                predicate,
                "\")]"
            );
            ln!(p, "    pub ", &field, ": ", host.rust_type(), ",");
        } else {
            // No meaningful zero value; absence is modelled as None.
            ln!(
                p,
                "    #[serde(rename = \"",
                &prop.name,
                "\", default, skip_serializing_if = \"Option::is_none\")]"
            );
            ln!(p, "    pub ", &field, ": Option<", host.rust_type(), ">,");
        }
    }
    ln!(p, "}");
    p.blank();
}

fn emit_enum_caches(p: &mut Printer, def: &GenDefinition, model: &str) {
    for prop in &def.properties {
        if prop.validations.enum_values.is_empty() {
            continue;
        }
        ln!(
            p,
            "static ",
            cache_name(model, &prop.name),
            ": OnceLock<Vec<",
            prop.resolved_type.host_type.rust_type(),
            ">> = OnceLock::new();"
        );
        p.blank();
    }
}

fn emit_validate_entry(p: &mut Printer, def: &GenDefinition) {
    ln!(p, "    /// Runs the field validators in declared order, returning");
    ln!(p, "    /// the first failure.");
    ln!(p, "    pub fn validate(&self) -> Result<(), Validation> {");
    for prop in &def.properties {
        if prop.validations.has_validations {
            ln!(p, "        self.validate_", snake(&prop.name), "()?;");
        }
    }
    ln!(p, "        Ok(())");
    ln!(p, "    }");
}

/// The lazily-populated candidate set for an enum field, decoded from the
/// spec literal list exactly once.
fn emit_enum_helper(p: &mut Printer, model: &str, prop: &GenSchema) {
    if prop.validations.enum_values.is_empty() {
        return;
    }
    let field = snake(&prop.name);
    let host = &prop.resolved_type.host_type;
    let literal = serde_json::to_string(&prop.validations.enum_values)
        .expect("spec enum literals re-encode");
    let value_param = if host.is_string() {
        "value: &String".to_string()
    } else {
        format!("value: {}", host.rust_type())
    };
    let value_arg = if host.is_string() { "value" } else { "&value" };

    p.blank();
    ln!(
        p,
        "    fn validate_",
        &field,
        "_enum(&self, path: &str, location: &str, ",
        value_param,
        ") -> Result<(), Validation> {"
    );
    ln!(
        p,
        "        let allowed = ",
        cache_name(model, &prop.name),
        ".get_or_init(|| {"
    );
    ln!(
        p,
        "            serde_json::from_str(r#\"",
        literal,
        "\"#).expect(\"spec enum literals decode\")"
    );
    ln!(p, "        });");
    ln!(
        p,
        "        validate::enumerated(path, location, ",
        value_arg,
        ", allowed)"
    );
    ln!(p, "    }");
}

fn emit_prop_validator(p: &mut Printer, prop: &GenSchema, rules: &[ValidationRule]) {
    let field = snake(&prop.name);

    p.blank();
    ln!(p, "    fn validate_", &field, "(&self) -> Result<(), Validation> {");

    emit_empty_skip_guard(p, prop);

    for rule in rules {
        emit_rule(p, prop, rule);
    }
    ln!(p, "        Ok(())");
    ln!(p, "    }");
}

/// Optional fields holding their zero value skip the whole chain.
fn emit_empty_skip_guard(p: &mut Printer, prop: &GenSchema) {
    if prop.validations.required {
        return;
    }
    let field = snake(&prop.name);
    let guard = match &prop.resolved_type.host_type {
        HostType::Str => Some(format!("self.{field}.is_empty()")),
        HostType::I32 | HostType::I64 => Some(format!("self.{field} == 0")),
        HostType::F32 | HostType::F64 => Some(format!("self.{field} == 0.0")),
        _ => None,
    };
    if let Some(guard) = guard {
        ln!(p, "        if ", guard, " {");
        ln!(p, "            return Ok(());");
        ln!(p, "        }");
    }
}

fn emit_rule(p: &mut Printer, prop: &GenSchema, rule: &ValidationRule) {
    let field = snake(&prop.name);
    let host = &prop.resolved_type.host_type;
    let as_f64 = if matches!(host, HostType::F64) {
        format!("self.{field}")
    } else {
        format!("self.{field} as f64")
    };

    match rule {
        ValidationRule::MultipleOf(factor) => {
            ln!(
                p,
                "        validate::multiple_of(\"",
                &prop.name,
                "\", \"body\", ",
                &as_f64,
                ", ",
                *factor,
                ")?;"
            );
        }
        ValidationRule::Minimum { limit, exclusive } => {
            ln!(
                p,
                "        validate::minimum(\"",
                &prop.name,
                "\", \"body\", ",
                &as_f64,
                ", ",
                *limit,
                ", ",
                *exclusive,
                ")?;"
            );
        }
        ValidationRule::Maximum { limit, exclusive } => {
            ln!(
                p,
                "        validate::maximum(\"",
                &prop.name,
                "\", \"body\", ",
                &as_f64,
                ", ",
                *limit,
                ", ",
                *exclusive,
                ")?;"
            );
        }
        ValidationRule::MaxLength(max) => {
            ln!(
                p,
                "        validate::max_length(\"",
                &prop.name,
                "\", \"body\", &self.",
                &field,
                ", ",
                *max,
                ")?;"
            );
        }
        ValidationRule::MinLength(min) => {
            ln!(
                p,
                "        validate::min_length(\"",
                &prop.name,
                "\", \"body\", &self.",
                &field,
                ", ",
                *min,
                ")?;"
            );
        }
        ValidationRule::Pattern(pattern) => {
            ln!(
                p,
                "        validate::pattern(\"",
                &prop.name,
                "\", \"body\", &self.",
                &field,
                ", r#\"",
                pattern,
                "\"#)?;"
            );
        }
        ValidationRule::Enum(_) => {
            let value_arg = if host.is_string() {
                format!("&self.{field}")
            } else {
                format!("self.{field}")
            };
            ln!(
                p,
                "        self.validate_",
                &field,
                "_enum(\"",
                &prop.name,
                "\", \"body\", ",
                value_arg,
                ")?;"
            );
        }
        ValidationRule::Format {
            name,
            predicate_path,
        } => {
            ln!(p, "        if !", predicate_path, "(&self.", &field, ") {");
            ln!(
                p,
                "            return Err(Validation::invalid_type(\"",
                &prop.name,
                "\", \"body\", \"",
                name,
                "\", &self.",
                &field,
                "));"
            );
            ln!(p, "        }");
        }
    }
}

fn cache_name(model: &str, prop_name: &str) -> String {
    format!("{}_{}_ENUM", shouty_snake(model), shouty_snake(prop_name))
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use oxgen_core::resolve::resolve_definition;
    use oxgen_core::spec::Schema;

    use super::*;

    fn order_definition() -> (Schema, FormatRegistry) {
        let schema: Schema = serde_yaml_ng::from_str(
            r#"
type: object
required: [id]
properties:
  id: { type: integer, format: int64 }
  contact: { type: string, format: email }
  quantity:
    type: integer
    format: int32
    multipleOf: 2
    minimum: 1
    maximum: 10
    enum: [1, 2, 3]
  status:
    type: string
    enum: [suspend, shipment, received]
  shipDate: { type: string, format: date-time }
"#,
        )
        .unwrap();
        (schema, FormatRegistry::with_defaults())
    }

    fn emit_order() -> String {
        let (schema, registry) = order_definition();
        let def =
            resolve_definition("Order", &schema, &IndexMap::new(), &registry, "models").unwrap();
        emit_model(&def, &registry)
    }

    #[test]
    fn test_struct_fields_and_serde_attrs() {
        let out = emit_order();
        assert!(out.contains("pub struct Order {"));
        assert!(out.contains("#[serde(rename = \"id\")]\n    pub id: i64,"));
        assert!(out.contains(
            "#[serde(rename = \"contact\", default, skip_serializing_if = \"String::is_empty\")]"
        ));
        assert!(out.contains(
            "#[serde(rename = \"shipDate\", default, skip_serializing_if = \"Option::is_none\")]"
        ));
        assert!(out.contains("pub ship_date: Option<DateTime<Utc>>,"));
    }

    #[test]
    fn test_validate_entry_is_fail_fast_and_ordered() {
        let out = emit_order();
        let entry = out
            .find("pub fn validate(&self)")
            .expect("validate entry point");
        let contact = out.find("self.validate_contact()?;").unwrap();
        let quantity = out.find("self.validate_quantity()?;").unwrap();
        let status = out.find("self.validate_status()?;").unwrap();
        assert!(entry < contact && contact < quantity && quantity < status);
        // id has no constraints, so no validator is invoked for it
        assert!(!out.contains("self.validate_id()?;"));
    }

    #[test]
    fn test_chain_order_inside_validator() {
        let out = emit_order();
        let multiple = out.find("validate::multiple_of(\"quantity\"").unwrap();
        let min = out.find("validate::minimum(\"quantity\"").unwrap();
        let max = out.find("validate::maximum(\"quantity\"").unwrap();
        let enum_call = out.find("self.validate_quantity_enum(\"quantity\"").unwrap();
        assert!(multiple < min && min < max && max < enum_call);
        assert!(out.contains("validate::minimum(\"quantity\", \"body\", self.quantity as f64, 1.0, false)?;"));
    }

    #[test]
    fn test_optional_empty_skip_guard() {
        let out = emit_order();
        assert!(out.contains("if self.quantity == 0 {\n            return Ok(());"));
        assert!(out.contains("if self.contact.is_empty() {\n            return Ok(());"));
        // The guard precedes the whole chain.
        let guard = out.find("if self.quantity == 0 {").unwrap();
        let first_rule = out.find("validate::multiple_of(\"quantity\"").unwrap();
        assert!(guard < first_rule);
        // required field gets no guard
        assert!(!out.contains("if self.id == 0 {"));
    }

    #[test]
    fn test_enum_cache_is_memoized_per_field() {
        let out = emit_order();
        assert!(out.contains("static ORDER_QUANTITY_ENUM: OnceLock<Vec<i32>> = OnceLock::new();"));
        assert!(out.contains("static ORDER_STATUS_ENUM: OnceLock<Vec<String>> = OnceLock::new();"));
        assert!(out.contains("ORDER_QUANTITY_ENUM.get_or_init(|| {"));
        assert!(out.contains("serde_json::from_str(r#\"[1,2,3]\"#)"));
        assert!(out.contains("serde_json::from_str(r#\"[\"suspend\",\"shipment\",\"received\"]\"#)"));
    }

    #[test]
    fn test_extended_format_check() {
        let out = emit_order();
        assert!(out.contains("if !oxgen_support::format::is_email(&self.contact) {"));
        assert!(out.contains(
            "Validation::invalid_type(\"contact\", \"body\", \"email\", &self.contact)"
        ));
    }

    #[test]
    fn test_emission_is_idempotent() {
        assert_eq!(emit_order(), emit_order());
    }
}
