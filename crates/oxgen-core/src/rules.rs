//! Compiles one resolved field into its ordered validation chain.
//!
//! The chain order is the single source of truth for every emitter:
//! multipleOf → minimum → maximum → maxLength → minLength → pattern →
//! enum → extended-format. Cheapest checks run first; the extended-format
//! predicate, the only delegated check, runs last.

use crate::resolve::{FormatRegistry, GenSchema};

/// One step of a field's validation chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    MultipleOf(f64),
    Minimum { limit: f64, exclusive: bool },
    Maximum { limit: f64, exclusive: bool },
    MaxLength(u64),
    MinLength(u64),
    Pattern(String),
    /// Literal candidates exactly as declared in the spec; decoded by the
    /// generated code once, by host type.
    Enum(Vec<serde_json::Value>),
    /// Delegated predicate named by the format registry.
    Format { name: String, predicate_path: String },
}

/// Compile the ordered validation chain for one field.
///
/// The empty-skip guard for optional fields is not a rule: the model
/// emitter places it ahead of the chain, so a chain is always compiled as
/// if the value were present.
pub fn compile_rules(schema: &GenSchema, registry: &FormatRegistry) -> Vec<ValidationRule> {
    let v = &schema.validations;
    let mut rules = Vec::new();

    if let Some(factor) = v.multiple_of {
        rules.push(ValidationRule::MultipleOf(factor));
    }
    if let Some(limit) = v.minimum {
        rules.push(ValidationRule::Minimum {
            limit,
            exclusive: v.exclusive_minimum,
        });
    }
    if let Some(limit) = v.maximum {
        rules.push(ValidationRule::Maximum {
            limit,
            exclusive: v.exclusive_maximum,
        });
    }
    if let Some(max) = v.max_length {
        rules.push(ValidationRule::MaxLength(max));
    }
    if let Some(min) = v.min_length {
        rules.push(ValidationRule::MinLength(min));
    }
    if let Some(ref pattern) = v.pattern {
        rules.push(ValidationRule::Pattern(pattern.clone()));
    }
    if !v.enum_values.is_empty() {
        rules.push(ValidationRule::Enum(v.enum_values.clone()));
    }
    if schema.resolved_type.host_type.is_string()
        && let Some(format) = schema.resolved_type.source_format.as_deref()
        && let Some(predicate_path) = registry.validator_path(format)
    {
        rules.push(ValidationRule::Format {
            name: format.to_string(),
            predicate_path: predicate_path.to_string(),
        });
    }

    rules
}
