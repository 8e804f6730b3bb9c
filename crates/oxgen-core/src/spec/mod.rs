pub mod document;
pub mod schema;

pub use document::{HttpMethod, Info, Operation, Parameter, ParameterLocation, PathItem, Response, SpecDocument};
pub use schema::{Schema, SchemaOrRef};

use crate::error::ParseError;

/// Parse a spec document from YAML.
pub fn from_yaml(input: &str) -> Result<SpecDocument, ParseError> {
    let doc: SpecDocument = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a spec document from JSON.
pub fn from_json(input: &str) -> Result<SpecDocument, ParseError> {
    let doc: SpecDocument = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

fn validate_version(doc: &SpecDocument) -> Result<(), ParseError> {
    if !doc.swagger.starts_with("2.") {
        return Err(ParseError::UnsupportedVersion(doc.swagger.clone()));
    }
    Ok(())
}
