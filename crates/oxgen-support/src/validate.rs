//! Field validation primitives invoked by generated validator chains.
//!
//! Every failure is a structured [`Validation`] carrying the field name,
//! its location, the offending value, and — for enum and range checks —
//! the allowed set or bound, so callers can machine-consume it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// A failed precondition on one field of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{message}")]
pub struct Validation {
    pub code: u16,
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub value: Value,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

impl Validation {
    fn new(name: &str, location: &str, value: Value, message: String) -> Self {
        Validation {
            code: StatusCode::BAD_REQUEST.as_u16(),
            name: name.to_string(),
            location: location.to_string(),
            value,
            message,
            values: Vec::new(),
        }
    }

    /// A required field is absent or empty.
    pub fn required(name: &str, location: &str) -> Self {
        Self::new(
            name,
            location,
            Value::Null,
            format!("{name} in {location} is required"),
        )
    }

    /// A field's textual value failed to parse as its declared type.
    pub fn invalid(name: &str, location: &str, value: &str) -> Self {
        Self::new(
            name,
            location,
            json!(value),
            format!("{name} in {location} is invalid: {value}"),
        )
    }

    /// A value does not satisfy its declared extended format.
    pub fn invalid_type(name: &str, location: &str, type_name: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        Self::new(
            name,
            location,
            value.clone(),
            format!("{name} in {location} must be of type {type_name}: {value}"),
        )
    }

    /// An unsupported request content type.
    pub fn invalid_content_type(value: &str, allowed: &[&str]) -> Self {
        let mut v = Self::new(
            "Content-Type",
            "header",
            json!(value),
            format!("unsupported media type {value:?}, only {allowed:?} are allowed"),
        );
        v.code = StatusCode::UNSUPPORTED_MEDIA_TYPE.as_u16();
        v.values = allowed.iter().map(|a| json!(a)).collect();
        v
    }

    /// An unacceptable response format request.
    pub fn invalid_response_format(value: &str, allowed: &[&str]) -> Self {
        let mut v = Self::new(
            "Accept",
            "header",
            json!(value),
            format!("unsupported media type requested, only {allowed:?} are available"),
        );
        v.code = StatusCode::NOT_ACCEPTABLE.as_u16();
        v.values = allowed.iter().map(|a| json!(a)).collect();
        v
    }
}

impl IntoResponse for Validation {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(self)).into_response()
    }
}

/// value must be a multiple of factor.
pub fn multiple_of(path: &str, location: &str, value: f64, factor: f64) -> Result<(), Validation> {
    if value % factor != 0.0 {
        let mut v = Validation::new(
            path,
            location,
            json!(value),
            format!("{path} in {location} should be a multiple of {factor}"),
        );
        v.values = vec![json!(factor)];
        return Err(v);
    }
    Ok(())
}

/// An exclusive bound at `limit` fails when value == limit; an inclusive
/// bound fails only when value is below it.
pub fn minimum(
    path: &str,
    location: &str,
    value: f64,
    limit: f64,
    exclusive: bool,
) -> Result<(), Validation> {
    if value < limit || (exclusive && value == limit) {
        let relation = if exclusive { ">" } else { ">=" };
        let mut v = Validation::new(
            path,
            location,
            json!(value),
            format!("{path} in {location} should be {relation} {limit}"),
        );
        v.values = vec![json!(limit)];
        return Err(v);
    }
    Ok(())
}

/// Mirror of [`minimum`] for upper bounds.
pub fn maximum(
    path: &str,
    location: &str,
    value: f64,
    limit: f64,
    exclusive: bool,
) -> Result<(), Validation> {
    if value > limit || (exclusive && value == limit) {
        let relation = if exclusive { "<" } else { "<=" };
        let mut v = Validation::new(
            path,
            location,
            json!(value),
            format!("{path} in {location} should be {relation} {limit}"),
        );
        v.values = vec![json!(limit)];
        return Err(v);
    }
    Ok(())
}

pub fn max_length(path: &str, location: &str, value: &str, max: u64) -> Result<(), Validation> {
    if value.chars().count() as u64 > max {
        let mut v = Validation::new(
            path,
            location,
            json!(value),
            format!("{path} in {location} should be at most {max} chars long"),
        );
        v.values = vec![json!(max)];
        return Err(v);
    }
    Ok(())
}

pub fn min_length(path: &str, location: &str, value: &str, min: u64) -> Result<(), Validation> {
    if (value.chars().count() as u64) < min {
        let mut v = Validation::new(
            path,
            location,
            json!(value),
            format!("{path} in {location} should be at least {min} chars long"),
        );
        v.values = vec![json!(min)];
        return Err(v);
    }
    Ok(())
}

/// Regular-expression match, the pattern applied exactly as supplied.
pub fn pattern(path: &str, location: &str, value: &str, pattern: &str) -> Result<(), Validation> {
    let re = regex::Regex::new(pattern).map_err(|_| {
        Validation::new(
            path,
            location,
            json!(value),
            format!("{path} in {location} has an invalid pattern {pattern:?}"),
        )
    })?;
    if !re.is_match(value) {
        return Err(Validation::new(
            path,
            location,
            json!(value),
            format!("{path} in {location} should match {pattern:?}"),
        ));
    }
    Ok(())
}

/// Membership in the decoded candidate set: exact equality against one of
/// the allowed values, compared by native type.
pub fn enumerated<T: PartialEq + Serialize>(
    path: &str,
    location: &str,
    value: &T,
    allowed: &[T],
) -> Result<(), Validation> {
    if !allowed.iter().any(|a| a == value) {
        let mut v = Validation::new(
            path,
            location,
            serde_json::to_value(value).unwrap_or(Value::Null),
            format!("{path} in {location} should be one of the allowed values"),
        );
        v.values = allowed
            .iter()
            .map(|a| serde_json::to_value(a).unwrap_or(Value::Null))
            .collect();
        return Err(v);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_of() {
        assert!(multiple_of("quantity", "body", 4.0, 2.0).is_ok());
        assert!(multiple_of("quantity", "body", 3.0, 2.0).is_err());
        assert!(multiple_of("quantity", "body", 0.0, 2.0).is_ok());
    }

    #[test]
    fn test_exclusive_minimum_rejects_the_bound() {
        assert!(minimum("quantity", "body", 1.0, 1.0, true).is_err());
        assert!(minimum("quantity", "body", 1.01, 1.0, true).is_ok());
        assert!(minimum("quantity", "body", 1.0, 1.0, false).is_ok());
        assert!(minimum("quantity", "body", 0.9, 1.0, false).is_err());
    }

    #[test]
    fn test_exclusive_maximum_rejects_the_bound() {
        assert!(maximum("quantity", "body", 10.0, 10.0, true).is_err());
        assert!(maximum("quantity", "body", 10.0, 10.0, false).is_ok());
        assert!(maximum("quantity", "body", 10.1, 10.0, false).is_err());
    }

    #[test]
    fn test_enum_multiple_of_interaction() {
        // enum {1,2,3}, multipleOf 2, minimum 1 inclusive, maximum 10
        // inclusive: 2 passes the whole chain, 1 and 3 fail at multipleOf.
        let allowed = vec![1i32, 2, 3];
        let chain = |value: i32| -> Result<(), Validation> {
            multiple_of("quantity", "body", f64::from(value), 2.0)?;
            minimum("quantity", "body", f64::from(value), 1.0, false)?;
            maximum("quantity", "body", f64::from(value), 10.0, false)?;
            enumerated("quantity", "body", &value, &allowed)?;
            Ok(())
        };

        assert!(chain(2).is_ok());
        assert!(chain(1).is_err());
        assert!(chain(3).is_err());
    }

    #[test]
    fn test_enum_compares_by_native_type() {
        let allowed = vec!["suspend".to_string(), "shipment".to_string()];
        assert!(enumerated("status", "body", &"shipment".to_string(), &allowed).is_ok());
        let err = enumerated("status", "body", &"done".to_string(), &allowed).unwrap_err();
        assert_eq!(err.values.len(), 2);
        assert_eq!(err.name, "status");
        assert_eq!(err.location, "body");
    }

    #[test]
    fn test_lengths_count_chars() {
        assert!(max_length("name", "body", "héllo", 5).is_ok());
        assert!(max_length("name", "body", "hello!", 5).is_err());
        assert!(min_length("name", "body", "", 1).is_err());
    }

    #[test]
    fn test_pattern() {
        assert!(pattern("sku", "body", "ab-12", r"^[a-z]+-\d+$").is_ok());
        assert!(pattern("sku", "body", "AB-12", r"^[a-z]+-\d+$").is_err());
    }

    #[test]
    fn test_range_errors_carry_bounds() {
        let err = minimum("petId", "body", 3.0, 10.0, false).unwrap_err();
        assert_eq!(err.values, vec![json!(10.0)]);
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_validation_serializes_location_as_in() {
        let err = Validation::required("petId", "query");
        let encoded = serde_json::to_value(&err).unwrap();
        assert_eq!(encoded["in"], json!("query"));
        assert_eq!(encoded["name"], json!("petId"));
    }
}
