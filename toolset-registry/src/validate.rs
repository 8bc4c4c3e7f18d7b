//! Input validation against built schemas.
//!
//! Validation is the caller-facing contract: a failed check is a normal,
//! expected outcome of invocation and never crashes the process. Every
//! violated field is reported, one violation per field.

use std::fmt::{self, Display, Formatter};

use serde_json::{Map, Value};
use toolset_primitives::TypeKind;

use crate::schema::{FieldSchema, ValidationSchema};

/// Violation name used when the payload itself (not a field) is rejected.
const PAYLOAD: &str = "$";

/// A single violated field with its reason.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldViolation {
    /// The violated field name, or `$` for payload-level violations.
    pub field: String,
    /// Human-readable reason for rejection.
    pub reason: String,
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Input failed schema validation; carries one message per violated field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Creates an error from collected violations.
    #[must_use]
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Returns every violation, in schema order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns `true` when the named field is among the violations.
    #[must_use]
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "input validation failed: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ValidationSchema {
    /// Validates a raw input value, returning the normalized input map.
    ///
    /// Integer fields accept native integers and string-encoded integers;
    /// the returned map carries the parsed integer so equality downstream is
    /// defined on the parsed value, not the textual representation. Keys not
    /// declared by the schema pass through untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] enumerating every violated field. A
    /// non-object payload yields a single payload-level violation.
    pub fn validate(&self, input: &Value) -> Result<Map<String, Value>, ValidationError> {
        let Value::Object(map) = input else {
            return Err(ValidationError::new(vec![FieldViolation {
                field: PAYLOAD.to_string(),
                reason: "input must be a JSON object".to_string(),
            }]));
        };

        let mut normalized = map.clone();
        let mut violations = Vec::new();

        for field in self.fields() {
            match map.get(field.name()) {
                None => {
                    if !field.is_optional() {
                        violations.push(FieldViolation {
                            field: field.name().to_string(),
                            reason: "missing required field".to_string(),
                        });
                    }
                }
                Some(value) => match check_value(field, value) {
                    Ok(Some(replacement)) => {
                        normalized.insert(field.name().to_string(), replacement);
                    }
                    Ok(None) => {}
                    Err(reason) => violations.push(FieldViolation {
                        field: field.name().to_string(),
                        reason,
                    }),
                },
            }
        }

        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

/// Checks one value against its field constraint. Returns a replacement
/// value when normalization changed the representation.
fn check_value(field: &FieldSchema, value: &Value) -> Result<Option<Value>, String> {
    match field.kind() {
        TypeKind::String => {
            if value.is_string() {
                Ok(None)
            } else {
                Err(format!("expected a string, got {}", kind_of(value)))
            }
        }
        TypeKind::Boolean => {
            if value.is_boolean() {
                Ok(None)
            } else {
                Err(format!("expected a boolean, got {}", kind_of(value)))
            }
        }
        TypeKind::Json => Ok(None),
        TypeKind::Integer => normalize_integer(value),
        TypeKind::Enum => match value.as_str() {
            Some(text) if field.enum_values().iter().any(|v| v == text) => Ok(None),
            Some(text) => Err(format!(
                "value `{text}` is not one of [{}]",
                field.enum_values().join(", ")
            )),
            None => Err(format!("expected an enum string, got {}", kind_of(value))),
        },
    }
}

/// Integer semantics: native integers pass; numeric-looking strings parse to
/// an integer and are normalized; everything else (floats included) fails.
fn normalize_integer(value: &Value) -> Result<Option<Value>, String> {
    match value {
        Value::Number(number) => {
            if number.as_i64().is_some() {
                Ok(None)
            } else {
                Err(format!("expected an integer, got `{number}`"))
            }
        }
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(|parsed| Some(Value::from(parsed)))
            .map_err(|_| format!("expected an integer, got `{text}`")),
        other => Err(format!("expected an integer, got {}", kind_of(other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolset_primitives::FieldDescriptor;

    fn schema(descriptors: Vec<FieldDescriptor>) -> ValidationSchema {
        ValidationSchema::from_descriptors(&descriptors)
    }

    fn integer(name: &str) -> FieldDescriptor {
        FieldDescriptor::new(name, TypeKind::Integer, "A number").unwrap()
    }

    #[test]
    fn accepts_matching_required_fields() {
        let schema = schema(vec![
            FieldDescriptor::new("city", TypeKind::String, "City").unwrap(),
            integer("days"),
        ]);
        let normalized = schema
            .validate(&json!({"city": "Lisbon", "days": 3}))
            .expect("valid input");
        assert_eq!(normalized["days"], json!(3));
    }

    #[test]
    fn missing_required_field_is_named() {
        let schema = schema(vec![integer("number")]);
        let err = schema.validate(&json!({})).expect_err("missing field");
        assert!(err.names_field("number"));
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn every_violated_field_is_reported() {
        let schema = schema(vec![
            FieldDescriptor::new("city", TypeKind::String, "City").unwrap(),
            integer("days"),
            FieldDescriptor::new("dry_run", TypeKind::Boolean, "Dry run").unwrap(),
        ]);
        let err = schema
            .validate(&json!({"city": 7, "dry_run": "yes"}))
            .expect_err("multiple violations");
        assert!(err.names_field("city"));
        assert!(err.names_field("days"));
        assert!(err.names_field("dry_run"));
        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn integer_normalizes_string_encoding() {
        let schema = schema(vec![integer("number")]);

        let normalized = schema.validate(&json!({"number": "2"})).expect("string int");
        assert_eq!(normalized["number"], json!(2));

        let normalized = schema.validate(&json!({"number": 2})).expect("native int");
        assert_eq!(normalized["number"], json!(2));

        assert!(schema.validate(&json!({"number": "2.5"})).is_err());
        assert!(schema.validate(&json!({"number": 2.5})).is_err());
        assert!(schema.validate(&json!({"number": true})).is_err());
    }

    #[test]
    fn enum_membership_is_case_sensitive() {
        let schema = schema(vec![
            FieldDescriptor::enumeration("send_updates", "Policy", ["all", "none"]).unwrap(),
        ]);
        assert!(schema.validate(&json!({"send_updates": "all"})).is_ok());
        assert!(schema.validate(&json!({"send_updates": "All"})).is_err());
        assert!(schema.validate(&json!({"send_updates": "everyone"})).is_err());
    }

    #[test]
    fn optional_fields_may_be_absent_but_are_still_checked() {
        let mut descriptor = integer("days");
        descriptor.set_optional();
        let schema = schema(vec![descriptor]);

        assert!(schema.validate(&json!({})).is_ok());
        assert!(schema.validate(&json!({"days": "nope"})).is_err());
    }

    #[test]
    fn json_kind_accepts_structured_values() {
        let schema = schema(vec![
            FieldDescriptor::new("payload", TypeKind::Json, "Anything").unwrap(),
        ]);
        assert!(schema.validate(&json!({"payload": {"nested": [1, 2]}})).is_ok());
        assert!(schema.validate(&json!({"payload": "plain"})).is_ok());
    }

    #[test]
    fn undeclared_keys_pass_through() {
        let schema = schema(vec![integer("number")]);
        let normalized = schema
            .validate(&json!({"number": 1, "extra": "kept"}))
            .expect("valid");
        assert_eq!(normalized["extra"], json!("kept"));
    }

    #[test]
    fn non_object_payload_rejected() {
        let schema = schema(vec![integer("number")]);
        let err = schema.validate(&json!([1, 2])).expect_err("array payload");
        assert!(err.names_field("$"));
    }
}
