//! Field descriptors recorded during toolkit declaration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_FIELD_NAME_LEN: usize = 64;

/// Type constraint attached to a declared field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    /// Any JSON string.
    String,
    /// A whole number; string-encoded integers are accepted and normalized.
    Integer,
    /// A JSON boolean.
    Boolean,
    /// Any structured JSON value.
    Json,
    /// A string drawn from a declared closed set, case-sensitive.
    Enum,
}

/// Descriptor for a single declared field: name, type constraint,
/// human description, and optionality.
///
/// Fields are required by default; optionality is flipped later by the
/// collector so the "optional" marker composes with whatever type marker was
/// already recorded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    kind: TypeKind,
    description: String,
    required: bool,
    enum_values: Vec<String>,
}

impl FieldDescriptor {
    /// Creates a descriptor for a non-enum field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if the name fails validation or the
    /// kind is [`TypeKind::Enum`] (use [`FieldDescriptor::enumeration`]).
    pub fn new(
        name: impl Into<String>,
        kind: TypeKind,
        description: impl Into<String>,
    ) -> Result<Self> {
        if kind == TypeKind::Enum {
            return Err(Error::InvalidField {
                reason: "enum fields must declare their values via `enumeration`".into(),
            });
        }
        let name = validate_field_name(name.into())?;
        Ok(Self {
            name,
            kind,
            description: description.into(),
            required: true,
            enum_values: Vec::new(),
        })
    }

    /// Creates a descriptor for an enum field with its closed value set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if the name fails validation or the
    /// value set is empty.
    pub fn enumeration(
        name: impl Into<String>,
        description: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let name = validate_field_name(name.into())?;
        let enum_values: Vec<String> = values.into_iter().map(Into::into).collect();
        if enum_values.is_empty() {
            return Err(Error::InvalidField {
                reason: format!("enum field `{name}` must declare at least one value"),
            });
        }
        Ok(Self {
            name,
            kind: TypeKind::Enum,
            description: description.into(),
            required: true,
            enum_values,
        })
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type constraint.
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the field must be present in validated input.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Returns the declared enum values (empty for non-enum fields).
    #[must_use]
    pub fn enum_values(&self) -> &[String] {
        &self.enum_values
    }

    /// Flips the descriptor to optional, preserving everything else.
    pub fn set_optional(&mut self) {
        self.required = false;
    }

    /// Overwrites the type constraint, description, and enum values while
    /// preserving the optionality flag and position. Used when a later
    /// annotation for the same field name wins over an earlier one.
    pub fn overwrite_from(&mut self, other: Self) {
        self.kind = other.kind;
        self.description = other.description;
        self.enum_values = other.enum_values;
    }
}

fn validate_field_name(name: String) -> Result<String> {
    if name.is_empty() {
        return Err(Error::InvalidField {
            reason: "field name cannot be empty".into(),
        });
    }
    if name.len() > MAX_FIELD_NAME_LEN {
        return Err(Error::InvalidField {
            reason: format!("field name length must be <= {MAX_FIELD_NAME_LEN}"),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(Error::InvalidField {
            reason: format!("field name `{name}` must contain alphanumeric or underscore"),
        });
    }
    Ok(name)
}
