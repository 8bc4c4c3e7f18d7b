//! Validation schemas built from collected field descriptors.

use serde::{Deserialize, Serialize};
use toolset_primitives::{FieldDescriptor, TypeKind};

/// One field of a built validation schema, in emitted wire form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    name: String,
    #[serde(rename = "type")]
    kind: TypeKind,
    description: String,
    #[serde(rename = "isOptional")]
    is_optional: bool,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    enum_values: Vec<String>,
}

impl FieldSchema {
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

    /// Returns whether the field may be omitted from input.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.is_optional
    }

    /// Returns the declared enum values (empty for non-enum fields).
    #[must_use]
    pub fn enum_values(&self) -> &[String] {
        &self.enum_values
    }
}

impl From<&FieldDescriptor> for FieldSchema {
    fn from(descriptor: &FieldDescriptor) -> Self {
        Self {
            name: descriptor.name().to_string(),
            kind: descriptor.kind(),
            description: descriptor.description().to_string(),
            is_optional: !descriptor.required(),
            enum_values: descriptor.enum_values().to_vec(),
        }
    }
}

/// Object-shape schema: an ordered sequence of field constraints.
///
/// Serializes as the field array itself, so the emitted configuration renders
/// nested schemas as structured objects rather than opaque handles.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationSchema {
    fields: Vec<FieldSchema>,
}

impl ValidationSchema {
    /// Builds a schema from collected descriptors.
    ///
    /// Deterministic and pure: the output depends only on the descriptor
    /// sequence, preserving its order.
    #[must_use]
    pub fn from_descriptors(descriptors: &[FieldDescriptor]) -> Self {
        Self {
            fields: descriptors.iter().map(FieldSchema::from).collect(),
        }
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Returns `true` when the schema declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
