//! Structural errors surfaced while declaring or sealing a toolkit.
//!
//! Everything here indicates a broken toolkit definition. These errors are
//! meant to fail loudly during the declaration phase; none of them is a
//! runtime condition to recover from.

use thiserror::Error;
use toolset_primitives::{ClassKey, SchemaName, SchemaRole};

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors produced while declaring, binding, or sealing toolkit metadata.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An optionality marker was applied before any type marker.
    #[error("unknown field `{field}` on class `{class}`: record a type before marking optional")]
    UnknownField {
        /// Declaration block the marker targeted.
        class: ClassKey,
        /// Field name that has no descriptor yet.
        field: String,
    },

    /// Two declaration blocks bound the same role and logical name.
    #[error(
        "duplicate schema name `{name}` for role `{role}`: bound to `{existing}`, rejected `{offered}`"
    )]
    DuplicateSchemaName {
        /// Role under which the collision occurred.
        role: SchemaRole,
        /// The contested logical name.
        name: SchemaName,
        /// Class key already bound.
        existing: ClassKey,
        /// Class key whose binding was rejected.
        offered: ClassKey,
    },

    /// Two tools were registered under the same name.
    #[error("tool `{name}` is already registered")]
    DuplicateTool {
        /// Name of the offending tool.
        name: String,
    },

    /// A tool references a logical name with no registered schema.
    #[error("tool `{tool}` references unregistered {role} schema `{name}`")]
    MissingSchema {
        /// Tool whose reference failed to resolve.
        tool: String,
        /// Role the reference was resolved under.
        role: SchemaRole,
        /// The unresolved logical name.
        name: SchemaName,
    },

    /// A tool declaration failed validation before registration.
    #[error("invalid tool declaration: {reason}")]
    InvalidDeclaration {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// A primitive value failed validation.
    #[error(transparent)]
    Primitives(#[from] toolset_primitives::Error),

    /// The emitted configuration could not be serialized.
    #[error("failed to serialize toolkit configuration: {source}")]
    Serialization {
        /// Underlying serializer error.
        #[from]
        source: serde_json::Error,
    },
}
