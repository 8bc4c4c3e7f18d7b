//! Tool declarations and resolved tool descriptors.

use serde::{Deserialize, Serialize};
use toolset_primitives::{OAuthDescriptor, SchemaName};

use crate::error::{RegistryError, RegistryResult};
use crate::schema::ValidationSchema;

const MAX_TOOL_NAME_LEN: usize = 96;

/// Declarative record of a tool: its name, description, and the logical
/// schema names its shapes are registered under.
///
/// Immutable once built; produced by [`ToolDeclaration::builder`] and handed
/// to the registry explicitly. Schema references stay unresolved until the
/// registry is sealed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolDeclaration {
    name: String,
    description: String,
    input: SchemaName,
    output: SchemaName,
    setup: Option<SchemaName>,
    oauth: Option<OAuthDescriptor>,
}

impl ToolDeclaration {
    /// Starts building a tool declaration.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ToolDeclarationBuilder {
        ToolDeclarationBuilder {
            name: name.into(),
            description: None,
            input: None,
            output: None,
            setup: None,
            oauth: None,
        }
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the logical name of the input schema.
    #[must_use]
    pub fn input(&self) -> &SchemaName {
        &self.input
    }

    /// Returns the logical name of the output schema.
    #[must_use]
    pub fn output(&self) -> &SchemaName {
        &self.output
    }

    /// Returns the logical name of the setup schema, if declared.
    #[must_use]
    pub fn setup(&self) -> Option<&SchemaName> {
        self.setup.as_ref()
    }

    /// Returns the tool-level OAuth requirement, if declared.
    #[must_use]
    pub fn oauth(&self) -> Option<&OAuthDescriptor> {
        self.oauth.as_ref()
    }
}

/// Builder for [`ToolDeclaration`].
#[derive(Debug)]
pub struct ToolDeclarationBuilder {
    name: String,
    description: Option<String>,
    input: Option<SchemaName>,
    output: Option<SchemaName>,
    setup: Option<SchemaName>,
    oauth: Option<OAuthDescriptor>,
}

impl ToolDeclarationBuilder {
    /// Sets the human-readable description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Names the input schema.
    #[must_use]
    pub fn input(mut self, name: SchemaName) -> Self {
        self.input = Some(name);
        self
    }

    /// Names the output schema.
    #[must_use]
    pub fn output(mut self, name: SchemaName) -> Self {
        self.output = Some(name);
        self
    }

    /// Names the optional setup schema.
    #[must_use]
    pub fn setup(mut self, name: SchemaName) -> Self {
        self.setup = Some(name);
        self
    }

    /// Attaches a tool-level OAuth requirement.
    #[must_use]
    pub fn oauth(mut self, oauth: OAuthDescriptor) -> Self {
        self.oauth = Some(oauth);
        self
    }

    /// Consumes the builder and returns the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidDeclaration`] when the name is empty
    /// or too long, or when either schema reference is missing: a tool
    /// without a matching input/output pair is invalid.
    pub fn build(self) -> RegistryResult<ToolDeclaration> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::InvalidDeclaration {
                reason: "tool name cannot be empty".into(),
            });
        }
        if self.name.len() > MAX_TOOL_NAME_LEN {
            return Err(RegistryError::InvalidDeclaration {
                reason: format!("tool name length must be <= {MAX_TOOL_NAME_LEN}"),
            });
        }
        let input = self.input.ok_or_else(|| RegistryError::InvalidDeclaration {
            reason: format!("tool `{}` must name an input schema", self.name),
        })?;
        let output = self.output.ok_or_else(|| RegistryError::InvalidDeclaration {
            reason: format!("tool `{}` must name an output schema", self.name),
        })?;

        Ok(ToolDeclaration {
            name: self.name,
            description: self.description.unwrap_or_default(),
            input,
            output,
            setup: self.setup,
            oauth: self.oauth,
        })
    }
}

/// A tool with its schema references resolved to structured schemas.
///
/// Created once when the registry is sealed; immutable afterward for the
/// process lifetime. This is exactly the per-tool shape rendered into the
/// emitted configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    name: String,
    description: String,
    input: ValidationSchema,
    output: ValidationSchema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    setup: Option<ValidationSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oauth: Option<OAuthDescriptor>,
}

impl ToolDescriptor {
    pub(crate) fn new(
        declaration: &ToolDeclaration,
        input: ValidationSchema,
        output: ValidationSchema,
        setup: Option<ValidationSchema>,
    ) -> Self {
        Self {
            name: declaration.name().to_string(),
            description: declaration.description().to_string(),
            input,
            output,
            setup,
            oauth: declaration.oauth().cloned(),
        }
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the input validation schema.
    #[must_use]
    pub fn input(&self) -> &ValidationSchema {
        &self.input
    }

    /// Returns the output schema.
    ///
    /// Output schemas exist for documentation and emission; nothing validates
    /// tool results against them at runtime.
    #[must_use]
    pub fn output(&self) -> &ValidationSchema {
        &self.output
    }

    /// Returns the setup schema, if the tool declared one.
    #[must_use]
    pub fn setup(&self) -> Option<&ValidationSchema> {
        self.setup.as_ref()
    }

    /// Returns the tool-level OAuth requirement, if declared.
    #[must_use]
    pub fn oauth(&self) -> Option<&OAuthDescriptor> {
        self.oauth.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> SchemaName {
        SchemaName::new(value).expect("schema name")
    }

    #[test]
    fn builds_declaration() {
        let declaration = ToolDeclaration::builder("isEven")
            .description("Checks whether a number is even")
            .input(name("IsEvenInput"))
            .output(name("IsEvenOutput"))
            .build()
            .unwrap();

        assert_eq!(declaration.name(), "isEven");
        assert!(declaration.setup().is_none());
    }

    #[test]
    fn input_and_output_are_required() {
        let err = ToolDeclaration::builder("isEven")
            .input(name("IsEvenInput"))
            .build()
            .expect_err("missing output should fail");
        assert!(matches!(err, RegistryError::InvalidDeclaration { .. }));

        let err = ToolDeclaration::builder("")
            .input(name("A"))
            .output(name("B"))
            .build()
            .expect_err("empty name should fail");
        assert!(matches!(err, RegistryError::InvalidDeclaration { .. }));
    }
}
