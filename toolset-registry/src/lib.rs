//! Declaration registry and configuration emitter for toolsets.
//!
//! A toolkit module declares its shapes and tools against a mutable
//! [`ToolkitRegistry`] during an explicit initialization phase, then calls
//! [`ToolkitRegistry::seal`] to freeze the result into an immutable
//! [`Toolkit`]. Sealing consumes the registry, so nothing can mutate the
//! catalog for the remainder of the process; catalog reads need no locking.
//!
//! Registration-order is preserved end to end: the first tool registered is
//! the first tool listed in the emitted configuration, and the emission is
//! byte-identical across runs given the same declarations.

#![warn(missing_docs, clippy::pedantic)]

mod catalog;
mod collector;
mod error;
mod manifest;
mod roles;
mod schema;
mod validate;

use std::collections::HashMap;

use tracing::{debug, info};
use toolset_primitives::{ClassKey, FieldDescriptor, SchemaName, SchemaRole, ToolkitInfo};

pub use catalog::{ToolDeclaration, ToolDeclarationBuilder, ToolDescriptor};
pub use collector::FieldCollector;
pub use error::{RegistryError, RegistryResult};
pub use manifest::ToolkitManifest;
pub use roles::RoleRegistry;
pub use schema::{FieldSchema, ValidationSchema};
pub use validate::{FieldViolation, ValidationError};

/// Mutable declaration-phase registry for one toolkit.
///
/// All registration is synchronous and happens before any validation or
/// emission is requested; structural mistakes (duplicate names, markers
/// without a type, dangling schema references) fail immediately and loudly.
#[derive(Debug)]
pub struct ToolkitRegistry {
    info: ToolkitInfo,
    collector: FieldCollector,
    roles: RoleRegistry,
    declarations: Vec<ToolDeclaration>,
}

impl ToolkitRegistry {
    /// Creates a registry for the given toolkit identity.
    #[must_use]
    pub fn new(info: ToolkitInfo) -> Self {
        Self {
            info,
            collector: FieldCollector::new(),
            roles: RoleRegistry::new(),
            declarations: Vec::new(),
        }
    }

    /// Returns the toolkit identity.
    #[must_use]
    pub fn info(&self) -> &ToolkitInfo {
        &self.info
    }

    /// Records a field descriptor on a declaration block.
    ///
    /// Re-recording a field name overwrites its type constraint and
    /// description (latest wins) without duplicating the entry.
    pub fn record_field(&mut self, class: &ClassKey, descriptor: FieldDescriptor) {
        self.collector.record(class, descriptor);
    }

    /// Marks a previously recorded field optional.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownField`] when the field has no
    /// descriptor yet on that class.
    pub fn mark_optional(&mut self, class: &ClassKey, field: &str) -> RegistryResult<()> {
        self.collector.mark_optional(class, field)
    }

    /// Binds a logical schema name under a role to a declaration block.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSchemaName`] when the pair is
    /// already bound to a different block.
    pub fn bind_schema(
        &mut self,
        role: SchemaRole,
        name: SchemaName,
        class: ClassKey,
    ) -> RegistryResult<()> {
        self.roles.bind(role, name, class)
    }

    /// Explicitly rebinds a logical schema name, replacing any previous
    /// binding. The only path by which "last registration wins".
    pub fn rebind_schema(&mut self, role: SchemaRole, name: SchemaName, class: ClassKey) {
        self.roles.rebind(role, name, class);
    }

    /// Builds the validation schema for a declaration block.
    ///
    /// Deterministic and pure with respect to the recorded descriptor
    /// sequence; a block with no recorded fields yields an empty schema.
    #[must_use]
    pub fn build_schema(&self, class: &ClassKey) -> ValidationSchema {
        ValidationSchema::from_descriptors(self.collector.descriptors(class))
    }

    /// Registers a tool declaration, preserving registration order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTool`] when a tool with the same
    /// name is already registered.
    pub fn register_tool(&mut self, declaration: ToolDeclaration) -> RegistryResult<()> {
        if self.declarations.iter().any(|d| d.name() == declaration.name()) {
            return Err(RegistryError::DuplicateTool {
                name: declaration.name().to_string(),
            });
        }
        info!(
            toolkit = self.info.name(),
            tool = declaration.name(),
            "registered tool declaration"
        );
        self.declarations.push(declaration);
        Ok(())
    }

    /// Freezes the registry into an immutable [`Toolkit`].
    ///
    /// Resolves every declaration's schema references and builds each tool
    /// descriptor exactly once. Consuming `self` makes further mutation
    /// impossible for the remainder of the process.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingSchema`] naming the tool, role, and
    /// logical name of the first reference that does not resolve.
    pub fn seal(self) -> RegistryResult<Toolkit> {
        let mut tools = Vec::with_capacity(self.declarations.len());
        for declaration in &self.declarations {
            let input = self.resolve_schema(declaration, SchemaRole::Input, declaration.input())?;
            let output =
                self.resolve_schema(declaration, SchemaRole::Output, declaration.output())?;
            let setup = declaration
                .setup()
                .map(|name| self.resolve_schema(declaration, SchemaRole::Setup, name))
                .transpose()?;
            tools.push(ToolDescriptor::new(declaration, input, output, setup));
        }

        info!(
            toolkit = self.info.name(),
            tools = tools.len(),
            "sealed toolkit configuration"
        );

        let index = tools
            .iter()
            .enumerate()
            .map(|(position, tool)| (tool.name().to_string(), position))
            .collect();
        let manifest = ToolkitManifest::new(&self.info, tools);
        Ok(Toolkit { manifest, index })
    }

    fn resolve_schema(
        &self,
        declaration: &ToolDeclaration,
        role: SchemaRole,
        name: &SchemaName,
    ) -> RegistryResult<ValidationSchema> {
        let class = self.roles.resolve(role, name).ok_or_else(|| {
            RegistryError::MissingSchema {
                tool: declaration.name().to_string(),
                role,
                name: name.clone(),
            }
        })?;
        debug!(tool = declaration.name(), %role, schema = %name, class = %class, "resolved schema");
        Ok(self.build_schema(class))
    }
}

/// Immutable, sealed toolkit: the catalog, the manifest, and the emission
/// entry point. Lives for the process lifetime; safe to share across
/// concurrent invocations without locking.
#[derive(Clone, Debug)]
pub struct Toolkit {
    manifest: ToolkitManifest,
    index: HashMap<String, usize>,
}

impl Toolkit {
    /// Returns the manifest describing this toolkit.
    #[must_use]
    pub fn manifest(&self) -> &ToolkitManifest {
        &self.manifest
    }

    /// Returns the toolkit name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.manifest.name()
    }

    /// Returns every tool descriptor, in registration order.
    #[must_use]
    pub fn tools(&self) -> &[ToolDescriptor] {
        self.manifest.tools()
    }

    /// Looks up a tool descriptor by name.
    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index
            .get(name)
            .and_then(|position| self.manifest.tools().get(*position))
    }

    /// Serializes the configuration document.
    ///
    /// Deterministic: identical declarations in identical order produce
    /// byte-identical output, so the result can serve as a snapshot contract.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Serialization`] if the document cannot be
    /// rendered, which indicates a bug rather than bad input.
    pub fn emit_config(&self) -> RegistryResult<String> {
        Ok(serde_json::to_string(&self.manifest)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolset_primitives::TypeKind;

    fn info(name: &str) -> ToolkitInfo {
        ToolkitInfo::builder()
            .name(name)
            .unwrap()
            .author("Example Team")
            .unwrap()
            .version("0.0.1")
            .unwrap()
            .build()
            .unwrap()
    }

    fn schema_name(value: &str) -> SchemaName {
        SchemaName::new(value).expect("schema name")
    }

    fn class(value: &str) -> ClassKey {
        ClassKey::new(value).expect("class key")
    }

    fn is_even_registry() -> ToolkitRegistry {
        let mut registry = ToolkitRegistry::new(info("Number Toolkit"));

        let input_class = class("numbers.is_even.input");
        registry.record_field(
            &input_class,
            FieldDescriptor::new("number", TypeKind::Integer, "Number to test").unwrap(),
        );
        registry
            .bind_schema(SchemaRole::Input, schema_name("IsEvenInput"), input_class)
            .unwrap();

        let output_class = class("numbers.is_even.output");
        registry.record_field(
            &output_class,
            FieldDescriptor::new("isEven", TypeKind::Boolean, "Whether the number is even")
                .unwrap(),
        );
        registry
            .bind_schema(SchemaRole::Output, schema_name("IsEvenOutput"), output_class)
            .unwrap();

        registry
            .register_tool(
                ToolDeclaration::builder("isEven")
                    .description("Checks whether a number is even")
                    .input(schema_name("IsEvenInput"))
                    .output(schema_name("IsEvenOutput"))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        registry
    }

    #[test]
    fn seal_resolves_declared_schemas() {
        let toolkit = is_even_registry().seal().unwrap();
        let tool = toolkit.tool("isEven").expect("tool");
        assert_eq!(tool.input().fields()[0].name(), "number");
        assert_eq!(tool.output().fields()[0].name(), "isEven");
        assert!(tool.setup().is_none());
    }

    #[test]
    fn seal_fails_loudly_on_dangling_reference() {
        let mut registry = is_even_registry();
        registry
            .register_tool(
                ToolDeclaration::builder("isOdd")
                    .description("Checks whether a number is odd")
                    .input(schema_name("IsOddInput"))
                    .output(schema_name("IsEvenOutput"))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let err = registry.seal().expect_err("dangling input reference");
        match err {
            RegistryError::MissingSchema { tool, role, name } => {
                assert_eq!(tool, "isOdd");
                assert_eq!(role, SchemaRole::Input);
                assert_eq!(name.as_str(), "IsOddInput");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_tool_names_error_at_registration() {
        let mut registry = is_even_registry();
        let err = registry
            .register_tool(
                ToolDeclaration::builder("isEven")
                    .input(schema_name("IsEvenInput"))
                    .output(schema_name("IsEvenOutput"))
                    .build()
                    .unwrap(),
            )
            .expect_err("duplicate tool should fail");
        assert!(matches!(err, RegistryError::DuplicateTool { .. }));
    }

    #[test]
    fn emission_is_deterministic() {
        let toolkit = is_even_registry().seal().unwrap();
        let first = toolkit.emit_config().unwrap();
        let second = toolkit.emit_config().unwrap();
        assert_eq!(first, second);

        // A freshly declared, identical registry emits the same bytes.
        let other = is_even_registry().seal().unwrap();
        assert_eq!(first, other.emit_config().unwrap());
    }

    #[test]
    fn tools_are_listed_in_registration_order() {
        let mut registry = is_even_registry();
        let extra_class = class("numbers.compare.input");
        registry.record_field(
            &extra_class,
            FieldDescriptor::new("left", TypeKind::Integer, "Left operand").unwrap(),
        );
        registry
            .bind_schema(SchemaRole::Input, schema_name("CompareInput"), extra_class)
            .unwrap();
        registry
            .register_tool(
                ToolDeclaration::builder("compareNumbers")
                    .input(schema_name("CompareInput"))
                    .output(schema_name("IsEvenOutput"))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let toolkit = registry.seal().unwrap();
        let names: Vec<_> = toolkit.tools().iter().map(ToolDescriptor::name).collect();
        assert_eq!(names, ["isEven", "compareNumbers"]);
    }

    #[test]
    fn zero_tool_toolkit_emits_identity_and_empty_tools() {
        let toolkit = ToolkitRegistry::new(info("Empty Toolkit")).seal().unwrap();
        let config = toolkit.emit_config().unwrap();
        let value: serde_json::Value = serde_json::from_str(&config).unwrap();
        assert_eq!(value["toolkitName"], "Empty Toolkit");
        assert_eq!(value["author"], "Example Team");
        assert_eq!(value["version"], "0.0.1");
        assert_eq!(value["tools"], serde_json::json!([]));
        assert!(value.get("toolkitHeaders").is_none());
    }
}
