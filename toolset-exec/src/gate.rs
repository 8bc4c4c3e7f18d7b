//! The execution gate: validate, then run, then return the output unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use toolset_registry::Toolkit;

use crate::error::{GateError, GateResult};
use crate::invocation::{Invocation, InvocationEvent};
use crate::tool::{SetupValidator, Tool};

/// Wraps a sealed toolkit's tools behind input validation.
///
/// Per invocation: the tool's input schema is resolved, the raw input is
/// validated (failing fast with every violated field before the body can
/// run), setup headers are forwarded unchanged unless a [`SetupValidator`]
/// hook is installed, and the body's output is returned as-is — output
/// schemas exist for documentation and emission only, a deliberate
/// asymmetry.
///
/// The gate imposes no retry, timeout, or cancellation: a hung tool body
/// blocks that invocation indefinitely unless the calling environment
/// imposes its own timeout. Invocations share no mutable state, so the gate
/// may be invoked concurrently through a shared reference.
pub struct ExecutionGate {
    toolkit: Arc<Toolkit>,
    tools: HashMap<String, Arc<dyn Tool>>,
    setup_validator: Option<Arc<dyn SetupValidator>>,
}

impl std::fmt::Debug for ExecutionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bound: Vec<_> = self.tools.keys().cloned().collect();
        f.debug_struct("ExecutionGate")
            .field("toolkit", &self.toolkit.name())
            .field("bound", &bound)
            .finish()
    }
}

impl ExecutionGate {
    /// Creates a gate over a sealed toolkit with no bound implementations.
    #[must_use]
    pub fn new(toolkit: Arc<Toolkit>) -> Self {
        Self {
            toolkit,
            tools: HashMap::new(),
            setup_validator: None,
        }
    }

    /// Installs a custom setup-header validation hook.
    #[must_use]
    pub fn with_setup_validator(mut self, validator: Arc<dyn SetupValidator>) -> Self {
        self.setup_validator = Some(validator);
        self
    }

    /// Returns the sealed toolkit this gate fronts.
    #[must_use]
    pub fn toolkit(&self) -> &Toolkit {
        &self.toolkit
    }

    /// Binds an implementation to a declared tool.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::UnknownTool`] when the toolkit declares no tool
    /// under that name, or [`GateError::AlreadyBound`] on a second binding.
    pub fn bind<T>(&mut self, name: &str, tool: T) -> GateResult<()>
    where
        T: Tool + 'static,
    {
        if self.toolkit.tool(name).is_none() {
            return Err(GateError::UnknownTool {
                name: name.to_string(),
            });
        }
        if self.tools.contains_key(name) {
            return Err(GateError::AlreadyBound {
                name: name.to_string(),
            });
        }
        self.tools.insert(name.to_string(), Arc::new(tool));
        Ok(())
    }

    /// Invokes a tool: validate the input, run the body, return its output.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::UnknownTool`] or [`GateError::NotBound`] when the
    /// tool cannot be resolved, [`GateError::Rejected`] when the input (or a
    /// hooked setup check) fails validation — the body never runs — and
    /// [`GateError::Failed`] when the body itself raises.
    pub async fn invoke(
        &self,
        name: &str,
        input: Value,
        setup: Option<Value>,
    ) -> GateResult<Value> {
        let descriptor = self
            .toolkit
            .tool(name)
            .ok_or_else(|| GateError::UnknownTool {
                name: name.to_string(),
            })?;
        let tool = self.tools.get(name).ok_or_else(|| GateError::NotBound {
            name: name.to_string(),
        })?;

        let mut invocation = Invocation::new(name);
        debug!(invocation = %invocation.id(), tool = name, "invocation submitted");

        invocation.transition(InvocationEvent::Validate)?;
        let normalized = match descriptor.input().validate(&input) {
            Ok(normalized) => normalized,
            Err(violations) => {
                invocation.transition(InvocationEvent::Reject)?;
                warn!(
                    invocation = %invocation.id(),
                    tool = name,
                    violations = violations.violations().len(),
                    "invocation rejected by input validation"
                );
                return Err(GateError::Rejected {
                    tool: name.to_string(),
                    invocation: invocation.id(),
                    source: violations,
                });
            }
        };

        if let Some(validator) = &self.setup_validator {
            if let Err(violations) = validator.validate(descriptor, setup.as_ref()).await {
                invocation.transition(InvocationEvent::Reject)?;
                warn!(
                    invocation = %invocation.id(),
                    tool = name,
                    "invocation rejected by setup validator"
                );
                return Err(GateError::Rejected {
                    tool: name.to_string(),
                    invocation: invocation.id(),
                    source: violations,
                });
            }
        }

        invocation.transition(InvocationEvent::Accept)?;
        match tool.run(Value::Object(normalized), setup).await {
            Ok(output) => {
                invocation.transition(InvocationEvent::Complete)?;
                debug!(invocation = %invocation.id(), tool = name, "invocation completed");
                Ok(output)
            }
            Err(source) => {
                invocation.transition(InvocationEvent::Fail)?;
                warn!(
                    invocation = %invocation.id(),
                    tool = name,
                    error = %source,
                    "tool body failed"
                );
                Err(GateError::Failed {
                    tool: name.to_string(),
                    invocation: invocation.id(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolset_primitives::{
        ClassKey, FieldDescriptor, SchemaName, SchemaRole, ToolkitInfo, TypeKind,
    };
    use toolset_registry::{ToolDeclaration, ToolkitRegistry, ValidationError};

    use crate::error::ExecutionError;
    use crate::tool::SetupValidator;
    use async_trait::async_trait;
    use toolset_registry::ToolDescriptor;

    fn sealed_toolkit() -> Arc<Toolkit> {
        let info = ToolkitInfo::builder()
            .name("Number Toolkit")
            .unwrap()
            .author("Example Team")
            .unwrap()
            .version("0.0.1")
            .unwrap()
            .build()
            .unwrap();
        let mut registry = ToolkitRegistry::new(info);

        let input_class = ClassKey::new("numbers.is_even.input").unwrap();
        registry.record_field(
            &input_class,
            FieldDescriptor::new("number", TypeKind::Integer, "Number to test").unwrap(),
        );
        registry
            .bind_schema(
                SchemaRole::Input,
                SchemaName::new("IsEvenInput").unwrap(),
                input_class,
            )
            .unwrap();

        let output_class = ClassKey::new("numbers.is_even.output").unwrap();
        registry.record_field(
            &output_class,
            FieldDescriptor::new("isEven", TypeKind::Boolean, "Whether the number is even")
                .unwrap(),
        );
        registry
            .bind_schema(
                SchemaRole::Output,
                SchemaName::new("IsEvenOutput").unwrap(),
                output_class,
            )
            .unwrap();

        registry
            .register_tool(
                ToolDeclaration::builder("isEven")
                    .description("Checks whether a number is even")
                    .input(SchemaName::new("IsEvenInput").unwrap())
                    .output(SchemaName::new("IsEvenOutput").unwrap())
                    .build()
                    .unwrap(),
            )
            .unwrap();

        Arc::new(registry.seal().unwrap())
    }

    async fn is_even(input: Value, _setup: Option<Value>) -> crate::ExecutionResult<Value> {
        let number = input["number"].as_i64().ok_or_else(|| {
            ExecutionError::failure("validated input is missing `number`")
        })?;
        Ok(json!({"isEven": number % 2 == 0}))
    }

    fn gate() -> ExecutionGate {
        let mut gate = ExecutionGate::new(sealed_toolkit());
        gate.bind("isEven", is_even).unwrap();
        gate
    }

    #[tokio::test]
    async fn valid_input_reaches_the_body() {
        let gate = gate();
        let output = gate.invoke("isEven", json!({"number": 4}), None).await.unwrap();
        assert_eq!(output, json!({"isEven": true}));
    }

    #[tokio::test]
    async fn string_encoded_integer_is_normalized_before_the_body() {
        let gate = gate();
        let output = gate.invoke("isEven", json!({"number": "4"}), None).await.unwrap();
        assert_eq!(output, json!({"isEven": true}));
    }

    #[tokio::test]
    async fn missing_field_rejects_without_running_the_body() {
        let gate = gate();
        let err = gate
            .invoke("isEven", json!({}), None)
            .await
            .expect_err("missing field must reject");
        match err {
            GateError::Rejected { tool, source, .. } => {
                assert_eq!(tool, "isEven");
                assert!(source.names_field("number"));
            }
            other => panic!("expected rejection, got {other}"),
        }
    }

    #[tokio::test]
    async fn body_failure_is_reported_as_failed_not_rejected() {
        let mut gate = ExecutionGate::new(sealed_toolkit());
        gate.bind("isEven", |_input: Value, _setup: Option<Value>| async move {
            Err::<Value, _>(ExecutionError::failure("upstream service unavailable"))
        })
        .unwrap();

        let err = gate
            .invoke("isEven", json!({"number": 2}), None)
            .await
            .expect_err("body failure");
        assert!(matches!(err, GateError::Failed { .. }));
    }

    #[tokio::test]
    async fn output_is_never_validated_against_the_declared_schema() {
        let mut gate = ExecutionGate::new(sealed_toolkit());
        // Declared output is {isEven: BOOLEAN}; return something else entirely.
        gate.bind("isEven", |_input: Value, _setup: Option<Value>| async move {
            Ok(json!({"unrelated": "shape"}))
        })
        .unwrap();

        let output = gate.invoke("isEven", json!({"number": 2}), None).await.unwrap();
        assert_eq!(output, json!({"unrelated": "shape"}));
    }

    #[tokio::test]
    async fn unknown_and_unbound_tools_are_distinct() {
        let gate = gate();
        assert!(matches!(
            gate.invoke("missing", json!({}), None).await,
            Err(GateError::UnknownTool { .. })
        ));

        let unbound = ExecutionGate::new(sealed_toolkit());
        assert!(matches!(
            unbound.invoke("isEven", json!({"number": 2}), None).await,
            Err(GateError::NotBound { .. })
        ));
    }

    #[tokio::test]
    async fn binding_guards_catalog_membership_and_double_binds() {
        let mut gate = gate();
        assert!(matches!(
            gate.bind("missing", is_even),
            Err(GateError::UnknownTool { .. })
        ));
        assert!(matches!(
            gate.bind("isEven", is_even),
            Err(GateError::AlreadyBound { .. })
        ));
    }

    #[tokio::test]
    async fn setup_headers_are_forwarded_unvalidated_by_default() {
        let mut gate = ExecutionGate::new(sealed_toolkit());
        gate.bind("isEven", |_input: Value, setup: Option<Value>| async move {
            Ok(json!({"sawSetup": setup.is_some()}))
        })
        .unwrap();

        let output = gate
            .invoke("isEven", json!({"number": 2}), Some(json!({"anything": "goes"})))
            .await
            .unwrap();
        assert_eq!(output, json!({"sawSetup": true}));
    }

    struct RejectAll;

    #[async_trait]
    impl SetupValidator for RejectAll {
        async fn validate(
            &self,
            _tool: &ToolDescriptor,
            _setup: Option<&Value>,
        ) -> Result<(), ValidationError> {
            Err(ValidationError::new(vec![
                toolset_registry::FieldViolation {
                    field: "API_KEY".to_string(),
                    reason: "token is no longer live".to_string(),
                },
            ]))
        }
    }

    #[tokio::test]
    async fn installed_setup_validator_can_reject_before_the_body() {
        let mut gate = ExecutionGate::new(sealed_toolkit()).with_setup_validator(Arc::new(RejectAll));
        gate.bind("isEven", is_even).unwrap();

        let err = gate
            .invoke("isEven", json!({"number": 2}), Some(json!({})))
            .await
            .expect_err("hook rejects");
        match err {
            GateError::Rejected { source, .. } => assert!(source.names_field("API_KEY")),
            other => panic!("expected rejection, got {other}"),
        }
    }
}
