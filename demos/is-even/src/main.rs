//! Minimal toolset example: declare a toolkit with one tool, seal it, emit
//! its configuration, and invoke the tool through the execution gate.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use toolset::exec::{ExecutionError, ExecutionGate};
use toolset::primitives::{
    ClassKey, FieldDescriptor, SchemaName, SchemaRole, ToolkitInfo, TypeKind,
};
use toolset::registry::{ToolDeclaration, Toolkit, ToolkitRegistry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    info!("=== Toolset: is-even example ===");

    let toolkit = Arc::new(declare_toolkit()?);

    // The emitted configuration is the contract a host loader consumes.
    let config = toolkit.emit_config()?;
    info!("emitted configuration: {config}");

    let mut gate = ExecutionGate::new(Arc::clone(&toolkit));
    gate.bind("isEven", is_even)?;

    // Valid input, native integer.
    let output = gate.invoke("isEven", json!({"number": 56}), None).await?;
    info!("isEven(56) -> {output}");

    // String-encoded integers normalize before the body runs.
    let output = gate.invoke("isEven", json!({"number": "7"}), None).await?;
    info!("isEven(\"7\") -> {output}");

    // Missing required input is rejected before the body can run.
    match gate.invoke("isEven", json!({}), None).await {
        Err(err) => info!("empty input rejected as expected: {err}"),
        Ok(_) => anyhow::bail!("empty input should have been rejected"),
    }

    Ok(())
}

/// Declares the toolkit: one integer input, one boolean output, one tool.
fn declare_toolkit() -> Result<Toolkit> {
    let info = ToolkitInfo::builder()
        .name("Number Toolkit")?
        .author("Example Team")?
        .version("0.1.0")?
        .build()?;
    let mut registry = ToolkitRegistry::new(info);

    let input = ClassKey::new("numbers.is_even.input")?;
    registry.record_field(
        &input,
        FieldDescriptor::new("number", TypeKind::Integer, "Number to test")?,
    );
    registry.bind_schema(SchemaRole::Input, SchemaName::new("IsEvenInput")?, input)?;

    let output = ClassKey::new("numbers.is_even.output")?;
    registry.record_field(
        &output,
        FieldDescriptor::new("isEven", TypeKind::Boolean, "Whether the number is even")?,
    );
    registry.bind_schema(SchemaRole::Output, SchemaName::new("IsEvenOutput")?, output)?;

    registry.register_tool(
        ToolDeclaration::builder("isEven")
            .description("Checks whether a number is even")
            .input(SchemaName::new("IsEvenInput")?)
            .output(SchemaName::new("IsEvenOutput")?)
            .build()?,
    )?;

    Ok(registry.seal()?)
}

/// The tool body: receives validated, normalized input.
async fn is_even(input: Value, _setup: Option<Value>) -> Result<Value, ExecutionError> {
    let number = input["number"]
        .as_i64()
        .ok_or_else(|| ExecutionError::failure("validated input is missing `number`"))?;
    Ok(json!({"isEven": number % 2 == 0}))
}
