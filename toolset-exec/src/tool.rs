//! Trait implemented by tool bodies.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;
use toolset_registry::{ToolDescriptor, ValidationError};

use crate::error::ExecutionResult;

/// A unit of capability: receives validated input (and setup headers, when
/// declared) and produces a structured output.
///
/// Implementations may perform blocking I/O; each invocation is independent
/// and stateless with respect to the registry, so concurrent invocations of
/// the same tool must not interfere through shared mutable state.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Runs the tool body with validated, normalized input.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`](crate::ExecutionError) when the body
    /// itself fails.
    async fn run(&self, input: Value, setup: Option<Value>) -> ExecutionResult<Value>;
}

#[async_trait]
impl<F, Fut> Tool for F
where
    F: Send + Sync + Fn(Value, Option<Value>) -> Fut,
    Fut: Future<Output = ExecutionResult<Value>> + Send,
{
    async fn run(&self, input: Value, setup: Option<Value>) -> ExecutionResult<Value> {
        (self)(input, setup).await
    }
}

/// Optional hook for validating setup headers before a tool body runs.
///
/// By default the gate forwards setup headers unvalidated; supplying headers
/// that match the declared setup schema is the caller's responsibility.
/// Installing a validator lets a toolkit check more than shape — e.g. verify
/// an OAuth token's liveness against an external provider.
#[async_trait]
pub trait SetupValidator: Send + Sync {
    /// Checks the supplied setup headers for the given tool.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] to reject the invocation before the
    /// tool body runs.
    async fn validate(
        &self,
        tool: &ToolDescriptor,
        setup: Option<&Value>,
    ) -> Result<(), ValidationError>;
}
