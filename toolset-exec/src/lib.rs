//! Validated execution for sealed toolkits.
//!
//! The [`ExecutionGate`] wraps a tool's invocation: it validates the provided
//! input against the tool's declared schema before the body may run, forwards
//! setup headers unchanged, and returns the body's output without checking it
//! against the declared output schema. There is no built-in retry, timeout,
//! or cancellation layer; callers that need one must impose their own.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod gate;
mod invocation;
mod tool;

/// Error types and result aliases for tool bodies and the gate.
pub use error::{ExecutionError, ExecutionResult, GateError, GateResult};
/// The validate-then-run wrapper around a toolkit's tools.
pub use gate::ExecutionGate;
/// Per-invocation lifecycle tracking.
pub use invocation::{Invocation, InvocationEvent, InvocationId, InvocationState};
/// Traits implemented by tool bodies and setup-header hooks.
pub use tool::{SetupValidator, Tool};
