//! Errors surfaced at and beyond the execution gate.

use thiserror::Error;
use toolset_registry::ValidationError;

use crate::invocation::{InvocationEvent, InvocationId, InvocationState};

/// Result alias for tool bodies.
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// The tool body itself failed during execution.
///
/// Distinct from a rejection: by the time this error exists, validated input
/// reached the tool and the failure happened inside its `run` body (a network
/// call rejected, a collaborator timed out, ...).
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The tool body reported a failure.
    #[error("tool execution failed: {reason}")]
    Failure {
        /// Human-readable error returned by the tool implementation.
        reason: String,
    },
}

impl ExecutionError {
    /// Creates an execution failure from the supplied reason.
    #[must_use]
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }
}

/// Result alias for gate operations.
pub type GateResult<T> = Result<T, GateError>;

/// Errors produced by the execution gate.
///
/// `Rejected` and `Failed` are deliberately distinct: `Rejected` means the
/// input never reached the tool body, `Failed` means the body itself raised.
#[derive(Debug, Error)]
pub enum GateError {
    /// The named tool is not part of the sealed toolkit.
    #[error("tool `{name}` is not declared in the toolkit")]
    UnknownTool {
        /// Name of the missing tool.
        name: String,
    },

    /// The named tool has no bound implementation.
    #[error("tool `{name}` has no bound implementation")]
    NotBound {
        /// Name of the unbound tool.
        name: String,
    },

    /// An implementation is already bound under that name.
    #[error("tool `{name}` already has a bound implementation")]
    AlreadyBound {
        /// Name of the offending tool.
        name: String,
    },

    /// Input failed validation; the tool body never ran.
    #[error("invocation {invocation} of tool `{tool}` rejected: {source}")]
    Rejected {
        /// Tool whose invocation was rejected.
        tool: String,
        /// Identifier of the rejected invocation.
        invocation: InvocationId,
        /// The per-field violations.
        #[source]
        source: ValidationError,
    },

    /// The tool body raised during execution.
    #[error("invocation {invocation} of tool `{tool}` failed: {source}")]
    Failed {
        /// Tool whose body failed.
        tool: String,
        /// Identifier of the failed invocation.
        invocation: InvocationId,
        /// The body's own error.
        #[source]
        source: ExecutionError,
    },

    /// Internal lifecycle guard: an illegal state transition was attempted.
    #[error("invalid invocation transition from {from:?} via {event:?}")]
    InvalidTransition {
        /// State prior to the attempted transition.
        from: InvocationState,
        /// Event that triggered the failure.
        event: InvocationEvent,
    },
}
