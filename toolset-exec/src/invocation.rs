//! Per-invocation lifecycle state machine.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{GateError, GateResult};

/// Unique identifier for one tool invocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a random invocation identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::random()
    }
}

impl Display for InvocationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Discrete states an invocation occupies between submission and settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    /// Invocation accepted by the gate, nothing checked yet.
    Pending,
    /// Input is being validated against the declared schema.
    Validating,
    /// Input failed validation; the tool body never ran. Terminal.
    Rejected,
    /// Validated input reached the tool body.
    Running,
    /// The tool body returned an output. Terminal.
    Completed,
    /// The tool body itself raised. Terminal.
    Failed,
}

impl InvocationState {
    /// Returns `true` once the invocation has settled.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Failed)
    }
}

/// Events that drive invocation transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationEvent {
    /// Begin validating the raw input.
    Validate,
    /// Validation failed; settle without running the body.
    Reject,
    /// Validation passed; hand the input to the body.
    Accept,
    /// The body returned an output.
    Complete,
    /// The body raised.
    Fail,
}

/// Tracks one invocation from `Pending` to a terminal state.
#[derive(Debug, Clone)]
pub struct Invocation {
    id: InvocationId,
    tool: String,
    state: InvocationState,
}

impl Invocation {
    /// Starts tracking a new invocation of the named tool.
    #[must_use]
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            id: InvocationId::random(),
            tool: tool.into(),
            state: InvocationState::Pending,
        }
    }

    /// Returns the invocation identifier.
    #[must_use]
    pub const fn id(&self) -> InvocationId {
        self.id
    }

    /// Returns the tool name this invocation targets.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> InvocationState {
        self.state
    }

    /// Applies an event, returning the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidTransition`] when the supplied event is
    /// not allowed from the current state.
    pub fn transition(&mut self, event: InvocationEvent) -> GateResult<InvocationState> {
        let next = match (self.state, event) {
            (InvocationState::Pending, InvocationEvent::Validate) => {
                Some(InvocationState::Validating)
            }
            (InvocationState::Validating, InvocationEvent::Reject) => {
                Some(InvocationState::Rejected)
            }
            (InvocationState::Validating, InvocationEvent::Accept) => {
                Some(InvocationState::Running)
            }
            (InvocationState::Running, InvocationEvent::Complete) => {
                Some(InvocationState::Completed)
            }
            (InvocationState::Running, InvocationEvent::Fail) => Some(InvocationState::Failed),
            _ => None,
        };

        let Some(next_state) = next else {
            return Err(GateError::InvalidTransition {
                from: self.state,
                event,
            });
        };

        debug!(
            invocation = %self.id,
            tool = self.tool.as_str(),
            ?self.state,
            ?next_state,
            "invocation transition"
        );
        self.state = next_state;
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_completes() {
        let mut invocation = Invocation::new("isEven");
        assert_eq!(invocation.state(), InvocationState::Pending);
        invocation.transition(InvocationEvent::Validate).unwrap();
        invocation.transition(InvocationEvent::Accept).unwrap();
        invocation.transition(InvocationEvent::Complete).unwrap();
        assert!(invocation.state().is_terminal());
        assert_eq!(invocation.state(), InvocationState::Completed);
    }

    #[test]
    fn rejection_is_terminal_and_distinct_from_failure() {
        let mut rejected = Invocation::new("isEven");
        rejected.transition(InvocationEvent::Validate).unwrap();
        rejected.transition(InvocationEvent::Reject).unwrap();
        assert_eq!(rejected.state(), InvocationState::Rejected);
        assert!(rejected.state().is_terminal());

        let mut failed = Invocation::new("isEven");
        failed.transition(InvocationEvent::Validate).unwrap();
        failed.transition(InvocationEvent::Accept).unwrap();
        failed.transition(InvocationEvent::Fail).unwrap();
        assert_eq!(failed.state(), InvocationState::Failed);
        assert_ne!(rejected.state(), failed.state());
    }

    #[test]
    fn body_cannot_run_after_rejection() {
        let mut invocation = Invocation::new("isEven");
        invocation.transition(InvocationEvent::Validate).unwrap();
        invocation.transition(InvocationEvent::Reject).unwrap();
        let err = invocation
            .transition(InvocationEvent::Accept)
            .expect_err("accept after reject must fail");
        assert!(matches!(err, GateError::InvalidTransition { .. }));
    }

    #[test]
    fn completion_requires_running() {
        let mut invocation = Invocation::new("isEven");
        let err = invocation
            .transition(InvocationEvent::Complete)
            .expect_err("complete from pending must fail");
        assert!(matches!(err, GateError::InvalidTransition { .. }));
    }
}
