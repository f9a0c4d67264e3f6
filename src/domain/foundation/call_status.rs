//! CallStatus enum tracking the lifecycle of an outbound survey call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Lifecycle status of an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    /// Recorded locally, not yet accepted by the voice platform.
    #[default]
    Pending,
    /// Accepted by the voice platform; awaiting the post-call webhook.
    InProgress,
    Completed,
    Failed,
}

impl CallStatus {
    pub const ALL: [CallStatus; 4] = [
        CallStatus::Pending,
        CallStatus::InProgress,
        CallStatus::Completed,
        CallStatus::Failed,
    ];

    /// Returns true once no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CallStatus::Completed | CallStatus::Failed)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Pending -> InProgress
    /// - Pending -> Failed
    /// - InProgress -> Completed
    /// - InProgress -> Failed
    pub fn can_transition_to(&self, target: &CallStatus) -> bool {
        use CallStatus::*;
        matches!(
            (self, target),
            (Pending, InProgress) | (Pending, Failed) | (InProgress, Completed) | (InProgress, Failed)
        )
    }

    /// Performs the transition, rejecting moves the lifecycle does not allow.
    pub fn transition_to(&self, target: CallStatus) -> Result<CallStatus, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "status",
                format!("Cannot transition from {} to {}", self, target),
            ))
        }
    }

    /// Database and query-string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Pending => "pending",
            CallStatus::InProgress => "in_progress",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CallStatus::Pending),
            "in_progress" => Ok(CallStatus::InProgress),
            "completed" => Ok(CallStatus::Completed),
            "failed" => Ok(CallStatus::Failed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown call status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(CallStatus::default(), CallStatus::Pending);
    }

    #[test]
    fn pending_moves_forward_only() {
        assert!(CallStatus::Pending.can_transition_to(&CallStatus::InProgress));
        assert!(CallStatus::Pending.can_transition_to(&CallStatus::Failed));
        assert!(!CallStatus::Pending.can_transition_to(&CallStatus::Completed));
        assert!(!CallStatus::Pending.can_transition_to(&CallStatus::Pending));
    }

    #[test]
    fn in_progress_ends_in_completed_or_failed() {
        assert!(CallStatus::InProgress.can_transition_to(&CallStatus::Completed));
        assert!(CallStatus::InProgress.can_transition_to(&CallStatus::Failed));
        assert!(!CallStatus::InProgress.can_transition_to(&CallStatus::Pending));
    }

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [CallStatus::Completed, CallStatus::Failed] {
            assert!(terminal.is_terminal());
            for target in CallStatus::ALL {
                assert!(!terminal.can_transition_to(&target));
            }
        }
    }

    #[test]
    fn transition_to_reports_invalid_move() {
        let err = CallStatus::Completed
            .transition_to(CallStatus::InProgress)
            .unwrap_err();
        assert!(err.to_string().contains("completed to in_progress"));
    }

    #[test]
    fn string_form_round_trips() {
        for status in CallStatus::ALL {
            assert_eq!(status.as_str().parse::<CallStatus>().unwrap(), status);
        }
        assert!("ringing".parse::<CallStatus>().is_err());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&CallStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
