use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Success,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failed | TaskStatus::Canceled)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TaskStatus::Failed | TaskStatus::Canceled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Success => "SUCCESS",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Canceled => "CANCELED",
            TaskStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_spelling() {
        let status: TaskStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
        assert!(!status.is_terminal());
    }

    #[test]
    fn unrecognised_status_is_not_terminal() {
        let status: TaskStatus = serde_json::from_str("\"QUEUED_SOMEWHERE\"").unwrap();
        assert_eq!(status, TaskStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn failed_and_canceled_are_terminal_failures() {
        assert!(TaskStatus::Failed.is_failure());
        assert!(TaskStatus::Canceled.is_failure());
        assert!(TaskStatus::Success.is_terminal());
        assert!(!TaskStatus::Success.is_failure());
    }
}
