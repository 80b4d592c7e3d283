use serde::{Deserialize, Serialize};
use crate::enums::gate_status::GateStatus;

/// One metric threshold check of the quality gate.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub status: GateStatus,
    pub metric_key: String,
    #[serde(default)]
    pub comparator: String,
    #[serde(default)]
    pub error_threshold: Option<String>,
    #[serde(default)]
    pub actual_value: Option<String>,
    #[serde(default)]
    pub period_index: Option<u32>,
}

impl Condition {
    pub fn is_failing(&self) -> bool {
        self.status == GateStatus::Error
    }

    pub fn comparator_words(&self) -> &str {
        match self.comparator.as_str() {
            "GT" => "greater than",
            "LT" => "less than",
            "EQ" => "equal to",
            "NE" => "not equal to",
            other => other,
        }
    }

    pub fn violation_message(&self) -> String {
        format!(
            "Violated: {} is {} {}",
            self.actual_value.as_deref().unwrap_or("?"),
            self.comparator_words(),
            self.error_threshold.as_deref().unwrap_or("?"),
        )
    }
}
