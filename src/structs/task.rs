use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use crate::enums::task_status::TaskStatus;
use crate::helpers::sonar_time;

/// A compute-engine task as reported by `api/ce/task`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,

    #[serde(rename = "type", default)]
    pub task_type: Option<String>,

    #[serde(default)]
    pub component_id: Option<String>,

    #[serde(default)]
    pub component_key: Option<String>,

    #[serde(default)]
    pub component_name: Option<String>,

    #[serde(default)]
    pub analysis_id: Option<String>,

    pub status: TaskStatus,

    #[serde(default, deserialize_with = "sonar_time::deserialize_optional")]
    pub submitted_at: Option<DateTime<FixedOffset>>,

    #[serde(default, deserialize_with = "sonar_time::deserialize_optional")]
    pub started_at: Option<DateTime<FixedOffset>>,

    #[serde(default, deserialize_with = "sonar_time::deserialize_optional")]
    pub executed_at: Option<DateTime<FixedOffset>>,

    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TaskResponse {
    pub task: Task,
}
