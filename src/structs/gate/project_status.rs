use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use crate::enums::gate_status::GateStatus;
use crate::structs::gate::condition::Condition;
use crate::structs::gate::period::Period;

/// Body of `api/qualitygates/project_status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusResponse {
    #[serde(default)]
    pub project_status: Option<ProjectStatus>,
    #[serde(default)]
    pub errors: Vec<ApiErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorMessage {
    pub msg: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatus {
    pub status: GateStatus,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub periods: Vec<Period>,
    /// Newer servers report a single period instead of the list.
    #[serde(default)]
    pub period: Option<Period>,
    #[serde(default)]
    pub ignored_conditions: bool,
}

impl ProjectStatus {
    /// Date of the most recent period, used to tell a recomputed gate from a stale one.
    pub fn latest_period_date(&self) -> Option<DateTime<FixedOffset>> {
        self.periods
            .iter()
            .chain(self.period.iter())
            .filter_map(|p| p.date)
            .max()
    }
}
