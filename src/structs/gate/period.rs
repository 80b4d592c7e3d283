use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use crate::helpers::sonar_time;

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, deserialize_with = "sonar_time::deserialize_optional")]
    pub date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub parameter: Option<String>,
}
