use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "ConfigHelper::default_report_path")]
    pub path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: ConfigHelper::default_report_path(),
        }
    }
}
