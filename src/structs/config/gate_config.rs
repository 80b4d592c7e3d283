use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::config::constants::{sleep_duration_millis, sleep_duration_secs};
use crate::enums::gate_lookup::GateLookup;
use crate::enums::resolution_mode::ResolutionMode;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GateConfig {
    #[serde(default = "ConfigHelper::default_expected_status")]
    pub expected_status: String,

    #[serde(default = "ConfigHelper::default_gate_enforced")]
    pub gate_enforced: bool,

    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default = "ConfigHelper::default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "ConfigHelper::default_overall_timeout_secs")]
    pub overall_timeout_secs: u64,

    #[serde(default)]
    pub resolution_mode: ResolutionMode,

    #[serde(default = "ConfigHelper::default_freshness_backoff_secs")]
    pub freshness_backoff_secs: u64,

    #[serde(default = "ConfigHelper::default_freshness_max_wait_secs")]
    pub freshness_max_wait_secs: u64,

    #[serde(default)]
    pub lookup: GateLookup,

    #[serde(default = "ConfigHelper::default_descriptor_path")]
    pub descriptor_path: String,

    #[serde(default = "ConfigHelper::default_descriptor_required")]
    pub descriptor_required: bool,
}

impl GateConfig {
    pub fn poll_interval(&self) -> Duration {
        sleep_duration_millis(self.poll_interval_ms)
    }

    pub fn overall_timeout(&self) -> Duration {
        sleep_duration_secs(self.overall_timeout_secs)
    }

    pub fn freshness_backoff(&self) -> Duration {
        sleep_duration_secs(self.freshness_backoff_secs)
    }

    pub fn freshness_max_wait(&self) -> Duration {
        sleep_duration_secs(self.freshness_max_wait_secs)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            expected_status: ConfigHelper::default_expected_status(),
            gate_enforced: ConfigHelper::default_gate_enforced(),
            branch: None,
            poll_interval_ms: ConfigHelper::default_poll_interval_ms(),
            overall_timeout_secs: ConfigHelper::default_overall_timeout_secs(),
            resolution_mode: ResolutionMode::default(),
            freshness_backoff_secs: ConfigHelper::default_freshness_backoff_secs(),
            freshness_max_wait_secs: ConfigHelper::default_freshness_max_wait_secs(),
            lookup: GateLookup::default(),
            descriptor_path: ConfigHelper::default_descriptor_path(),
            descriptor_required: ConfigHelper::default_descriptor_required(),
        }
    }
}
