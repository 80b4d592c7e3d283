use crate::config::constants::{
    DEFAULT_DESCRIPTOR_PATH, DEFAULT_EXPECTED_STATUS, DEFAULT_FRESHNESS_BACKOFF_SECS,
    DEFAULT_FRESHNESS_MAX_WAIT_SECS, DEFAULT_OVERALL_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_REPORT_PATH, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SCANNER_PATH, DEFAULT_SONAR_HOST,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_host() -> String {
        DEFAULT_SONAR_HOST.to_string()
    }

    pub fn default_scanner_path() -> String {
        DEFAULT_SCANNER_PATH.to_string()
    }

    pub fn default_sources() -> String {
        ".".to_string()
    }

    pub fn default_ws_timeout() -> u64 {
        60
    }

    pub fn default_log_level() -> String {
        "INFO".to_string()
    }

    pub fn default_expected_status() -> String {
        DEFAULT_EXPECTED_STATUS.to_string()
    }

    pub fn default_gate_enforced() -> bool {
        true
    }

    pub fn default_poll_interval_ms() -> u64 {
        DEFAULT_POLL_INTERVAL_MS
    }

    pub fn default_overall_timeout_secs() -> u64 {
        DEFAULT_OVERALL_TIMEOUT_SECS
    }

    pub fn default_freshness_backoff_secs() -> u64 {
        DEFAULT_FRESHNESS_BACKOFF_SECS
    }

    pub fn default_freshness_max_wait_secs() -> u64 {
        DEFAULT_FRESHNESS_MAX_WAIT_SECS
    }

    pub fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    pub fn default_descriptor_path() -> String {
        DEFAULT_DESCRIPTOR_PATH.to_string()
    }

    pub fn default_descriptor_required() -> bool {
        true
    }

    pub fn default_report_path() -> String {
        DEFAULT_REPORT_PATH.to_string()
    }
}
