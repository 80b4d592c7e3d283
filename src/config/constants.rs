use std::time::Duration;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "sonar-gate.toml";
pub const HOME_CONFIG_RELATIVE_PATH: &str = ".sonar-gate/config.toml";

pub const DEFAULT_SONAR_HOST: &str = "http://localhost:9000";
pub const DEFAULT_SCANNER_PATH: &str = "sonar-scanner";
pub const DEFAULT_DESCRIPTOR_PATH: &str = ".scannerwork/report-task.txt";
pub const DEFAULT_REPORT_PATH: &str = "sonar-quality-gate.xml";
pub const DEFAULT_EXPECTED_STATUS: &str = "OK";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_OVERALL_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_FRESHNESS_BACKOFF_SECS: u64 = 30;
pub const DEFAULT_FRESHNESS_MAX_WAIT_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const KEYTOOL_PROGRAM: &str = "keytool";
pub const CACERTS_RELATIVE_PATH: &str = "lib/security/cacerts";
pub const CACERTS_STORE_PASSWORD: &str = "changeit";

pub const QUALITY_GATE_STATUS_PATH: &str = "/api/qualitygates/project_status";
pub const REPORT_SUITES_NAME: &str = "SonarQube Quality Gate";

/// Timestamp layout used by the Sonar web API, e.g. `2024-03-01T10:15:30+0100`.
pub const SONAR_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

pub fn sleep_duration_secs(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

pub fn sleep_duration_millis(milliseconds: u64) -> Duration {
    Duration::from_millis(milliseconds)
}
