use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScannerConfig {
    #[serde(default = "ConfigHelper::default_scanner_path")]
    pub scanner_path: String,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default = "ConfigHelper::default_sources")]
    pub sources: String,

    #[serde(default)]
    pub inclusions: Option<String>,

    #[serde(default)]
    pub exclusions: Option<String>,

    #[serde(default = "ConfigHelper::default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub show_profiling: bool,

    #[serde(default = "ConfigHelper::default_ws_timeout")]
    pub ws_timeout: u64,

    /// Pass `-Dsonar.branch.name`; needs a server edition with branch support.
    #[serde(default)]
    pub branch_analysis: bool,

    /// Leave project settings to `sonar-project.properties`.
    #[serde(default)]
    pub using_properties: bool,

    /// Import the server's TLS certificate into `$JAVA_HOME/lib/security/cacerts` before scanning.
    #[serde(default)]
    pub trust_server_cert: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scanner_path: ConfigHelper::default_scanner_path(),
            key: None,
            name: None,
            version: None,
            sources: ConfigHelper::default_sources(),
            inclusions: None,
            exclusions: None,
            log_level: ConfigHelper::default_log_level(),
            show_profiling: false,
            ws_timeout: ConfigHelper::default_ws_timeout(),
            branch_analysis: false,
            using_properties: false,
            trust_server_cert: false,
        }
    }
}
