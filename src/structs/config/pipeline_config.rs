use serde::{Deserialize, Serialize};
use crate::structs::config::gate_config::GateConfig;
use crate::structs::config::report_config::ReportConfig;
use crate::structs::config::scanner_config::ScannerConfig;
use crate::structs::config::server_config::ServerConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PipelineConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub gate: GateConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl PipelineConfig {
    /// Project key as the server knows it; `/` in repository names becomes `:`.
    pub fn project_key(&self) -> Option<String> {
        self.scanner.key.as_ref().map(|key| key.replace('/', ":"))
    }
}
