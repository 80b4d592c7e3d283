use serde::{Deserialize, Serialize};

/// Which query parameters the gate endpoint is called with.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GateLookup {
    AnalysisId,
    ProjectKey,
}

impl Default for GateLookup {
    fn default() -> Self {
        GateLookup::AnalysisId
    }
}
