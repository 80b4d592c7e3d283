use serde::{Deserialize, Serialize};

/// How the resolver decides that a fetched gate status belongs to this run.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMode {
    /// Accept whatever the endpoint reports on the first fetch.
    Immediate,
    /// Refetch until the newest period is dated at or after run start.
    FreshnessChecked,
}

impl Default for ResolutionMode {
    fn default() -> Self {
        ResolutionMode::FreshnessChecked
    }
}
