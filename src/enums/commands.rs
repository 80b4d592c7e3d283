use clap::Subcommand;
use crate::config::constants::DEFAULT_CONFIG_FILE_NAME;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run sonar-scanner, then wait for the quality gate verdict
    Scan,
    /// Check the quality gate of an analysis that already ran in this workspace
    Gate,
    /// Write a sample configuration file
    Init {
        #[clap(short, long, default_value = DEFAULT_CONFIG_FILE_NAME)]
        path: String,
    },
    /// Load and validate the configuration
    Validate,
}
