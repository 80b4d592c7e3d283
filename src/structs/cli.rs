use clap::Parser;
use crate::enums::commands::Commands;
use crate::structs::cli_overrides::CliOverrides;

#[derive(Parser, Debug)]
#[clap(name = "sonar-gate", version)]
#[clap(about = "Run sonar-scanner and enforce the SonarQube quality gate", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[clap(short, long, global = true, env = "PLUGIN_CONFIG")]
    pub config: Option<String>,

    #[clap(flatten)]
    pub overrides: CliOverrides,

    #[clap(subcommand)]
    pub command: Commands,
}
