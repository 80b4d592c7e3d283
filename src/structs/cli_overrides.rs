use clap::Args;
use crate::enums::gate_lookup::GateLookup;
use crate::enums::resolution_mode::ResolutionMode;
use crate::structs::config::pipeline_config::PipelineConfig;

/// Flags and environment variables that take precedence over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct CliOverrides {
    /// Sonar host URL
    #[clap(long, global = true, env = "SONAR_HOST")]
    pub host: Option<String>,

    /// Sonar authentication token
    #[clap(long, global = true, env = "SONAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Project key
    #[clap(long, global = true, env = "PLUGIN_KEY")]
    pub key: Option<String>,

    /// Project name
    #[clap(long, global = true, env = "PLUGIN_NAME")]
    pub name: Option<String>,

    /// Project version
    #[clap(long = "project-version", global = true, env = "PLUGIN_BUILD_NUMBER")]
    pub version: Option<String>,

    /// Branch to analyze and to query the gate for
    #[clap(long, global = true, env = "PLUGIN_BRANCH")]
    pub branch: Option<String>,

    /// Expected quality gate status
    #[clap(long, global = true, env = "PLUGIN_QUALITYGATE")]
    pub quality: Option<String>,

    /// Fail the pipeline when the gate does not match the expected status
    #[clap(long, global = true, env = "PLUGIN_QUALITYGATE_ENABLED")]
    pub enforce: Option<bool>,

    /// Overall task timeout in seconds
    #[clap(long, global = true, env = "PLUGIN_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Task poll interval in milliseconds
    #[clap(long, global = true, env = "PLUGIN_POLL_INTERVAL_MS")]
    pub poll_interval_ms: Option<u64>,

    #[clap(long, global = true, value_enum, env = "PLUGIN_RESOLUTION_MODE")]
    pub resolution_mode: Option<ResolutionMode>,

    #[clap(long, global = true, value_enum, env = "PLUGIN_GATE_LOOKUP")]
    pub lookup: Option<GateLookup>,

    /// Write a JUnit report of the gate conditions
    #[clap(long, global = true, env = "PLUGIN_JUNIT_REPORT")]
    pub report: Option<bool>,

    /// Add the Sonar server certificate to the JVM trust store before scanning
    #[clap(long, global = true, env = "PLUGIN_TRUST_SERVER_CERT")]
    pub trust_server_cert: Option<bool>,

    /// Path of the scanner's report descriptor
    #[clap(long, global = true, env = "PLUGIN_DESCRIPTOR")]
    pub descriptor: Option<String>,
}

impl CliOverrides {
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(token) = &self.token {
            config.server.token = Some(token.clone());
        }
        if let Some(key) = &self.key {
            config.scanner.key = Some(key.clone());
        }
        if let Some(name) = &self.name {
            config.scanner.name = Some(name.clone());
        }
        if let Some(version) = &self.version {
            config.scanner.version = Some(version.clone());
        }
        if let Some(branch) = &self.branch {
            config.gate.branch = Some(branch.clone());
        }
        if let Some(quality) = &self.quality {
            config.gate.expected_status = quality.clone();
        }
        if let Some(enforce) = self.enforce {
            config.gate.gate_enforced = enforce;
        }
        if let Some(timeout) = self.timeout {
            config.gate.overall_timeout_secs = timeout;
        }
        if let Some(poll_interval_ms) = self.poll_interval_ms {
            config.gate.poll_interval_ms = poll_interval_ms;
        }
        if let Some(mode) = self.resolution_mode {
            config.gate.resolution_mode = mode;
        }
        if let Some(lookup) = self.lookup {
            config.gate.lookup = lookup;
        }
        if let Some(report) = self.report {
            config.report.enabled = report;
        }
        if let Some(trust) = self.trust_server_cert {
            config.scanner.trust_server_cert = trust;
        }
        if let Some(descriptor) = &self.descriptor {
            config.gate.descriptor_path = descriptor.clone();
        }
    }
}
