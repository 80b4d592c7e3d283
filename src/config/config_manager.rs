use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{DEFAULT_CONFIG_FILE_NAME, HOME_CONFIG_RELATIVE_PATH};
use crate::enums::gate_lookup::GateLookup;
use crate::enums::gate_status::GateStatus;
use crate::errors::{GateError, GateResult};
use crate::structs::config::pipeline_config::PipelineConfig;

const SAMPLE_CONFIG: &str = r#"# sonar-gate configuration
# Every value can also be set through a flag or environment variable,
# which takes precedence over this file (see `sonar-gate --help`).

[server]
host = "https://sonarqube.example.com"
# token = "..."          # prefer the SONAR_TOKEN environment variable
request_timeout_secs = 10

[scanner]
scanner_path = "sonar-scanner"
key = "my-org/my-project"  # '/' becomes ':' in the project key
name = "my-project"
sources = "."
# inclusions = "src/**"
# exclusions = "**/vendor/**"
log_level = "INFO"
show_profiling = false
ws_timeout = 60
branch_analysis = false
using_properties = false   # true: leave project settings to sonar-project.properties
trust_server_cert = false  # true: add the server certificate to the JVM trust store first

[gate]
expected_status = "OK"
gate_enforced = true
# branch = "main"
poll_interval_ms = 500
overall_timeout_secs = 300
resolution_mode = "freshness-checked"  # or "immediate"
freshness_backoff_secs = 30
freshness_max_wait_secs = 300
lookup = "analysis-id"                 # or "project-key"
descriptor_path = ".scannerwork/report-task.txt"
descriptor_required = true

[report]
enabled = false
path = "sonar-quality-gate.xml"
"#;

pub struct ConfigManager;

impl ConfigManager {

    /// Loads the first configuration found: the explicit path, the working
    /// directory file, then the home directory file. Falls back to defaults.
    pub fn load(explicit_path: Option<&str>) -> GateResult<PipelineConfig> {
        if let Some(path) = explicit_path {
            let path = Path::new(path);
            if !path.exists() {
                return Err(GateError::config_error(
                    &format!("Configuration file '{}' does not exist", path.display()),
                    None,
                    Some("Run 'sonar-gate init' to create one"),
                ));
            }
            return Self::load_from(path);
        }

        for candidate in Self::candidate_locations() {
            if candidate.exists() {
                return Self::load_from(&candidate);
            }
        }

        log::debug!("No configuration file found, using defaults");
        Ok(PipelineConfig::default())
    }

    fn candidate_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE_NAME)];
        if let Some(home) = dirs::home_dir() {
            locations.push(home.join(HOME_CONFIG_RELATIVE_PATH));
        }
        locations
    }

    fn load_from(path: &Path) -> GateResult<PipelineConfig> {
        log::info!("📋 Loading config from: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| GateError::Io {
            operation: format!("reading {}", path.display()),
            reason: e.to_string(),
        })?;
        let config: PipelineConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn create_sample_config(path: &str) -> GateResult<()> {
        let path = Path::new(path);
        if path.exists() {
            return Err(GateError::config_error(
                &format!("'{}' already exists", path.display()),
                None,
                Some("Remove it or pass a different --path"),
            ));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, SAMPLE_CONFIG)?;
        log::info!("✅ Created sample config at: {}", path.display());
        Ok(())
    }

    pub fn validate_config(config: &PipelineConfig) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if config.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        } else if !config.server.host.starts_with("http://") && !config.server.host.starts_with("https://") {
            errors.push(format!("server.host '{}' must start with http:// or https://", config.server.host));
        }

        if let Err(e) = config.gate.expected_status.parse::<GateStatus>() {
            errors.push(e.to_string());
        }

        if config.gate.poll_interval_ms == 0 {
            errors.push("gate.poll_interval_ms must be greater than zero".to_string());
        }

        if config.gate.overall_timeout_secs == 0 {
            errors.push("gate.overall_timeout_secs must be greater than zero".to_string());
        }

        if config.gate.poll_interval_ms / 1000 >= config.gate.overall_timeout_secs {
            errors.push("gate.poll_interval_ms must be shorter than gate.overall_timeout_secs".to_string());
        }

        if config.server.request_timeout_secs == 0 {
            errors.push("server.request_timeout_secs must be greater than zero".to_string());
        }

        if config.gate.lookup == GateLookup::ProjectKey && config.project_key().is_none() && !config.gate.descriptor_required {
            errors.push("gate.lookup = \"project-key\" needs scanner.key when the descriptor is optional".to_string());
        }

        if config.report.enabled && config.report.path.trim().is_empty() {
            errors.push("report.path must not be empty when the report is enabled".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

}
