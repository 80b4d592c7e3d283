use std::process::Stdio;
use tokio::process::Command;
use crate::errors::{GateError, GateResult};
use crate::structs::config::pipeline_config::PipelineConfig;

/// Invokes `sonar-scanner` with settings derived from the pipeline configuration.
pub struct ScannerRunner {
    program: String,
    args: Vec<String>,
}

impl ScannerRunner {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            program: config.scanner.scanner_path.clone(),
            args: Self::build_args(config),
        }
    }

    pub fn build_args(config: &PipelineConfig) -> Vec<String> {
        let scanner = &config.scanner;
        let mut args = vec![format!("-Dsonar.host.url={}", config.server.host)];

        if let Some(token) = config.server.token.as_ref().filter(|t| !t.is_empty()) {
            args.push(format!("-Dsonar.login={}", token));
        }

        if !scanner.using_properties {
            let mut push = |name: &str, value: Option<&str>| {
                if let Some(value) = value.filter(|v| !v.is_empty()) {
                    args.push(format!("-Dsonar.{}={}", name, value));
                }
            };
            push("projectKey", config.project_key().as_deref());
            push("projectName", scanner.name.as_deref());
            push("projectVersion", scanner.version.as_deref());
            push("sources", Some(scanner.sources.as_str()));
            push("ws.timeout", Some(scanner.ws_timeout.to_string().as_str()));
            push("inclusions", scanner.inclusions.as_deref());
            push("exclusions", scanner.exclusions.as_deref());
            push("log.level", Some(scanner.log_level.as_str()));
            push("showProfiling", Some(if scanner.show_profiling { "true" } else { "false" }));
            push("scm.provider", Some("git"));
        }

        if scanner.branch_analysis {
            if let Some(branch) = config.gate.branch.as_ref().filter(|b| !b.is_empty()) {
                args.push(format!("-Dsonar.branch.name={}", branch));
            }
        }

        args
    }

    /// Arguments with the token masked, for logging.
    pub fn redacted_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                if arg.starts_with("-Dsonar.login=") {
                    "-Dsonar.login=****".to_string()
                } else {
                    arg.clone()
                }
            })
            .collect()
    }

    pub async fn run(&self) -> GateResult<()> {
        log::info!("==> Code Analysis Result:");
        log::debug!("==> Executing: {} {}", self.program, self.redacted_args().join(" "));

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| GateError::ScannerFailed {
                reason: format!("could not start '{}': {}", self.program, e),
                exit_code: None,
            })?;

        if !status.success() {
            return Err(GateError::ScannerFailed {
                reason: "analysis did not complete".to_string(),
                exit_code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.server.host = "https://sonar.example.com".to_string();
        config.server.token = Some("squ_secret".to_string());
        config.scanner.key = Some("my-org/my-app".to_string());
        config.scanner.name = Some("my-app".to_string());
        config
    }

    #[test]
    fn builds_project_arguments() {
        let args = ScannerRunner::build_args(&config());
        assert_eq!(args[0], "-Dsonar.host.url=https://sonar.example.com");
        assert!(args.contains(&"-Dsonar.login=squ_secret".to_string()));
        assert!(args.contains(&"-Dsonar.projectKey=my-org:my-app".to_string()));
        assert!(args.contains(&"-Dsonar.projectName=my-app".to_string()));
        assert!(args.contains(&"-Dsonar.scm.provider=git".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("-Dsonar.inclusions")));
    }

    #[test]
    fn properties_mode_only_passes_connection_settings() {
        let mut config = config();
        config.scanner.using_properties = true;
        let args = ScannerRunner::build_args(&config);
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn branch_argument_needs_branch_analysis() {
        let mut config = config();
        config.gate.branch = Some("feature/x".to_string());
        assert!(!ScannerRunner::build_args(&config).iter().any(|a| a.starts_with("-Dsonar.branch.name")));

        config.scanner.branch_analysis = true;
        assert!(ScannerRunner::build_args(&config).contains(&"-Dsonar.branch.name=feature/x".to_string()));
    }

    #[test]
    fn token_is_masked_in_logged_arguments() {
        let runner = ScannerRunner::new(&config());
        assert!(runner.redacted_args().contains(&"-Dsonar.login=****".to_string()));
        assert!(!runner.redacted_args().iter().any(|a| a.contains("squ_secret")));
    }

    #[tokio::test]
    async fn missing_scanner_binary_is_reported() {
        let mut config = config();
        config.scanner.scanner_path = "/nonexistent/sonar-scanner".to_string();
        let result = ScannerRunner::new(&config).run().await;
        assert!(matches!(result, Err(GateError::ScannerFailed { exit_code: None, .. })));
    }
}
