use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use chrono::{DateTime, FixedOffset, Utc};
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::errors::{ErrorHandler, GateError, GateResult};
use crate::services::cert_truster::CertTruster;
use crate::services::descriptor_parser::DescriptorParser;
use crate::services::gate_pipeline::GatePipeline;
use crate::services::scanner_runner::ScannerRunner;
use crate::services::sonar_client::SonarClient;
use crate::structs::cli::Cli;
use crate::structs::config::pipeline_config::PipelineConfig;
use crate::structs::pipeline_outcome::PipelineOutcome;
use crate::traits::sonar_transport::SonarTransport;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self {
            start_time: None,
        }
    }

    pub async fn run(&mut self, cli: Cli) -> GateResult<()> {
        self.start_time = Some(Instant::now());

        let result = match &cli.command {
            Commands::Init { path } => self.init_command(path),
            Commands::Validate => self.validate_command(&cli).map(|_| ()),
            Commands::Scan => self.scan_command(&cli).await,
            Commands::Gate => self.gate_command(&cli).await,
        };

        if let Some(start) = self.start_time {
            log::info!("⏱️  Completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn init_command(&self, path: &str) -> GateResult<()> {
        log::info!("🚀 Initializing sonar-gate configuration...");
        ConfigManager::create_sample_config(path)?;
        log::info!("📝 Edit the file, then run 'sonar-gate validate' to check it.");
        Ok(())
    }

    fn validate_command(&self, cli: &Cli) -> GateResult<PipelineConfig> {
        let mut config = ConfigManager::load(cli.config.as_deref())?;
        cli.overrides.apply(&mut config);

        if let Err(errors) = ConfigManager::validate_config(&config) {
            ErrorHandler::handle_multiple_errors(&errors, "configuration validation");
            return Err(GateError::config_error(
                &format!("{} configuration problem(s)", errors.len()),
                None,
                Some("Fix the problems listed above"),
            ));
        }

        log::info!("✅ Configuration is valid");
        Ok(config)
    }

    async fn scan_command(&self, cli: &Cli) -> GateResult<()> {
        let config = self.validate_command(cli)?;
        if config.scanner.trust_server_cert {
            CertTruster::new(&config).run().await?;
        }

        let run_started_at: DateTime<FixedOffset> = Utc::now().into();

        log::info!("🔍 Starting code analysis against {}", config.server.host);
        ScannerRunner::new(&config).run().await?;

        self.check_gate(config, Some(run_started_at)).await.map(|_| ())
    }

    async fn gate_command(&self, cli: &Cli) -> GateResult<()> {
        let config = self.validate_command(cli)?;
        self.check_gate(config, None).await.map(|_| ())
    }

    async fn check_gate(&self, config: PipelineConfig, run_started_at: Option<DateTime<FixedOffset>>) -> GateResult<PipelineOutcome> {
        let descriptor = DescriptorParser::load(Path::new(&config.gate.descriptor_path), config.gate.descriptor_required)?;

        let transport: Arc<dyn SonarTransport> = Arc::new(SonarClient::new(
            config.server.token.as_deref(),
            Duration::from_secs(config.server.request_timeout_secs),
        )?);

        GatePipeline::new(transport, config)
            .run(descriptor.as_ref(), run_started_at)
            .await
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}
