use std::path::Path;
use std::sync::Arc;
use chrono::{DateTime, FixedOffset, Utc};
use crate::enums::gate_lookup::GateLookup;
use crate::enums::gate_query::GateQuery;
use crate::enums::gate_status::GateStatus;
use crate::enums::resolution_mode::ResolutionMode;
use crate::errors::{GateError, GateResult};
use crate::services::gate_resolver::GateResolver;
use crate::services::report_exporter::ReportExporter;
use crate::services::task_poller::TaskPoller;
use crate::services::verdict_evaluator::VerdictEvaluator;
use crate::structs::config::pipeline_config::PipelineConfig;
use crate::structs::pipeline_outcome::PipelineOutcome;
use crate::structs::report_descriptor::ReportDescriptor;
use crate::structs::task::Task;
use crate::structs::verdict::Verdict;
use crate::traits::sonar_transport::SonarTransport;

/// Poll, resolve, evaluate and export, in that order, for one analysis.
pub struct GatePipeline {
    transport: Arc<dyn SonarTransport>,
    config: PipelineConfig,
}

impl GatePipeline {
    pub fn new(transport: Arc<dyn SonarTransport>, config: PipelineConfig) -> Self {
        Self {
            transport,
            config,
        }
    }

    /// Runs the gate check. `run_started_at` is when this run's analysis
    /// began; when unknown, the task's submission time stands in for it.
    pub async fn run(&self, descriptor: Option<&ReportDescriptor>, run_started_at: Option<DateTime<FixedOffset>>) -> GateResult<PipelineOutcome> {
        let expected: GateStatus = self.config.gate.expected_status.parse()?;

        let (project_key, verdict) = match descriptor {
            Some(descriptor) => {
                let task = TaskPoller::new(Arc::clone(&self.transport), self.config.gate.poll_interval())
                    .await_completion(&descriptor.task_url, self.config.gate.overall_timeout())
                    .await?;

                let run_started_at = run_started_at
                    .or(task.submitted_at)
                    .or(task.started_at)
                    .unwrap_or_else(|| Utc::now().into());
                let query = self.query_for(descriptor, &task);
                let verdict = self
                    .resolver(&descriptor.server_url)
                    .resolve(&query, run_started_at)
                    .await?;
                (descriptor.project_key.clone(), verdict)
            }
            None => {
                let project_key = self.config.project_key().ok_or_else(|| {
                    GateError::config_error(
                        "No report descriptor and no project key to query the gate with",
                        Some("scanner.key"),
                        Some("Set PLUGIN_KEY or make the descriptor required"),
                    )
                })?;
                let query = GateQuery::Project {
                    project_key: project_key.clone(),
                    branch: self.config.gate.branch.clone(),
                };
                let verdict = self
                    .resolver(&self.config.server.host)
                    .resolve_with_mode(&query, run_started_at.unwrap_or_else(|| Utc::now().into()), ResolutionMode::Immediate)
                    .await?;
                (project_key, verdict)
            }
        };

        Self::log_verdict(&verdict);

        let evaluation = VerdictEvaluator::evaluate(&verdict, expected, self.config.gate.gate_enforced);

        let report_path = if self.config.report.enabled {
            Some(ReportExporter::new(&project_key).export(&verdict.conditions, Path::new(&self.config.report.path))?)
        } else {
            None
        };

        if let Some(dashboard) = descriptor.and_then(|d| d.dashboard_url.as_deref()) {
            log::info!("🔗 Dashboard: {}", dashboard);
        }

        if evaluation.warning {
            log::warn!("⚠️ {}", evaluation.message);
        } else if evaluation.pass {
            log::info!("✅ {}", evaluation.message);
        } else {
            log::error!("❌ {}", evaluation.message);
        }

        let evaluation = evaluation.into_result()?;

        Ok(PipelineOutcome {
            verdict,
            evaluation,
            report_path,
        })
    }

    fn resolver(&self, server_url: &str) -> GateResolver {
        GateResolver::new(
            Arc::clone(&self.transport),
            server_url,
            self.config.gate.resolution_mode,
            self.config.gate.freshness_backoff(),
            self.config.gate.freshness_max_wait(),
        )
    }

    fn query_for(&self, descriptor: &ReportDescriptor, task: &Task) -> GateQuery {
        let project_query = || GateQuery::Project {
            project_key: descriptor.project_key.clone(),
            branch: self.config.gate.branch.clone().or_else(|| descriptor.branch.clone()),
        };

        match (self.config.gate.lookup, task.analysis_id.as_ref()) {
            (GateLookup::AnalysisId, Some(analysis_id)) => GateQuery::Analysis {
                analysis_id: analysis_id.clone(),
            },
            (GateLookup::AnalysisId, None) => {
                log::warn!("⚠️ Task {} has no analysis id, querying the gate by project key", task.id);
                project_query()
            }
            (GateLookup::ProjectKey, _) => project_query(),
        }
    }

    fn log_verdict(verdict: &Verdict) {
        log::info!(
            "{} Quality gate status: {}{}",
            verdict.status.emoji(),
            verdict.status,
            if verdict.is_fresh { "" } else { " (freshness not verified)" }
        );
        for condition in &verdict.conditions {
            if condition.is_failing() {
                log::info!("   ❌ {}: {}", condition.metric_key, condition.violation_message());
            } else {
                log::info!("   {} {}: {}", condition.status.emoji(), condition.metric_key, condition.actual_value.as_deref().unwrap_or("-"));
            }
        }
    }
}
