use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use crate::enums::task_status::TaskStatus;
use crate::errors::{GateError, GateResult};
use crate::structs::task::{Task, TaskResponse};
use crate::traits::sonar_transport::SonarTransport;

/// Waits for the server-side processing task of an analysis to finish.
pub struct TaskPoller {
    transport: Arc<dyn SonarTransport>,
    poll_interval: Duration,
}

impl TaskPoller {
    pub fn new(transport: Arc<dyn SonarTransport>, poll_interval: Duration) -> Self {
        Self {
            transport,
            poll_interval,
        }
    }

    /// Polls `task_url` on a fixed tick until the task reaches a terminal
    /// status or `timeout` elapses, whichever fires first.
    ///
    /// The deadline is armed once and raced against both the tick and every
    /// in-flight request, so a response arriving after the deadline is
    /// discarded. Failed polls are retried by the next tick.
    pub async fn await_completion(&self, task_url: &str, timeout: Duration) -> GateResult<Task> {
        if self.poll_interval.is_zero() {
            return Err(GateError::config_error(
                "Task poll interval must be greater than zero",
                Some("gate.poll_interval_ms"),
                Some("Use a poll interval of at least 1ms"),
            ));
        }

        let started = Instant::now();
        let deadline = sleep(timeout);
        tokio::pin!(deadline);

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last_status: Option<TaskStatus> = None;
        let mut last_error: Option<String> = None;

        let timed_out = |last_status: Option<TaskStatus>, last_error: Option<String>| GateError::Timeout {
            operation: "the analysis task to complete".to_string(),
            waited: timeout,
            last_status: last_status.map(|s| s.to_string()),
            last_error,
        };

        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => return Err(timed_out(last_status, last_error)),
                _ = ticker.tick() => {}
            }

            let polled = tokio::select! {
                biased;
                _ = &mut deadline => return Err(timed_out(last_status, last_error)),
                polled = self.fetch_task(task_url) => polled,
            };

            let task = match polled {
                Ok(task) => task,
                Err(e) => {
                    log::warn!("⚠️ Task status request failed, retrying: {}", e);
                    last_error = Some(e.to_string());
                    continue;
                }
            };

            last_status = Some(task.status);
            if task.status.is_failure() {
                log::error!("❌ Analysis task {} ended with status \"{}\"", task.id, task.status);
                return Err(GateError::TaskFailed {
                    task_id: task.id,
                    status: task.status.to_string(),
                    reason: task.error_message,
                });
            }

            if task.status.is_terminal() {
                match task.executed_at {
                    Some(executed_at) => log::info!("✅ Analysis completed on {} with status \"{}\"", executed_at, task.status),
                    None => log::info!("✅ Analysis completed with status \"{}\"", task.status),
                }
                return Ok(task);
            }

            let elapsed = started.elapsed().as_secs_f64();
            match task.started_at {
                Some(started_at) => log::info!(
                    "⏳ Awaiting completion of analysis. Current status is \"{}\" ({:.1}s elapsed). Analysis started on {}.",
                    task.status, elapsed, started_at
                ),
                None => log::info!(
                    "⏳ Awaiting completion of analysis. Current status is \"{}\" ({:.1}s elapsed).",
                    task.status, elapsed
                ),
            }
        }
    }

    async fn fetch_task(&self, task_url: &str) -> GateResult<Task> {
        let reply = self.transport.get(task_url, &[]).await?;
        if !reply.is_success() {
            return Err(GateError::Network {
                operation: "task status request".to_string(),
                url: Some(task_url.to_string()),
                status_code: Some(reply.status),
                reason: reply.body.chars().take(200).collect(),
            });
        }

        let response: TaskResponse = serde_json::from_str(&reply.body)?;
        Ok(response.task)
    }
}
