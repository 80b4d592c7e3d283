use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, FixedOffset};
use tokio::time::{sleep, Instant};
use crate::config::constants::QUALITY_GATE_STATUS_PATH;
use crate::enums::gate_query::GateQuery;
use crate::enums::resolution_mode::ResolutionMode;
use crate::errors::{GateError, GateResult};
use crate::structs::gate::project_status::{ProjectStatus, ProjectStatusResponse};
use crate::structs::verdict::Verdict;
use crate::traits::sonar_transport::SonarTransport;

pub struct GateResolver {
    transport: Arc<dyn SonarTransport>,
    server_url: String,
    mode: ResolutionMode,
    backoff: Duration,
    max_wait: Duration,
}

impl GateResolver {
    pub fn new(transport: Arc<dyn SonarTransport>, server_url: &str, mode: ResolutionMode, backoff: Duration, max_wait: Duration) -> Self {
        Self {
            transport,
            server_url: server_url.trim_end_matches('/').to_string(),
            mode,
            backoff,
            max_wait,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server_url, QUALITY_GATE_STATUS_PATH)
    }

    pub async fn resolve(&self, query: &GateQuery, run_started_at: DateTime<FixedOffset>) -> GateResult<Verdict> {
        self.resolve_with_mode(query, run_started_at, self.mode).await
    }

    pub async fn resolve_with_mode(&self, query: &GateQuery, run_started_at: DateTime<FixedOffset>, mode: ResolutionMode) -> GateResult<Verdict> {
        log::info!("🚦 Fetching quality gate status for {}", query.describe());
        let started = Instant::now();

        loop {
            let status = self.fetch_status(query).await?;

            if mode == ResolutionMode::Immediate {
                return Ok(Self::into_verdict(status, false));
            }

            match status.latest_period_date() {
                None => {
                    log::warn!("⚠️ Quality gate response has no period date, freshness cannot be checked");
                    return Ok(Self::into_verdict(status, false));
                }
                Some(period_date) if period_date >= run_started_at => {
                    return Ok(Self::into_verdict(status, true));
                }
                Some(period_date) => {
                    if started.elapsed() + self.backoff > self.max_wait {
                        return Err(GateError::Timeout {
                            operation: "the quality gate to be recomputed".to_string(),
                            waited: started.elapsed(),
                            last_status: Some(status.status.to_string()),
                            last_error: Some(format!("latest period {} is older than run start {}", period_date, run_started_at)),
                        });
                    }
                    log::info!(
                        "⏳ Quality gate dates from {} (before run start {}), retrying in {}s",
                        period_date, run_started_at, self.backoff.as_secs()
                    );
                    sleep(self.backoff).await;
                }
            }
        }
    }

    async fn fetch_status(&self, query: &GateQuery) -> GateResult<ProjectStatus> {
        let reply = self.transport.get(&self.endpoint(), &query.to_params()).await?;

        let response: ProjectStatusResponse = match serde_json::from_str(&reply.body) {
            Ok(response) => response,
            Err(e) if reply.is_success() => return Err(GateError::decode_error(&e.to_string())),
            Err(_) => {
                return Err(GateError::GateQuery {
                    messages: vec![format!("HTTP {}", reply.status)],
                })
            }
        };

        if !response.errors.is_empty() {
            return Err(GateError::GateQuery {
                messages: response.errors.into_iter().map(|e| e.msg).collect(),
            });
        }

        if !reply.is_success() {
            return Err(GateError::GateQuery {
                messages: vec![format!("HTTP {}", reply.status)],
            });
        }

        response
            .project_status
            .ok_or_else(|| GateError::decode_error("response has no projectStatus"))
    }

    fn into_verdict(status: ProjectStatus, is_fresh: bool) -> Verdict {
        Verdict {
            status: status.status,
            is_fresh,
            conditions: status.conditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::gate_status::GateStatus;
    use crate::helpers::sonar_time::parse_sonar_time;
    use crate::structs::http_reply::HttpReply;
    use crate::traits::sonar_transport::MockSonarTransport;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SERVER: &str = "https://sonar.example.com/";

    fn run_start() -> DateTime<FixedOffset> {
        parse_sonar_time("2024-03-01T10:00:00+0000").unwrap()
    }

    fn gate_body(status: &str, period_date: &str) -> String {
        format!(
            r#"{{"projectStatus": {{"status": "{}", "conditions": [], "periods": [{{"index": 1, "date": "{}"}}]}}}}"#,
            status, period_date
        )
    }

    fn analysis_query() -> GateQuery {
        GateQuery::Analysis { analysis_id: "A1".to_string() }
    }

    fn resolver(transport: MockSonarTransport, mode: ResolutionMode) -> GateResolver {
        GateResolver::new(Arc::new(transport), SERVER, mode, Duration::from_secs(30), Duration::from_secs(300))
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_status_returns_on_first_fetch() {
        let mut transport = MockSonarTransport::new();
        transport
            .expect_get()
            .withf(|url, query| {
                url.starts_with("https://sonar.example.com/api/qualitygates/project_status")
                    && query.to_vec() == vec![("analysisId".to_string(), "A1".to_string())]
            })
            .times(1)
            .returning(|_, _| Ok(HttpReply::ok(gate_body("OK", "2024-03-01T10:00:00+0000"))));

        let verdict = resolver(transport, ResolutionMode::FreshnessChecked)
            .resolve(&analysis_query(), run_start())
            .await
            .unwrap();
        assert_eq!(verdict.status, GateStatus::Ok);
        assert!(verdict.is_fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_status_is_fetched_again() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut transport = MockSonarTransport::new();
        transport.expect_get().times(2).returning(move |_, _| {
            let body = if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                gate_body("OK", "2024-02-28T09:00:00+0000")
            } else {
                gate_body("ERROR", "2024-03-01T10:05:00+0000")
            };
            Ok(HttpReply::ok(body))
        });

        let verdict = resolver(transport, ResolutionMode::FreshnessChecked)
            .resolve(&analysis_query(), run_start())
            .await
            .unwrap();
        assert_eq!(verdict.status, GateStatus::Error);
        assert!(verdict.is_fresh);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_status_forever_is_bounded() {
        let mut transport = MockSonarTransport::new();
        transport
            .expect_get()
            .times(11)
            .returning(|_, _| Ok(HttpReply::ok(gate_body("OK", "2024-02-28T09:00:00+0000"))));

        let result = resolver(transport, ResolutionMode::FreshnessChecked)
            .resolve(&analysis_query(), run_start())
            .await;
        assert!(matches!(result, Err(GateError::Timeout { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_mode_ignores_stale_period() {
        let mut transport = MockSonarTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(HttpReply::ok(gate_body("ERROR", "2020-01-01T00:00:00+0000"))));

        let verdict = resolver(transport, ResolutionMode::Immediate)
            .resolve(&analysis_query(), run_start())
            .await
            .unwrap();
        assert_eq!(verdict.status, GateStatus::Error);
        assert!(!verdict.is_fresh);
    }

    #[tokio::test]
    async fn project_query_sends_key_and_branch() {
        let mut transport = MockSonarTransport::new();
        transport
            .expect_get()
            .withf(|_, query| {
                query.to_vec() == vec![
                    ("projectKey".to_string(), "org:app".to_string()),
                    ("branch".to_string(), "develop".to_string()),
                ]
            })
            .times(1)
            .returning(|_, _| Ok(HttpReply::ok(r#"{"projectStatus": {"status": "NONE"}}"#)));

        let query = GateQuery::Project { project_key: "org:app".to_string(), branch: Some("develop".to_string()) };
        let verdict = resolver(transport, ResolutionMode::Immediate)
            .resolve(&query, run_start())
            .await
            .unwrap();
        assert_eq!(verdict.status, GateStatus::None);
        assert!(verdict.conditions.is_empty());
    }

    #[tokio::test]
    async fn error_payload_becomes_query_error() {
        let mut transport = MockSonarTransport::new();
        transport.expect_get().times(1).returning(|_, _| {
            Ok(HttpReply {
                status: 404,
                body: r#"{"errors": [{"msg": "Analysis with id 'A1' is not found"}]}"#.to_string(),
            })
        });

        let result = resolver(transport, ResolutionMode::FreshnessChecked)
            .resolve(&analysis_query(), run_start())
            .await;
        match result {
            Err(GateError::GateQuery { messages }) => assert_eq!(messages, vec!["Analysis with id 'A1' is not found"]),
            other => panic!("expected query error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_body_becomes_decode_error() {
        let mut transport = MockSonarTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(HttpReply::ok("<html>proxy login</html>")));

        let result = resolver(transport, ResolutionMode::FreshnessChecked)
            .resolve(&analysis_query(), run_start())
            .await;
        assert!(matches!(result, Err(GateError::GateDecode { .. })));
    }

    #[tokio::test]
    async fn server_error_without_payload_is_query_error() {
        let mut transport = MockSonarTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(HttpReply { status: 502, body: "Bad Gateway".to_string() }));

        let result = resolver(transport, ResolutionMode::Immediate)
            .resolve(&analysis_query(), run_start())
            .await;
        assert!(matches!(result, Err(GateError::GateQuery { ref messages }) if messages[0] == "HTTP 502"));
    }
}
