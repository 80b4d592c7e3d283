use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use sonar_gate::enums::gate_status::GateStatus;
use sonar_gate::errors::{GateError, GateResult};
use sonar_gate::helpers::sonar_time::parse_sonar_time;
use sonar_gate::services::descriptor_parser::DescriptorParser;
use sonar_gate::services::gate_pipeline::GatePipeline;
use sonar_gate::structs::config::pipeline_config::PipelineConfig;
use sonar_gate::structs::http_reply::HttpReply;
use sonar_gate::traits::sonar_transport::SonarTransport;

const TASK_URL: &str = "https://sonar.example.com/api/ce/task?id=T1";
const GATE_URL: &str = "https://sonar.example.com/api/qualitygates/project_status";

const REPORT_TASK: &str = "\
projectKey=org:app
serverUrl=https://sonar.example.com
dashboardUrl=https://sonar.example.com/dashboard?id=org%3Aapp
ceTaskId=T1
ceTaskUrl=https://sonar.example.com/api/ce/task?id=T1
";

/// Serves scripted bodies per URL; the last body for a URL repeats.
#[derive(Default)]
struct FakeSonar {
    routes: Mutex<HashMap<String, Vec<String>>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeSonar {
    fn route(self, url: &str, bodies: &[String]) -> Self {
        self.routes.lock().unwrap().insert(url.to_string(), bodies.to_vec());
        self
    }

    fn requests_to(&self, url: &str) -> Vec<Vec<(String, String)>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .map(|(_, q)| q.clone())
            .collect()
    }
}

#[async_trait]
impl SonarTransport for FakeSonar {
    async fn get(&self, url: &str, query: &[(String, String)]) -> GateResult<HttpReply> {
        self.requests.lock().unwrap().push((url.to_string(), query.to_vec()));
        let mut routes = self.routes.lock().unwrap();
        let bodies = routes.get_mut(url).expect("unexpected URL");
        let body = if bodies.len() > 1 { bodies.remove(0) } else { bodies[0].clone() };
        Ok(HttpReply::ok(body))
    }
}

fn task(status: &str) -> String {
    format!(
        r#"{{"task": {{"id": "T1", "type": "REPORT", "componentKey": "org:app", "analysisId": "A1", "status": "{}", "submittedAt": "2024-03-01T10:00:00+0000", "startedAt": "2024-03-01T10:00:01+0000"}}}}"#,
        status
    )
}

fn gate(status: &str, period_date: &str, conditions: &str) -> String {
    format!(
        r#"{{"projectStatus": {{"status": "{}", "conditions": [{}], "periods": [{{"index": 1, "mode": "previous_version", "date": "{}"}}]}}}}"#,
        status, conditions, period_date
    )
}

const FAILING_CONDITIONS: &str = r#"
    {"status": "ERROR", "metricKey": "new_bugs", "comparator": "GT", "errorThreshold": "0", "actualValue": "2"},
    {"status": "OK", "metricKey": "new_coverage", "comparator": "LT", "errorThreshold": "80", "actualValue": "91.5"}
"#;

#[tokio::test(start_paused = true)]
async fn pending_task_then_fresh_ok_gate_passes() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor_path = dir.path().join("report-task.txt");
    fs::write(&descriptor_path, REPORT_TASK).unwrap();
    let descriptor = DescriptorParser::load(&descriptor_path, true).unwrap();

    let fake = Arc::new(
        FakeSonar::default()
            .route(TASK_URL, &[task("PENDING"), task("PENDING"), task("SUCCESS")])
            .route(GATE_URL, &[gate("OK", "2024-03-01T10:05:00+0000", "")]),
    );

    let run_start = parse_sonar_time("2024-03-01T09:59:00+0000");
    let outcome = GatePipeline::new(fake.clone(), PipelineConfig::default())
        .run(descriptor.as_ref(), run_start)
        .await
        .unwrap();

    assert!(outcome.evaluation.pass);
    assert_eq!(outcome.verdict.status, GateStatus::Ok);
    assert!(outcome.verdict.is_fresh);
    assert_eq!(fake.requests_to(TASK_URL).len(), 3);
    assert_eq!(
        fake.requests_to(GATE_URL),
        vec![vec![("analysisId".to_string(), "A1".to_string())]]
    );
}

#[tokio::test(start_paused = true)]
async fn stale_gate_is_refetched_before_judging() {
    let descriptor = DescriptorParser::new("inline").parse(REPORT_TASK).unwrap();
    let fake = Arc::new(
        FakeSonar::default()
            .route(TASK_URL, &[task("SUCCESS")])
            .route(GATE_URL, &[
                gate("OK", "2024-02-20T08:00:00+0000", ""),
                gate("ERROR", "2024-03-01T10:05:00+0000", FAILING_CONDITIONS),
            ]),
    );

    let mut config = PipelineConfig::default();
    config.gate.gate_enforced = false;
    let outcome = GatePipeline::new(fake.clone(), config)
        .run(Some(&descriptor), None)
        .await
        .unwrap();

    assert_eq!(fake.requests_to(GATE_URL).len(), 2);
    assert_eq!(outcome.verdict.status, GateStatus::Error);
    assert!(outcome.evaluation.pass);
    assert!(outcome.evaluation.warning);
}

#[tokio::test(start_paused = true)]
async fn enforced_failing_gate_still_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("sonar-quality-gate.xml");
    let descriptor = DescriptorParser::new("inline").parse(REPORT_TASK).unwrap();
    let fake = Arc::new(
        FakeSonar::default()
            .route(TASK_URL, &[task("SUCCESS")])
            .route(GATE_URL, &[gate("ERROR", "2024-03-01T10:05:00+0000", FAILING_CONDITIONS)]),
    );

    let mut config = PipelineConfig::default();
    config.report.enabled = true;
    config.report.path = report_path.to_string_lossy().to_string();

    let result = GatePipeline::new(fake, config).run(Some(&descriptor), None).await;
    match result {
        Err(GateError::GateMismatch { observed, .. }) => assert_eq!(observed, "ERROR"),
        other => panic!("expected gate mismatch, got {:?}", other.map(|o| o.verdict.status)),
    }

    let xml = fs::read_to_string(&report_path).unwrap();
    assert!(xml.contains(r#"<testsuite name="org:app" tests="2" errors="1">"#));
    assert!(xml.contains(r#"message="Violated: 2 is greater than 0""#));
    assert!(xml.find("new_bugs").unwrap() < xml.find("new_coverage").unwrap());
}

#[tokio::test(start_paused = true)]
async fn failed_task_aborts_before_gate_query() {
    let descriptor = DescriptorParser::new("inline").parse(REPORT_TASK).unwrap();
    let fake = Arc::new(
        FakeSonar::default()
            .route(TASK_URL, &[task("IN_PROGRESS"), task("FAILED")])
            .route(GATE_URL, &[gate("OK", "2024-03-01T10:05:00+0000", "")]),
    );

    let result = GatePipeline::new(fake.clone(), PipelineConfig::default())
        .run(Some(&descriptor), None)
        .await;

    assert!(matches!(result, Err(GateError::TaskFailed { .. })));
    assert_eq!(fake.requests_to(TASK_URL).len(), 2);
    assert!(fake.requests_to(GATE_URL).is_empty());
}

#[tokio::test(start_paused = true)]
async fn task_that_never_finishes_times_out() {
    let descriptor = DescriptorParser::new("inline").parse(REPORT_TASK).unwrap();
    let fake = Arc::new(
        FakeSonar::default()
            .route(TASK_URL, &[task("PENDING")])
            .route(GATE_URL, &[gate("OK", "2024-03-01T10:05:00+0000", "")]),
    );

    let mut config = PipelineConfig::default();
    config.gate.overall_timeout_secs = 10;
    let result = GatePipeline::new(fake.clone(), config).run(Some(&descriptor), None).await;

    assert!(matches!(result, Err(GateError::Timeout { .. })));
    assert!(fake.requests_to(GATE_URL).is_empty());
}
