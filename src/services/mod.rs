pub mod descriptor_parser;
pub mod task_poller;
pub mod gate_resolver;
pub mod verdict_evaluator;
pub mod report_exporter;
pub mod gate_pipeline;
pub mod cert_truster;
pub mod scanner_runner;
pub mod sonar_client;
