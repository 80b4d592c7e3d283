pub mod pipeline_config;
pub mod server_config;
pub mod scanner_config;
pub mod gate_config;
pub mod report_config;
