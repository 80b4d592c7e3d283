pub mod cli;
pub mod cli_overrides;
pub mod config;
pub mod gate;
pub mod report_descriptor;
pub mod task;
pub mod verdict;
pub mod eval_result;
pub mod pipeline_outcome;
pub mod http_reply;
