//! Runs `sonar-scanner`, waits for the server to process the analysis, and
//! turns the resulting quality gate into a pass/fail decision for CI.

pub mod config;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod services;
pub mod structs;
pub mod traits;
pub mod workers;
