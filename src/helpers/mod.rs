pub mod config_helper;
pub mod sonar_time;
