pub mod condition;
pub mod period;
pub mod project_status;
