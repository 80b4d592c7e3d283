pub mod commands;
pub mod task_status;
pub mod gate_status;
pub mod gate_query;
pub mod gate_lookup;
pub mod resolution_mode;
