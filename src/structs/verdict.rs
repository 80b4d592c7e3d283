use crate::enums::gate_status::GateStatus;
use crate::structs::gate::condition::Condition;

/// The gate status this run is judged by.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub status: GateStatus,
    /// Whether the status was proven to belong to this run's analysis.
    pub is_fresh: bool,
    pub conditions: Vec<Condition>,
}

impl Verdict {
    pub fn failing_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter(|c| c.is_failing())
    }
}
