use crate::enums::gate_status::GateStatus;
use crate::errors::{GateError, GateResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalResult {
    pub pass: bool,
    /// Set when the status differed from the expected one but enforcement was off.
    pub warning: bool,
    pub message: String,
    pub observed: GateStatus,
    pub expected: GateStatus,
}

impl EvalResult {
    pub fn into_result(self) -> GateResult<EvalResult> {
        if self.pass {
            Ok(self)
        } else {
            Err(GateError::GateMismatch {
                observed: self.observed.to_string(),
                expected: self.expected.to_string(),
            })
        }
    }
}
