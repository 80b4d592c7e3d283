use crate::enums::gate_status::GateStatus;
use crate::structs::eval_result::EvalResult;
use crate::structs::verdict::Verdict;

pub struct VerdictEvaluator;

impl VerdictEvaluator {
    pub fn evaluate(verdict: &Verdict, expected: GateStatus, gate_enforced: bool) -> EvalResult {
        if verdict.status == expected {
            return EvalResult {
                pass: true,
                warning: false,
                message: format!("Quality gate status is {} as expected", verdict.status),
                observed: verdict.status,
                expected,
            };
        }

        let failing = verdict.failing_conditions().count();
        let mut message = format!("Quality gate status is {}, expected {}", verdict.status, expected);
        if failing > 0 {
            message.push_str(&format!(" ({} failing condition(s))", failing));
        }

        if gate_enforced {
            EvalResult {
                pass: false,
                warning: false,
                message,
                observed: verdict.status,
                expected,
            }
        } else {
            message.push_str("; gate not enforced, pipeline continues");
            EvalResult {
                pass: true,
                warning: true,
                message,
                observed: verdict.status,
                expected,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GateError;

    fn verdict(status: GateStatus) -> Verdict {
        Verdict {
            status,
            is_fresh: true,
            conditions: vec![],
        }
    }

    #[test]
    fn matching_status_passes() {
        let result = VerdictEvaluator::evaluate(&verdict(GateStatus::Ok), GateStatus::Ok, true);
        assert!(result.pass);
        assert!(!result.warning);
    }

    #[test]
    fn mismatch_fails_when_enforced() {
        let result = VerdictEvaluator::evaluate(&verdict(GateStatus::Error), GateStatus::Ok, true);
        assert!(!result.pass);
        match result.into_result() {
            Err(GateError::GateMismatch { observed, expected }) => {
                assert_eq!(observed, "ERROR");
                assert_eq!(expected, "OK");
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn mismatch_warns_when_not_enforced() {
        let result = VerdictEvaluator::evaluate(&verdict(GateStatus::Error), GateStatus::Ok, false);
        assert!(result.pass);
        assert!(result.warning);
        assert!(result.message.contains("not enforced"));
        tokio_test::assert_ok!(result.into_result());
    }

    #[test]
    fn non_default_expected_status_is_honoured() {
        let result = VerdictEvaluator::evaluate(&verdict(GateStatus::Warn), GateStatus::Warn, true);
        assert!(result.pass);

        let result = VerdictEvaluator::evaluate(&verdict(GateStatus::Ok), GateStatus::Warn, true);
        assert!(!result.pass);
    }
}
