use std::path::PathBuf;
use crate::structs::eval_result::EvalResult;
use crate::structs::verdict::Verdict;

#[derive(Debug)]
pub struct PipelineOutcome {
    pub verdict: Verdict,
    pub evaluation: EvalResult,
    pub report_path: Option<PathBuf>,
}
