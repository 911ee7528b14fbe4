use thiserror::Error;

/// Failures specific to the ILP backend. Distinct from `model::InputError`
/// (fatal ingest failures) and `model::AssignStatus` (the status tag that
/// accompanies a returned assignment) — this is the error a solver call
/// itself can fail with before any assignment exists to tag.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("ILP solver found the model infeasible")]
    Infeasible,
    #[error("ILP solver reported an unbounded model")]
    Unbounded,
    #[error("ILP solver backend error: {0}")]
    Backend(String),
}

impl From<good_lp::ResolutionError> for SolverError {
    fn from(err: good_lp::ResolutionError) -> SolverError {
        match err {
            good_lp::ResolutionError::Infeasible => SolverError::Infeasible,
            good_lp::ResolutionError::Unbounded => SolverError::Unbounded,
            other => SolverError::Backend(other.to_string()),
        }
    }
}
