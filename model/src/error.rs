use thiserror::Error;

/// Fatal ingest-time failures. `Unreachable` is deliberately absent from this
/// taxonomy: an unreachable source/destination pair is masked to `ER = 0` by
/// the eligibility engine rather than surfaced as an error.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed row in {file}: {reason}")]
    MalformedRow { file: &'static str, reason: String },
    #[error("node {node} referenced by {entity} is not present in the graph")]
    UnknownNode { entity: String, node: u64 },
    #[error("duplicate id {id} in {file}")]
    DuplicateId { file: &'static str, id: String },
}

/// Status surfaced alongside a (possibly partial or empty) assignment.
/// `Ok` and `Unreachable`-style masking never produce one of these; they are
/// reserved for a solver actually running out of budget or finding nothing
/// feasible.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AssignStatus {
    #[error("solved to optimality")]
    Solved,
    #[error("no feasible solution exists for this instance")]
    Infeasible,
    #[error("solver time or iteration budget exceeded; returning best partial result")]
    BudgetExceeded,
}
