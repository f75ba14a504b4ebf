//! Classification of microlp solve results.

use lpadapt_solver::SolveStatus;

/// Map a microlp error onto the backend-independent status.
///
/// Anything other than infeasibility or unboundedness is an internal
/// failure of the simplex or branch-and-bound code.
pub fn classify_error(err: &microlp::Error) -> SolveStatus {
    match err {
        microlp::Error::Infeasible => SolveStatus::Infeasible,
        microlp::Error::Unbounded => SolveStatus::Unbounded,
        #[allow(unreachable_patterns)]
        _ => SolveStatus::NumericalFailure,
    }
}
