//! HiGHS model status codes and their classification.

use lpadapt_solver::{SolveStatus, SolverError};

/// Model status reported by `Highs_getModelStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighsModelCode {
    NotSet,
    LoadError,
    ModelError,
    PresolveError,
    SolveError,
    PostsolveError,
    ModelEmpty,
    Optimal,
    Infeasible,
    UnboundedOrInfeasible,
    Unbounded,
    ObjectiveBound,
    ObjectiveTarget,
    TimeLimit,
    IterationLimit,
    Unknown,
    SolutionLimit,
    Interrupt,
    MemoryLimit,
    /// A code this version does not know.
    Unrecognized(i32),
}

impl HighsModelCode {
    pub fn from_raw(code: i32) -> Self {
        match code {
            0 => HighsModelCode::NotSet,
            1 => HighsModelCode::LoadError,
            2 => HighsModelCode::ModelError,
            3 => HighsModelCode::PresolveError,
            4 => HighsModelCode::SolveError,
            5 => HighsModelCode::PostsolveError,
            6 => HighsModelCode::ModelEmpty,
            7 => HighsModelCode::Optimal,
            8 => HighsModelCode::Infeasible,
            9 => HighsModelCode::UnboundedOrInfeasible,
            10 => HighsModelCode::Unbounded,
            11 => HighsModelCode::ObjectiveBound,
            12 => HighsModelCode::ObjectiveTarget,
            13 => HighsModelCode::TimeLimit,
            14 => HighsModelCode::IterationLimit,
            15 => HighsModelCode::Unknown,
            16 => HighsModelCode::SolutionLimit,
            17 => HighsModelCode::Interrupt,
            18 => HighsModelCode::MemoryLimit,
            other => HighsModelCode::Unrecognized(other),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HighsModelCode::NotSet => "not_set",
            HighsModelCode::LoadError => "load_error",
            HighsModelCode::ModelError => "model_error",
            HighsModelCode::PresolveError => "presolve_error",
            HighsModelCode::SolveError => "solve_error",
            HighsModelCode::PostsolveError => "postsolve_error",
            HighsModelCode::ModelEmpty => "model_empty",
            HighsModelCode::Optimal => "optimal",
            HighsModelCode::Infeasible => "infeasible",
            HighsModelCode::UnboundedOrInfeasible => "unbounded_or_infeasible",
            HighsModelCode::Unbounded => "unbounded",
            HighsModelCode::ObjectiveBound => "objective_bound",
            HighsModelCode::ObjectiveTarget => "objective_target",
            HighsModelCode::TimeLimit => "time_limit",
            HighsModelCode::IterationLimit => "iteration_limit",
            HighsModelCode::Unknown => "unknown",
            HighsModelCode::SolutionLimit => "solution_limit",
            HighsModelCode::Interrupt => "interrupt",
            HighsModelCode::MemoryLimit => "memory_limit",
            HighsModelCode::Unrecognized(_) => "unrecognized",
        }
    }

    /// Map the code onto the backend-independent status.
    ///
    /// Load and model errors mean HiGHS never accepted the model and are
    /// reported as [`SolverError::BackendInitFailure`].
    pub fn classify(self) -> Result<SolveStatus, SolverError> {
        let status = match self {
            HighsModelCode::LoadError | HighsModelCode::ModelError => {
                return Err(SolverError::BackendInitFailure(format!(
                    "HiGHS reported {}",
                    self.as_str()
                )));
            }
            HighsModelCode::ModelEmpty | HighsModelCode::Optimal => SolveStatus::Optimal,
            HighsModelCode::ObjectiveTarget | HighsModelCode::SolutionLimit => {
                SolveStatus::SuboptimalInteger
            }
            HighsModelCode::Infeasible => SolveStatus::Infeasible,
            HighsModelCode::UnboundedOrInfeasible | HighsModelCode::Unbounded => {
                SolveStatus::Unbounded
            }
            HighsModelCode::PresolveError
            | HighsModelCode::SolveError
            | HighsModelCode::PostsolveError => SolveStatus::NumericalFailure,
            HighsModelCode::MemoryLimit => SolveStatus::ResourceExhausted,
            HighsModelCode::ObjectiveBound
            | HighsModelCode::TimeLimit
            | HighsModelCode::IterationLimit
            | HighsModelCode::Interrupt => SolveStatus::Cancelled,
            HighsModelCode::NotSet | HighsModelCode::Unknown | HighsModelCode::Unrecognized(_) => {
                SolveStatus::UnknownBackendOutcome
            }
        };
        Ok(status)
    }
}

impl std::fmt::Display for HighsModelCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HighsModelCode::Unrecognized(code) => write!(f, "unrecognized({})", code),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_code_round_trips() {
        for code in 0..=18 {
            let parsed = HighsModelCode::from_raw(code);
            assert!(
                !matches!(parsed, HighsModelCode::Unrecognized(_)),
                "code {} should be known",
                code
            );
        }
        assert_eq!(
            HighsModelCode::from_raw(19),
            HighsModelCode::Unrecognized(19)
        );
        assert_eq!(
            HighsModelCode::from_raw(-1),
            HighsModelCode::Unrecognized(-1)
        );
    }

    #[test]
    fn test_classification_table() {
        let expected = [
            (0, Some(SolveStatus::UnknownBackendOutcome)),
            (1, None),
            (2, None),
            (3, Some(SolveStatus::NumericalFailure)),
            (4, Some(SolveStatus::NumericalFailure)),
            (5, Some(SolveStatus::NumericalFailure)),
            (6, Some(SolveStatus::Optimal)),
            (7, Some(SolveStatus::Optimal)),
            (8, Some(SolveStatus::Infeasible)),
            (9, Some(SolveStatus::Unbounded)),
            (10, Some(SolveStatus::Unbounded)),
            (11, Some(SolveStatus::Cancelled)),
            (12, Some(SolveStatus::SuboptimalInteger)),
            (13, Some(SolveStatus::Cancelled)),
            (14, Some(SolveStatus::Cancelled)),
            (15, Some(SolveStatus::UnknownBackendOutcome)),
            (16, Some(SolveStatus::SuboptimalInteger)),
            (17, Some(SolveStatus::Cancelled)),
            (18, Some(SolveStatus::ResourceExhausted)),
            (42, Some(SolveStatus::UnknownBackendOutcome)),
        ];
        for (code, status) in expected {
            let classified = HighsModelCode::from_raw(code).classify();
            match status {
                Some(status) => assert_eq!(classified, Ok(status), "code {}", code),
                None => assert!(
                    matches!(classified, Err(SolverError::BackendInitFailure(_))),
                    "code {}",
                    code
                ),
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(HighsModelCode::TimeLimit.to_string(), "time_limit");
        assert_eq!(
            HighsModelCode::Unrecognized(99).to_string(),
            "unrecognized(99)"
        );
    }
}
