//! Solver error types.

use crate::SolveStatus;
use lpadapt_model::{CoefficientLocation, ModelError};

/// Error type for solver operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Program has no variables. No backend call was made.
    EmptyModel,
    /// The backend refused to allocate or configure a model.
    BackendInitFailure(String),
    /// A coefficient row references a column past the variable count.
    InvalidCoefficientIndex {
        location: CoefficientLocation,
        index: usize,
        num_variables: usize,
    },
    /// The backend failed while a model was being built or read back.
    Backend(String),
    /// The requested backend is not compiled into this build.
    BackendUnavailable(String),
    /// The solve finished without a usable solution.
    SolveFailure {
        /// The classified status that caused the failure.
        status: SolveStatus,
    },
    /// The program itself is invalid.
    Model(ModelError),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::EmptyModel => "MODEL_EMPTY",
            SolverError::BackendInitFailure(_) => "BACKEND_INIT_FAILURE",
            SolverError::InvalidCoefficientIndex { .. } => "COEFFICIENT_INVALID_INDEX",
            SolverError::Backend(_) => "BACKEND_FAULT",
            SolverError::BackendUnavailable(_) => "BACKEND_UNAVAILABLE",
            SolverError::SolveFailure { status } => match status {
                SolveStatus::Infeasible => "SOLVER_INFEASIBLE",
                SolveStatus::Unbounded => "SOLVER_UNBOUNDED",
                SolveStatus::NumericalFailure => "SOLVER_NUMERICAL_FAILURE",
                SolveStatus::ResourceExhausted => "SOLVER_RESOURCE_EXHAUSTED",
                SolveStatus::Cancelled => "SOLVER_CANCELLED",
                SolveStatus::UnknownBackendOutcome
                | SolveStatus::Optimal
                | SolveStatus::SuboptimalInteger => "SOLVER_UNKNOWN_OUTCOME",
            },
            SolverError::Model(err) => err.code(),
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::EmptyModel => write!(f, "[{}] Model has no variables", self.code()),
            SolverError::BackendInitFailure(msg) => {
                write!(f, "[{}] Backend rejected model: {}", self.code(), msg)
            }
            SolverError::InvalidCoefficientIndex {
                location,
                index,
                num_variables,
            } => write!(
                f,
                "[{}] Column index {} in {} out of bounds (num_variables = {})",
                self.code(),
                index,
                location,
                num_variables
            ),
            SolverError::Backend(msg) => write!(f, "[{}] Backend error: {}", self.code(), msg),
            SolverError::BackendUnavailable(name) => write!(
                f,
                "[{}] Backend '{}' is not available in this build",
                self.code(),
                name
            ),
            SolverError::SolveFailure { status } => {
                write!(f, "[{}] {}", self.code(), status.message())
            }
            SolverError::Model(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for SolverError {
    fn from(err: ModelError) -> Self {
        SolverError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_empty_model() {
        let msg = SolverError::EmptyModel.to_string();
        assert!(msg.contains("MODEL_EMPTY"));
        assert!(msg.contains("no variables"));
    }

    #[test]
    fn test_error_display_invalid_coefficient_index() {
        let err = SolverError::InvalidCoefficientIndex {
            location: CoefficientLocation::Constraint(3),
            index: 9,
            num_variables: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("COEFFICIENT_INVALID_INDEX"));
        assert!(msg.contains("constraint 3"));
        assert!(msg.contains("9"));
    }

    #[test]
    fn test_error_display_solve_failure() {
        let err = SolverError::SolveFailure {
            status: SolveStatus::Infeasible,
        };
        let msg = err.to_string();
        assert!(msg.contains("SOLVER_INFEASIBLE"));
        assert!(msg.contains("infeasible"));

        let err = SolverError::SolveFailure {
            status: SolveStatus::Cancelled,
        };
        assert_eq!(err.code(), "SOLVER_CANCELLED");
    }

    #[test]
    fn test_model_error_passes_through() {
        let err = SolverError::from(ModelError::InvalidCoefficient {
            coefficient: f64::INFINITY,
        });
        assert_eq!(err.code(), "COEFFICIENT_INVALID");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            SolverError::BackendInitFailure(String::new()).code(),
            "BACKEND_INIT_FAILURE"
        );
        assert_eq!(SolverError::Backend(String::new()).code(), "BACKEND_FAULT");
        assert_eq!(
            SolverError::BackendUnavailable("highs".into()).code(),
            "BACKEND_UNAVAILABLE"
        );
    }
}
