//! Model error types.

use crate::ids::VariableId;

/// Where an offending coefficient was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientLocation {
    Objective,
    Constraint(usize),
}

impl std::fmt::Display for CoefficientLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoefficientLocation::Objective => write!(f, "objective"),
            CoefficientLocation::Constraint(row) => write!(f, "constraint {}", row),
        }
    }
}

/// Errors that can occur while building a linear program.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A coefficient references a variable the program does not own.
    InvalidVariableId {
        id: VariableId,
        location: CoefficientLocation,
        num_variables: usize,
    },
    /// Invalid variable bounds
    InvalidVariableBounds { lower: f64, upper: f64 },
    /// Invalid constraint bounds
    InvalidConstraintBounds { lower: f64, upper: f64 },
    /// Coefficient is NaN or infinite
    InvalidCoefficient { coefficient: f64 },
    /// Binary variable whose bound excludes both 0 and 1
    EmptyBinaryDomain { lower: f64, upper: f64 },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableId { .. } => "VARIABLE_INVALID_ID",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::InvalidConstraintBounds { .. } => "CONSTRAINT_INVALID_BOUNDS",
            ModelError::InvalidCoefficient { .. } => "COEFFICIENT_INVALID",
            ModelError::EmptyBinaryDomain { .. } => "VARIABLE_EMPTY_BINARY_DOMAIN",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidVariableId {
                id,
                location,
                num_variables,
            } => write!(
                f,
                "[{}] Variable ID {} referenced by {} does not exist (num_variables = {})",
                self.code(),
                id,
                location,
                num_variables
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidConstraintBounds { lower, upper } => write!(
                f,
                "[{}] Constraint bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidCoefficient { coefficient } => write!(
                f,
                "[{}] Coefficient must be finite (got {})",
                self.code(),
                coefficient
            ),
            ModelError::EmptyBinaryDomain { lower, upper } => write!(
                f,
                "[{}] Binary variable bound [{}, {}] excludes both 0 and 1",
                self.code(),
                lower,
                upper
            ),
        }
    }
}

impl std::error::Error for ModelError {}
