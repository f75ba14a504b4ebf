//! Linear expressions and the objective function.

use crate::coefficients::CoefficientMap;
use crate::error::ModelError;
use crate::ids::VariableId;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Sparse linear terms plus a constant.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearExpression {
    #[cfg_attr(feature = "serde", serde(default))]
    coefficients: CoefficientMap,
    #[cfg_attr(feature = "serde", serde(default))]
    constant: f64,
}

impl LinearExpression {
    pub fn new(coefficients: CoefficientMap, constant: f64) -> Result<Self, ModelError> {
        if !constant.is_finite() {
            return Err(ModelError::InvalidCoefficient {
                coefficient: constant,
            });
        }
        Ok(Self {
            coefficients,
            constant,
        })
    }

    /// Expression from linear terms, no constant.
    pub fn from_terms(
        terms: impl IntoIterator<Item = (VariableId, f64)>,
    ) -> Result<Self, ModelError> {
        Self::new(CoefficientMap::from_terms(terms)?, 0.0)
    }

    /// Single variable with coefficient 1.0.
    pub fn var(var_id: VariableId) -> Self {
        let mut coefficients = CoefficientMap::new();
        // 1.0 is finite and nonzero
        let _ = coefficients.set(var_id, 1.0);
        Self {
            coefficients,
            constant: 0.0,
        }
    }

    pub fn with_constant(mut self, constant: f64) -> Result<Self, ModelError> {
        if !constant.is_finite() {
            return Err(ModelError::InvalidCoefficient {
                coefficient: constant,
            });
        }
        self.constant = constant;
        Ok(self)
    }

    pub fn coefficients(&self) -> &CoefficientMap {
        &self.coefficients
    }

    pub fn coefficients_mut(&mut self) -> &mut CoefficientMap {
        &mut self.coefficients
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Value of the expression at a dense assignment.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.coefficients.evaluate(values) + self.constant
    }
}

/// Objective function: an expression and an optimization sense.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    #[cfg_attr(feature = "serde", serde(default))]
    pub sense: Sense,
    #[cfg_attr(feature = "serde", serde(default))]
    pub expression: LinearExpression,
}

impl Objective {
    pub fn minimize(expression: LinearExpression) -> Self {
        Self {
            sense: Sense::Minimize,
            expression,
        }
    }

    pub fn maximize(expression: LinearExpression) -> Self {
        Self {
            sense: Sense::Maximize,
            expression,
        }
    }

    pub fn coefficients(&self) -> &CoefficientMap {
        self.expression.coefficients()
    }

    pub fn constant(&self) -> f64 {
        self.expression.constant()
    }
}
