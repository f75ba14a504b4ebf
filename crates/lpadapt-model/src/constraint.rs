//! Linear constraints: a coefficient row and a bound form.

use crate::coefficients::CoefficientMap;
use crate::error::ModelError;
use crate::ids::VariableId;

/// Bound form of a linear constraint row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintBound {
    /// row == value
    Fixed(f64),
    /// row >= value
    Lower(f64),
    /// row <= value
    Upper(f64),
    /// lower <= row <= upper
    Double { lower: f64, upper: f64 },
}

impl ConstraintBound {
    /// Interval `(lower, upper)` the row value must lie in.
    pub fn interval(self) -> (f64, f64) {
        match self {
            ConstraintBound::Fixed(value) => (value, value),
            ConstraintBound::Lower(lower) => (lower, f64::INFINITY),
            ConstraintBound::Upper(upper) => (f64::NEG_INFINITY, upper),
            ConstraintBound::Double { lower, upper } => (lower, upper),
        }
    }

    /// Reject NaN values and inverted double bounds.
    pub fn validate(self) -> Result<Self, ModelError> {
        let (lower, upper) = self.interval();
        let empty = lower == f64::INFINITY || upper == f64::NEG_INFINITY;
        if lower.is_nan() || upper.is_nan() || lower > upper || empty {
            return Err(ModelError::InvalidConstraintBounds { lower, upper });
        }
        Ok(self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintBound::Fixed(_) => "fixed",
            ConstraintBound::Lower(_) => "lower",
            ConstraintBound::Upper(_) => "upper",
            ConstraintBound::Double { .. } => "double",
        }
    }
}

/// A linear constraint `bound(coefficients . x)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearConstraint {
    #[cfg_attr(feature = "serde", serde(default))]
    coefficients: CoefficientMap,
    bound: ConstraintBound,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    name: Option<String>,
}

impl LinearConstraint {
    pub fn new(coefficients: CoefficientMap, bound: ConstraintBound) -> Result<Self, ModelError> {
        Ok(Self {
            coefficients,
            bound: bound.validate()?,
            name: None,
        })
    }

    /// `coefficients . x == value`
    pub fn equal(coefficients: CoefficientMap, value: f64) -> Result<Self, ModelError> {
        Self::new(coefficients, ConstraintBound::Fixed(value))
    }

    /// `coefficients . x >= lower`
    pub fn at_least(coefficients: CoefficientMap, lower: f64) -> Result<Self, ModelError> {
        Self::new(coefficients, ConstraintBound::Lower(lower))
    }

    /// `coefficients . x <= upper`
    pub fn at_most(coefficients: CoefficientMap, upper: f64) -> Result<Self, ModelError> {
        Self::new(coefficients, ConstraintBound::Upper(upper))
    }

    /// `lower <= coefficients . x <= upper`
    pub fn between(
        coefficients: CoefficientMap,
        lower: f64,
        upper: f64,
    ) -> Result<Self, ModelError> {
        Self::new(coefficients, ConstraintBound::Double { lower, upper })
    }

    /// Build from `(variable, coefficient)` pairs.
    pub fn from_terms(
        terms: impl IntoIterator<Item = (VariableId, f64)>,
        bound: ConstraintBound,
    ) -> Result<Self, ModelError> {
        Self::new(CoefficientMap::from_terms(terms)?, bound)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn coefficients(&self) -> &CoefficientMap {
        &self.coefficients
    }

    pub fn bound(&self) -> ConstraintBound {
        self.bound
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a dense assignment satisfies this row within `tolerance`.
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        let activity = self.coefficients.evaluate(values);
        let (lower, upper) = self.bound.interval();
        activity >= lower - tolerance && activity <= upper + tolerance
    }
}
