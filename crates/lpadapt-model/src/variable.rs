//! Decision variables: domain and bound form.

use crate::error::ModelError;

/// Value domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VariableDomain {
    #[default]
    Continuous,
    Integer,
    Binary,
}

impl VariableDomain {
    pub fn is_integral(self) -> bool {
        matches!(self, VariableDomain::Integer | VariableDomain::Binary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariableDomain::Continuous => "continuous",
            VariableDomain::Integer => "integer",
            VariableDomain::Binary => "binary",
        }
    }
}

/// Bound form of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VariableBound {
    /// (-inf, +inf)
    Free,
    /// [lower, +inf)
    Lower(f64),
    /// (-inf, upper]
    Upper(f64),
    /// [lower, upper]
    Double { lower: f64, upper: f64 },
    /// [value, value]
    Fixed(f64),
}

impl VariableBound {
    /// Interval `(lower, upper)` described by this bound.
    pub fn interval(self) -> (f64, f64) {
        match self {
            VariableBound::Free => (f64::NEG_INFINITY, f64::INFINITY),
            VariableBound::Lower(lower) => (lower, f64::INFINITY),
            VariableBound::Upper(upper) => (f64::NEG_INFINITY, upper),
            VariableBound::Double { lower, upper } => (lower, upper),
            VariableBound::Fixed(value) => (value, value),
        }
    }

    /// Reject NaN values and inverted double bounds.
    pub fn validate(self) -> Result<Self, ModelError> {
        let (lower, upper) = self.interval();
        let empty = lower == f64::INFINITY || upper == f64::NEG_INFINITY;
        if lower.is_nan() || upper.is_nan() || lower > upper || empty {
            return Err(ModelError::InvalidVariableBounds { lower, upper });
        }
        Ok(self)
    }
}

impl Default for VariableBound {
    fn default() -> Self {
        VariableBound::Lower(0.0)
    }
}

/// A decision variable.
///
/// When `bound` is `None` the owning program's default variable bound
/// applies; see [`crate::LinearProgram::with_default_bound`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    domain: VariableDomain,
    #[cfg_attr(feature = "serde", serde(default))]
    bound: Option<VariableBound>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    name: Option<String>,
}

impl Variable {
    /// Continuous variable with the program's default bound.
    pub fn continuous() -> Self {
        Self::default()
    }

    /// Integer variable with the program's default bound.
    pub fn integer() -> Self {
        Self {
            domain: VariableDomain::Integer,
            ..Self::default()
        }
    }

    /// Binary variable with bounds [0, 1].
    pub fn binary() -> Self {
        Self {
            domain: VariableDomain::Binary,
            bound: Some(VariableBound::Double {
                lower: 0.0,
                upper: 1.0,
            }),
            name: None,
        }
    }

    /// Replace the bound, validating it against the domain.
    pub fn with_bound(mut self, bound: VariableBound) -> Result<Self, ModelError> {
        let bound = bound.validate()?;
        if self.domain == VariableDomain::Binary {
            binary_interval(bound.interval())?;
        }
        self.bound = Some(bound);
        Ok(self)
    }

    /// Convenience for `with_bound(VariableBound::Double { lower, upper })`.
    pub fn with_bounds(self, lower: f64, upper: f64) -> Result<Self, ModelError> {
        self.with_bound(VariableBound::Double { lower, upper })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn domain(&self) -> VariableDomain {
        self.domain
    }

    /// Explicit bound, `None` when the program default applies.
    pub fn bound(&self) -> Option<VariableBound> {
        self.bound
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Effective interval given the program's default bound.
    ///
    /// Binary variables are always confined to [0, 1].
    pub fn resolved_interval(
        &self,
        default_bound: VariableBound,
    ) -> Result<(f64, f64), ModelError> {
        let interval = self.bound.unwrap_or(default_bound).validate()?.interval();
        match self.domain {
            VariableDomain::Binary => binary_interval(interval),
            VariableDomain::Continuous | VariableDomain::Integer => Ok(interval),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if let Some(bound) = self.bound {
            bound.validate()?;
            if self.domain == VariableDomain::Binary {
                binary_interval(bound.interval())?;
            }
        }
        Ok(())
    }
}

fn binary_interval((lower, upper): (f64, f64)) -> Result<(f64, f64), ModelError> {
    let allows_zero = lower <= 0.0 && 0.0 <= upper;
    let allows_one = lower <= 1.0 && 1.0 <= upper;
    match (allows_zero, allows_one) {
        (true, true) => Ok((0.0, 1.0)),
        (true, false) => Ok((0.0, 0.0)),
        (false, true) => Ok((1.0, 1.0)),
        (false, false) => Err(ModelError::EmptyBinaryDomain { lower, upper }),
    }
}
