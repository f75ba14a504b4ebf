//! The linear program handed to solver backends.

use crate::coefficients::CoefficientMap;
use crate::constraint::LinearConstraint;
use crate::error::{CoefficientLocation, ModelError};
use crate::expression::{LinearExpression, Objective};
use crate::ids::{ConstraintId, VariableId};
use crate::variable::{Variable, VariableBound};

/// A linear or mixed-integer program.
///
/// Variables and constraints keep insertion order; a variable's position is
/// its [`VariableId`] and the column index every backend sees. Coefficients
/// may only reference variables already added, so a program handed to a
/// solver never refers to a missing column.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ProgramDocument"))]
pub struct LinearProgram {
    variables: Vec<Variable>,
    objective: Objective,
    constraints: Vec<LinearConstraint>,
    default_bound: VariableBound,
}

impl LinearProgram {
    /// Create an empty program whose unbounded variables default to `[0, +inf)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty program with an explicit default variable bound.
    ///
    /// The default applies to every variable added without its own bound.
    pub fn with_default_bound(bound: VariableBound) -> Result<Self, ModelError> {
        Ok(Self {
            default_bound: bound.validate()?,
            ..Self::default()
        })
    }

    pub fn default_bound(&self) -> VariableBound {
        self.default_bound
    }

    /// Add a variable and return its ID.
    pub fn add_variable(&mut self, variable: Variable) -> Result<VariableId, ModelError> {
        variable.validate()?;
        // Binary variables must still admit 0 or 1 under the default bound.
        variable.resolved_interval(self.default_bound)?;
        let id = VariableId::from_index(self.variables.len());
        tracing::trace!(
            component = "model",
            operation = "add_variable",
            status = "success",
            var_id = id.inner(),
            domain = variable.domain().as_str(),
            "Added variable"
        );
        self.variables.push(variable);
        Ok(id)
    }

    /// Add a constraint and return its ID.
    ///
    /// Fails if any coefficient references a variable not in the program.
    pub fn add_constraint(
        &mut self,
        constraint: LinearConstraint,
    ) -> Result<ConstraintId, ModelError> {
        let row = self.constraints.len();
        self.check_coefficients(constraint.coefficients(), CoefficientLocation::Constraint(row))?;
        let id = ConstraintId::from_index(row);
        tracing::trace!(
            component = "model",
            operation = "add_constraint",
            status = "success",
            constraint_id = id.inner(),
            bound = constraint.bound().as_str(),
            num_coeffs = constraint.coefficients().len(),
            "Added constraint"
        );
        self.constraints.push(constraint);
        Ok(id)
    }

    /// Replace the objective function.
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        self.check_coefficients(objective.coefficients(), CoefficientLocation::Objective)?;
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = objective.sense.as_str(),
            terms = objective.coefficients().len(),
            "Set objective function"
        );
        self.objective = objective;
        Ok(())
    }

    /// Minimize a linear expression.
    pub fn minimize(&mut self, expression: LinearExpression) -> Result<(), ModelError> {
        self.set_objective(Objective::minimize(expression))
    }

    /// Maximize a linear expression.
    pub fn maximize(&mut self, expression: LinearExpression) -> Result<(), ModelError> {
        self.set_objective(Objective::maximize(expression))
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&LinearConstraint> {
        self.constraints.get(id.index())
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of nonzero constraint coefficients.
    pub fn num_coefficients(&self) -> usize {
        self.constraints
            .iter()
            .map(|constraint| constraint.coefficients().len())
            .sum()
    }

    /// Effective `(lower, upper)` interval of a variable, `None` for an
    /// unknown ID.
    pub fn variable_interval(&self, id: VariableId) -> Option<(f64, f64)> {
        self.variable(id)?
            .resolved_interval(self.default_bound)
            .ok()
    }

    /// Check every program invariant.
    ///
    /// Programs built through the mutating methods always pass; this is
    /// for programs assembled from documents.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.default_bound.validate()?;
        for variable in &self.variables {
            variable.validate()?;
            variable.resolved_interval(self.default_bound)?;
        }
        self.check_coefficients(self.objective.coefficients(), CoefficientLocation::Objective)?;
        for (row, constraint) in self.constraints.iter().enumerate() {
            constraint.bound().validate()?;
            self.check_coefficients(
                constraint.coefficients(),
                CoefficientLocation::Constraint(row),
            )?;
        }
        Ok(())
    }

    /// Objective value (including the constant) at a dense assignment.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.expression.evaluate(values)
    }

    /// Whether a dense assignment satisfies all bounds, integrality
    /// requirements and constraints within `tolerance`.
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let columns_ok = self.variables.iter().zip(values).all(|(variable, value)| {
            let Ok((lower, upper)) = variable.resolved_interval(self.default_bound) else {
                return false;
            };
            let integral_ok =
                !variable.domain().is_integral() || (value - value.round()).abs() <= tolerance;
            *value >= lower - tolerance && *value <= upper + tolerance && integral_ok
        });
        columns_ok
            && self
                .constraints
                .iter()
                .all(|constraint| constraint.is_satisfied_by(values, tolerance))
    }

    fn check_coefficients(
        &self,
        coefficients: &CoefficientMap,
        location: CoefficientLocation,
    ) -> Result<(), ModelError> {
        match coefficients.first_out_of_range(self.variables.len()) {
            None => Ok(()),
            Some(id) => {
                tracing::warn!(
                    component = "model",
                    operation = "check_coefficients",
                    status = "error",
                    var_id = id.inner(),
                    num_variables = self.variables.len(),
                    %location,
                    "Coefficient references a missing variable"
                );
                Err(ModelError::InvalidVariableId {
                    id,
                    location,
                    num_variables: self.variables.len(),
                })
            }
        }
    }
}

/// Unvalidated wire form of a [`LinearProgram`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ProgramDocument {
    #[serde(default)]
    variables: Vec<Variable>,
    #[serde(default)]
    objective: Objective,
    #[serde(default)]
    constraints: Vec<LinearConstraint>,
    #[serde(default)]
    default_bound: VariableBound,
}

#[cfg(feature = "serde")]
impl TryFrom<ProgramDocument> for LinearProgram {
    type Error = ModelError;

    fn try_from(document: ProgramDocument) -> Result<Self, Self::Error> {
        let program = LinearProgram {
            variables: document.variables,
            objective: document.objective,
            constraints: document.constraints,
            default_bound: document.default_bound,
        };
        program.validate()?;
        Ok(program)
    }
}
