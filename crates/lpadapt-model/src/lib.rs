//! Solver-agnostic linear program model.
//!
//! A [`LinearProgram`] owns an ordered list of [`Variable`]s, one
//! [`Objective`] and an ordered list of [`LinearConstraint`]s. Rows are sparse
//! [`CoefficientMap`]s keyed by [`VariableId`], whose 0-based index is the
//! column position every solver backend sees.

pub mod coefficients;
pub mod constraint;
pub mod error;
pub mod expression;
pub mod ids;
pub mod program;
pub mod variable;

pub use coefficients::CoefficientMap;
pub use constraint::{ConstraintBound, LinearConstraint};
pub use error::{CoefficientLocation, ModelError};
pub use expression::{LinearExpression, Objective, Sense};
pub use ids::{ConstraintId, VariableId};
pub use program::LinearProgram;
pub use variable::{Variable, VariableBound, VariableDomain};
