//! Program-to-backend index and bound translation.
//!
//! Every conversion between a 0-based [`VariableId`] index and a backend
//! column goes through [`backend_column`].

use crate::backend::{Capabilities, RowBound, SparseRow};
use crate::SolverError;
use lpadapt_model::{CoefficientLocation, CoefficientMap, ConstraintBound, LinearProgram};

#[cfg(doc)]
use lpadapt_model::VariableId;

/// Backend column for the variable at 0-based `index`.
#[inline]
pub fn backend_column(index: usize, column_base: usize) -> usize {
    index + column_base
}

/// Dense objective row of length `num_variables + column_base`.
///
/// Slots below the column base stay zero.
pub fn objective_row(
    program: &LinearProgram,
    capabilities: Capabilities,
) -> Result<Vec<f64>, SolverError> {
    let num_variables = program.num_variables();
    let coefficients = program.objective().coefficients();
    check_indices(coefficients, CoefficientLocation::Objective, num_variables)?;

    let mut row = vec![0.0; num_variables + capabilities.column_base];
    for (var_id, coefficient) in coefficients.iter() {
        row[backend_column(var_id.index(), capabilities.column_base)] = coefficient;
    }
    Ok(row)
}

/// Sparse backend row for one constraint, columns in ascending order.
pub fn sparse_row(
    coefficients: &CoefficientMap,
    location: CoefficientLocation,
    num_variables: usize,
    column_base: usize,
) -> Result<SparseRow, SolverError> {
    check_indices(coefficients, location, num_variables)?;

    let mut row = SparseRow::with_capacity(coefficients.len());
    for (var_id, coefficient) in coefficients.iter() {
        row.push(backend_column(var_id.index(), column_base), coefficient);
    }
    Ok(row)
}

/// Backend rows for one constraint bound.
///
/// A double bound becomes one ranged row when the backend supports it and
/// an at-least row followed by an at-most row otherwise.
pub fn row_bounds(bound: ConstraintBound, ranged_rows: bool) -> Vec<RowBound> {
    match bound {
        ConstraintBound::Fixed(value) => vec![RowBound::Equal(value)],
        ConstraintBound::Lower(lower) => vec![RowBound::AtLeast(lower)],
        ConstraintBound::Upper(upper) => vec![RowBound::AtMost(upper)],
        ConstraintBound::Double { lower, upper } if ranged_rows => {
            vec![RowBound::Range { lower, upper }]
        }
        ConstraintBound::Double { lower, upper } => {
            vec![RowBound::AtLeast(lower), RowBound::AtMost(upper)]
        }
    }
}

fn check_indices(
    coefficients: &CoefficientMap,
    location: CoefficientLocation,
    num_variables: usize,
) -> Result<(), SolverError> {
    match coefficients.first_out_of_range(num_variables) {
        Some(var_id) => Err(SolverError::InvalidCoefficientIndex {
            location,
            index: var_id.index(),
            num_variables,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use lpadapt_model::{LinearExpression, Variable, VariableId};

    fn two_variable_program() -> LinearProgram {
        let mut program = LinearProgram::new();
        let x = program.add_variable(Variable::continuous()).unwrap();
        let y = program.add_variable(Variable::continuous()).unwrap();
        program
            .maximize(LinearExpression::from_terms([(x, 3.0), (y, -1.0)]).unwrap())
            .unwrap();
        program
    }

    #[test]
    fn test_backend_column() {
        assert_eq!(backend_column(0, 0), 0);
        assert_eq!(backend_column(0, 1), 1);
        assert_eq!(backend_column(4, 1), 5);
    }

    #[test]
    fn test_objective_row_zero_based() {
        let program = two_variable_program();
        let row = objective_row(&program, Capabilities::default()).unwrap();
        assert_eq!(row, vec![3.0, -1.0]);
    }

    #[test]
    fn test_objective_row_one_based_keeps_sentinel() {
        let program = two_variable_program();
        let caps = Capabilities {
            column_base: 1,
            ranged_rows: false,
        };
        let row = objective_row(&program, caps).unwrap();
        assert_eq!(row, vec![0.0, 3.0, -1.0]);
    }

    #[test]
    fn test_sparse_row_shifts_columns() {
        let coefficients =
            CoefficientMap::from_terms([(VariableId::new(1), 2.0), (VariableId::new(0), 1.0)])
                .unwrap();
        let row = sparse_row(&coefficients, CoefficientLocation::Constraint(0), 2, 1).unwrap();
        assert_eq!(row.columns, vec![1, 2]);
        assert_eq!(row.coefficients, vec![1.0, 2.0]);
    }

    #[test]
    fn test_sparse_row_rejects_out_of_range_index() {
        let coefficients = CoefficientMap::from_terms([(VariableId::new(5), 1.0)]).unwrap();
        let err = sparse_row(&coefficients, CoefficientLocation::Constraint(2), 3, 0).unwrap_err();
        assert_eq!(
            err,
            SolverError::InvalidCoefficientIndex {
                location: CoefficientLocation::Constraint(2),
                index: 5,
                num_variables: 3,
            }
        );
    }

    #[test]
    fn test_row_bounds() {
        assert_eq!(
            row_bounds(ConstraintBound::Fixed(1.0), false),
            vec![RowBound::Equal(1.0)]
        );
        assert_eq!(
            row_bounds(ConstraintBound::Lower(1.0), true),
            vec![RowBound::AtLeast(1.0)]
        );
        assert_eq!(
            row_bounds(ConstraintBound::Upper(1.0), true),
            vec![RowBound::AtMost(1.0)]
        );
    }

    #[test]
    fn test_double_bound_splits_without_ranged_rows() {
        let bound = ConstraintBound::Double {
            lower: -1.0,
            upper: 2.0,
        };
        assert_eq!(
            row_bounds(bound, true),
            vec![RowBound::Range {
                lower: -1.0,
                upper: 2.0
            }]
        );
        assert_eq!(
            row_bounds(bound, false),
            vec![RowBound::AtLeast(-1.0), RowBound::AtMost(2.0)]
        );
    }
}
