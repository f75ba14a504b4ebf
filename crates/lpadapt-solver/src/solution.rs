//! Uniform solve result.

use crate::{SolveStatus, SolverError};
use lpadapt_model::VariableId;

/// Result of one solve, independent of the backend that produced it.
///
/// `values` holds one entry per program variable, in variable order, when
/// the status carries a solution and is empty otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    status: SolveStatus,
    values: Vec<f64>,
    objective_value: Option<f64>,
    backend: &'static str,
    solve_time_seconds: f64,
}

impl Solution {
    /// Assemble a solution. Values and objective are dropped when `status`
    /// carries no solution.
    pub fn new(
        status: SolveStatus,
        values: Vec<f64>,
        objective_value: Option<f64>,
        backend: &'static str,
        solve_time_seconds: f64,
    ) -> Self {
        let (values, objective_value) = if status.has_solution() {
            (values, objective_value)
        } else {
            (Vec::new(), None)
        };
        Self {
            status,
            values,
            objective_value,
            backend,
            solve_time_seconds,
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Get all primal values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the value of a variable
    pub fn value(&self, var_id: VariableId) -> Option<f64> {
        self.values.get(var_id.index()).copied()
    }

    /// Objective value including the program's constant term.
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    /// Name of the backend that produced this solution.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Get solve time in seconds
    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }

    pub fn has_solution(&self) -> bool {
        self.status.has_solution()
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// Take the values, turning a status without a solution into an error.
    pub fn into_values(self) -> Result<Vec<f64>, SolverError> {
        if self.status.has_solution() {
            Ok(self.values)
        } else {
            Err(SolverError::SolveFailure {
                status: self.status,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_with_values() {
        let solution = Solution::new(
            SolveStatus::Optimal,
            vec![1.0, 2.0],
            Some(5.0),
            "fixture",
            0.1,
        );
        assert!(solution.is_optimal());
        assert!(solution.has_solution());
        assert_eq!(solution.value(VariableId::new(1)), Some(2.0));
        assert_eq!(solution.value(VariableId::new(2)), None);
        assert_eq!(solution.objective_value(), Some(5.0));
        assert_eq!(solution.backend(), "fixture");
        assert_eq!(solution.into_values().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_solution_without_solution_drops_values() {
        let solution = Solution::new(
            SolveStatus::Infeasible,
            vec![1.0, 2.0],
            Some(5.0),
            "fixture",
            0.1,
        );
        assert!(solution.values().is_empty());
        assert_eq!(solution.objective_value(), None);
        assert_eq!(
            solution.into_values(),
            Err(SolverError::SolveFailure {
                status: SolveStatus::Infeasible
            })
        );
    }

    #[test]
    fn test_results_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Solution>();
        assert_send_sync::<SolverError>();
        assert_send_sync::<crate::SolverConfig>();
        assert_send_sync::<lpadapt_model::LinearProgram>();
    }

    #[test]
    fn test_suboptimal_integer_keeps_values() {
        let solution =
            Solution::new(SolveStatus::SuboptimalInteger, vec![3.0], None, "fixture", 0.0);
        assert!(!solution.is_optimal());
        assert_eq!(solution.values(), &[3.0]);
    }
}
