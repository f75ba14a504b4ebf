//! [`Backend`] implementation on top of `microlp::Problem`.

use crate::status::classify_error;
use lpadapt_model::{Sense, VariableDomain};
use lpadapt_solver::{
    Backend, BackendModel, Capabilities, RowBound, SolveStatus, SolverConfig, SolverError,
    SparseRow,
};
use microlp::{ComparisonOp, OptimizationDirection, Problem};
use tracing::{debug, trace, warn};

/// Integral values closer than this to an integer are snapped to it.
const INTEGRALITY_SNAP: f64 = 1e-6;

/// The microlp backend: 0-based columns, no ranged rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpBackend;

impl MicrolpBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for MicrolpBackend {
    type Model = MicrolpHandle;

    fn name(&self) -> &'static str {
        "microlp"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            column_base: 0,
            ranged_rows: false,
        }
    }

    fn create_model(
        &self,
        num_columns: usize,
        config: &SolverConfig,
    ) -> Result<Self::Model, SolverError> {
        if !config.is_empty() {
            debug!(
                component = "solver",
                operation = "configure",
                status = "success",
                solver = "microlp",
                time_limit = ?config.time_limit,
                mip_gap = ?config.mip_gap,
                threads = ?config.threads,
                presolve = ?config.presolve,
                "microlp has no tunable options; ignoring configuration"
            );
        }
        debug!(
            component = "solver",
            operation = "create_model",
            status = "success",
            solver = "microlp",
            num_cols = num_columns,
            "Created microlp model"
        );
        Ok(MicrolpHandle {
            columns: vec![
                ColumnSpec {
                    domain: VariableDomain::Continuous,
                    lower: 0.0,
                    upper: f64::INFINITY,
                    integer_range: None,
                };
                num_columns
            ],
            objective: vec![0.0; num_columns],
            direction: OptimizationDirection::Minimize,
            rows: Vec::new(),
            rows_started: false,
            values: None,
            objective_value: None,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnSpec {
    domain: VariableDomain,
    lower: f64,
    upper: f64,
    integer_range: Option<(i32, i32)>,
}

impl ColumnSpec {
    /// Integral column with no finite bound on at least one side.
    fn is_open_integer(&self) -> bool {
        self.domain.is_integral() && (self.lower.is_infinite() || self.upper.is_infinite())
    }
}

#[derive(Debug, Clone)]
struct BufferedRow {
    terms: Vec<(usize, f64)>,
    bound: RowBound,
}

/// One microlp problem owned by the driver for a single solve.
///
/// microlp takes each variable's objective coefficient when the variable is
/// created, so columns and rows are buffered and the problem is built at
/// solve time.
pub struct MicrolpHandle {
    columns: Vec<ColumnSpec>,
    objective: Vec<f64>,
    direction: OptimizationDirection,
    rows: Vec<BufferedRow>,
    rows_started: bool,
    values: Option<Vec<f64>>,
    objective_value: Option<f64>,
}

impl MicrolpHandle {
    /// Build the microlp problem. With `relaxed`, integral columns are added
    /// as continuous ones.
    fn build_problem(&self, relaxed: bool) -> Problem {
        let mut problem = Problem::new(self.direction);
        let mut variables = Vec::with_capacity(self.columns.len());
        for (spec, &cost) in self.columns.iter().zip(&self.objective) {
            let var = match spec.integer_range {
                Some(range) if !relaxed => problem.add_integer_var(cost, range),
                _ => problem.add_var(cost, (spec.lower, spec.upper)),
            };
            variables.push(var);
        }
        for row in &self.rows {
            let terms: Vec<(microlp::Variable, f64)> = row
                .terms
                .iter()
                .map(|&(column, coefficient)| (variables[column], coefficient))
                .collect();
            match row.bound {
                RowBound::Equal(value) => problem.add_constraint(terms, ComparisonOp::Eq, value),
                RowBound::AtLeast(lower) => problem.add_constraint(terms, ComparisonOp::Ge, lower),
                RowBound::AtMost(upper) => problem.add_constraint(terms, ComparisonOp::Le, upper),
                RowBound::Range { lower, upper } => {
                    problem.add_constraint(terms.clone(), ComparisonOp::Ge, lower);
                    problem.add_constraint(terms, ComparisonOp::Le, upper);
                }
            }
        }
        debug!(
            component = "solver",
            operation = "build_problem",
            status = "success",
            relaxed,
            num_vars = variables.len(),
            num_rows = self.rows.len(),
            "Built microlp problem"
        );
        problem
    }

    /// Open integer columns are capped at the `i32` range inside microlp, so
    /// unboundedness is decided on the continuous relaxation. An infeasible
    /// relaxation settles the integer program as well.
    fn relaxation_status(&self) -> Option<SolveStatus> {
        if !self.columns.iter().any(ColumnSpec::is_open_integer) {
            return None;
        }
        let status = match self.build_problem(true).solve() {
            Ok(_) => return None,
            Err(err) => classify_error(&err),
        };
        debug!(
            component = "solver",
            operation = "relaxation_check",
            status = "success",
            solver = "microlp",
            solver_status = status.as_str(),
            "Solved continuous relaxation"
        );
        (status.is_unbounded() || status.is_infeasible()).then_some(status)
    }

    fn read_values(&self, solution: &microlp::Solution) -> Result<Vec<f64>, SolverError> {
        let mut values = Vec::with_capacity(self.columns.len());
        for (column, ((_, &value), spec)) in solution.iter().zip(&self.columns).enumerate() {
            if !spec.domain.is_integral() {
                values.push(value);
                continue;
            }
            let value = snap_integral(value);
            if spec.is_open_integer() && !inside_i32(value) {
                return Err(SolverError::Backend(format!(
                    "integer column {} reached the edge of the microlp integer range ({})",
                    column, value
                )));
            }
            values.push(value);
        }
        Ok(values)
    }
}

/// Integer bounds for `add_integer_var`, rounded inward. Infinite sides map to
/// the ends of the `i32` range; finite sides beyond it are rejected.
fn integer_bounds(column: usize, lower: f64, upper: f64) -> Result<(i32, i32), SolverError> {
    let lower = integer_side(column, lower.ceil(), i32::MIN)?;
    let upper = integer_side(column, upper.floor(), i32::MAX)?;
    Ok((lower, upper))
}

fn integer_side(column: usize, value: f64, open: i32) -> Result<i32, SolverError> {
    if value.is_infinite() {
        return Ok(open);
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(SolverError::BackendInitFailure(format!(
            "integer bound {} of column {} is outside the range microlp supports",
            value, column
        )));
    }
    Ok(value as i32)
}

/// Strictly inside the `i32` range used for open integer sides.
fn inside_i32(value: f64) -> bool {
    value > f64::from(i32::MIN) && value < f64::from(i32::MAX)
}

fn snap_integral(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() <= INTEGRALITY_SNAP {
        rounded
    } else {
        value
    }
}

impl BackendModel for MicrolpHandle {
    fn set_column(
        &mut self,
        column: usize,
        domain: VariableDomain,
        lower: f64,
        upper: f64,
    ) -> Result<(), SolverError> {
        if self.rows_started {
            return Err(SolverError::Backend(
                "columns cannot change once rows are being added".to_string(),
            ));
        }
        let num_columns = self.columns.len();
        let spec = self.columns.get_mut(column).ok_or_else(|| {
            SolverError::Backend(format!(
                "column index {} out of bounds (num_columns = {})",
                column, num_columns
            ))
        })?;
        let integer_range = if domain.is_integral() {
            Some(integer_bounds(column, lower, upper)?)
        } else {
            None
        };
        *spec = ColumnSpec {
            domain,
            lower,
            upper,
            integer_range,
        };
        Ok(())
    }

    fn set_objective(&mut self, sense: Sense, row: &[f64]) -> Result<(), SolverError> {
        if row.len() != self.objective.len() {
            return Err(SolverError::Backend(format!(
                "objective length must match number of columns (expected {}, got {})",
                self.objective.len(),
                row.len()
            )));
        }
        self.direction = match sense {
            Sense::Minimize => OptimizationDirection::Minimize,
            Sense::Maximize => OptimizationDirection::Maximize,
        };
        self.objective.copy_from_slice(row);
        Ok(())
    }

    fn begin_rows(&mut self, expected_rows: usize) -> Result<(), SolverError> {
        self.rows_started = true;
        self.rows.reserve(expected_rows);
        Ok(())
    }

    fn add_row(&mut self, row: &SparseRow, bound: RowBound) -> Result<(), SolverError> {
        self.rows_started = true;
        let num_columns = self.columns.len();
        let mut terms = Vec::with_capacity(row.len());
        for (column, coefficient) in row.iter() {
            if column >= num_columns {
                warn!(
                    component = "solver",
                    operation = "add_row",
                    status = "error",
                    column,
                    num_columns,
                    "Column index out of bounds for constraint"
                );
                return Err(SolverError::Backend(format!(
                    "column index {} out of bounds",
                    column
                )));
            }
            terms.push((column, coefficient));
        }
        self.rows.push(BufferedRow { terms, bound });
        trace!(
            component = "solver",
            operation = "add_row",
            status = "success",
            num_coeffs = row.len(),
            "Added row"
        );
        Ok(())
    }

    fn solve(&mut self) -> Result<SolveStatus, SolverError> {
        self.rows_started = true;
        if let Some(status) = self.relaxation_status() {
            return Ok(status);
        }
        match self.build_problem(false).solve() {
            Ok(solution) => {
                let values = self.read_values(&solution)?;
                self.objective_value = Some(solution.objective());
                self.values = Some(values);
                Ok(SolveStatus::Optimal)
            }
            Err(err) => {
                let status = classify_error(&err);
                debug!(
                    component = "solver",
                    operation = "classify",
                    status = "success",
                    solver = "microlp",
                    error = %err,
                    solver_status = status.as_str(),
                    "Classified microlp outcome"
                );
                Ok(status)
            }
        }
    }

    fn column_values(&self) -> Result<Vec<f64>, SolverError> {
        self.values.clone().ok_or_else(|| {
            SolverError::Backend("solve must be called before column_values".to_string())
        })
    }

    fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }
}

impl std::fmt::Debug for MicrolpHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MicrolpHandle")
            .field("num_variables", &self.columns.len())
            .field("direction", &self.direction)
            .field("objective_value", &self.objective_value)
            .finish_non_exhaustive()
    }
}
