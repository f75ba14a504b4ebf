//! Safe wrapper around the HiGHS library.
//!
//! This module contains unsafe code for interacting with the C library.
#![allow(unsafe_code)]

use highs::{Col, RowProblem, Sense as HighsSense, SolvedModel};
use std::ffi::CStr;
use std::fmt;
use tracing::{debug, trace, warn};

/// Objective sense for optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Errors returned by the HiGHS model wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsModelError {
    ColumnCoefficientLengthMismatch {
        columns: usize,
        coefficients: usize,
    },
    ColumnIndexOutOfBounds {
        column_index: usize,
        num_columns: usize,
    },
    ObjectiveLengthMismatch {
        expected: usize,
        got: usize,
    },
    /// Columns were already handed to HiGHS and can no longer change.
    ColumnsFrozen,
    SolveRequired {
        operation: &'static str,
    },
    /// HiGHS refused an option value.
    OptionRejected {
        option: String,
    },
}

impl fmt::Display for HighsModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsModelError::ColumnCoefficientLengthMismatch {
                columns,
                coefficients,
            } => write!(
                f,
                "columns length ({}) must match coefficients length ({})",
                columns, coefficients
            ),
            HighsModelError::ColumnIndexOutOfBounds {
                column_index,
                num_columns,
            } => write!(
                f,
                "column index {} out of bounds (num_columns = {})",
                column_index, num_columns
            ),
            HighsModelError::ObjectiveLengthMismatch { expected, got } => write!(
                f,
                "objective length must match number of columns (expected {}, got {})",
                expected, got
            ),
            HighsModelError::ColumnsFrozen => {
                write!(f, "columns cannot change once rows are being added")
            }
            HighsModelError::SolveRequired { operation } => {
                write!(f, "solve must be called before {}", operation)
            }
            HighsModelError::OptionRejected { option } => {
                write!(f, "HiGHS rejected option '{}'", option)
            }
        }
    }
}

impl std::error::Error for HighsModelError {}

/// Option value types for HiGHS solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsOption {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnSpec {
    lower: f64,
    upper: f64,
    is_integer: bool,
}

/// What one HiGHS run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// HiGHS finished and reported this raw model status code.
    Finished(i32),
    /// The run itself returned an error status.
    Failed,
}

/// Safe wrapper around a HiGHS model.
///
/// Column specifications and the objective are buffered until rows start,
/// since HiGHS takes each column's objective coefficient when the column is
/// created.
pub struct HighsModel {
    specs: Vec<ColumnSpec>,
    objective: Vec<f64>,
    objective_sense: ObjectiveSense,
    problem: RowProblem,
    columns: Vec<Col>,
    num_rows: usize,
    solved: Option<SolvedModel>,
    log_to_console: bool,
    options: Vec<(String, HighsOption)>,
    verbosity: Option<u32>,
}

impl HighsModel {
    /// Create a model with `num_columns` columns, each `[0, +inf)` and
    /// continuous until set.
    pub fn with_columns(num_columns: usize) -> Self {
        debug!(
            component = "solver",
            operation = "init_highs",
            status = "success",
            num_cols = num_columns,
            "Creating new HiGHS model"
        );
        HighsModel {
            specs: vec![
                ColumnSpec {
                    lower: 0.0,
                    upper: f64::INFINITY,
                    is_integer: false,
                };
                num_columns
            ],
            objective: vec![0.0; num_columns],
            objective_sense: ObjectiveSense::Minimize,
            problem: RowProblem::default(),
            columns: Vec::new(),
            num_rows: 0,
            solved: None,
            log_to_console: false,
            options: Vec::new(),
            verbosity: None,
        }
    }

    /// Set bounds and integrality of one column.
    pub fn set_column(
        &mut self,
        column_index: usize,
        lower_bound: f64,
        upper_bound: f64,
        is_integer: bool,
    ) -> Result<(), HighsModelError> {
        if !self.columns.is_empty() {
            return Err(HighsModelError::ColumnsFrozen);
        }
        let num_columns = self.specs.len();
        let spec = self.specs.get_mut(column_index).ok_or_else(|| {
            warn!(
                component = "solver",
                operation = "set_column",
                status = "error",
                column_index,
                num_columns,
                "Column index out of bounds"
            );
            HighsModelError::ColumnIndexOutOfBounds {
                column_index,
                num_columns,
            }
        })?;
        trace!(
            lower_bound,
            upper_bound,
            is_integer,
            component = "solver",
            operation = "set_column",
            status = "success",
            "Setting column"
        );
        *spec = ColumnSpec {
            lower: lower_bound,
            upper: upper_bound,
            is_integer,
        };
        Ok(())
    }

    /// Set the dense objective, one coefficient per column.
    pub fn set_objective(
        &mut self,
        sense: ObjectiveSense,
        coefficients: &[f64],
    ) -> Result<(), HighsModelError> {
        if !self.columns.is_empty() {
            return Err(HighsModelError::ColumnsFrozen);
        }
        if coefficients.len() != self.specs.len() {
            return Err(HighsModelError::ObjectiveLengthMismatch {
                expected: self.specs.len(),
                got: coefficients.len(),
            });
        }
        debug!(
            component = "solver",
            operation = "set_objective_sense",
            status = "success",
            ?sense,
            "Setting objective sense"
        );
        self.objective_sense = sense;
        self.objective.copy_from_slice(coefficients);
        Ok(())
    }

    /// Hand the buffered columns to HiGHS. Idempotent.
    pub fn materialize_columns(&mut self) {
        if !self.columns.is_empty() || self.specs.is_empty() {
            return;
        }
        self.columns.reserve(self.specs.len());
        for (spec, &cost) in self.specs.iter().zip(&self.objective) {
            let col = if spec.is_integer {
                self.problem
                    .add_integer_column(cost, spec.lower..=spec.upper)
            } else {
                self.problem.add_column(cost, spec.lower..=spec.upper)
            };
            self.columns.push(col);
        }
        debug!(
            component = "solver",
            operation = "add_variables",
            status = "success",
            num_vars = self.columns.len(),
            "Added all columns to HiGHS"
        );
    }

    /// Add a linear constraint (row) with `lower_bound <= a x <= upper_bound`.
    ///
    /// # Errors
    ///
    /// Returns an error if columns and coefficients have different lengths
    /// or if any column index is out of bounds.
    pub fn add_row(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        columns: &[usize],
        coefficients: &[f64],
    ) -> Result<usize, HighsModelError> {
        if columns.len() != coefficients.len() {
            warn!(
                component = "solver",
                operation = "add_row",
                status = "error",
                columns = columns.len(),
                coefficients = coefficients.len(),
                "Column/coefficients length mismatch"
            );
            return Err(HighsModelError::ColumnCoefficientLengthMismatch {
                columns: columns.len(),
                coefficients: coefficients.len(),
            });
        }
        self.materialize_columns();
        trace!(
            lower_bound,
            upper_bound,
            component = "solver",
            operation = "add_row",
            status = "success",
            "Adding row"
        );
        let num_columns = self.columns.len();
        let mut factors = Vec::with_capacity(columns.len());
        for (col_idx, coeff) in columns.iter().copied().zip(coefficients.iter().copied()) {
            let col = *self.columns.get(col_idx).ok_or_else(|| {
                warn!(
                    component = "solver",
                    operation = "add_row",
                    status = "error",
                    col_idx,
                    num_columns,
                    "Column index out of bounds for constraint"
                );
                HighsModelError::ColumnIndexOutOfBounds {
                    column_index: col_idx,
                    num_columns,
                }
            })?;
            factors.push((col, coeff));
        }
        self.problem.add_row(lower_bound..=upper_bound, factors);
        self.num_rows += 1;
        Ok(self.num_rows - 1)
    }

    /// Enable or disable logging to console for the next solve
    pub fn set_log_to_console(&mut self, enabled: bool) {
        self.log_to_console = enabled;
    }

    /// Set a HiGHS option for the next solve.
    pub fn set_option(&mut self, option: impl Into<String>, value: HighsOption) {
        self.options.push((option.into(), value));
    }

    /// Set verbosity level for the next solve.
    pub fn set_verbosity(&mut self, level: u32) {
        self.verbosity = Some(level);
    }

    /// Run HiGHS on the built problem.
    ///
    /// # Errors
    ///
    /// Returns [`HighsModelError::OptionRejected`] if HiGHS refuses a stored
    /// option. Nothing is solved in that case.
    pub fn solve(&mut self) -> Result<RunOutcome, HighsModelError> {
        self.materialize_columns();
        debug!(
            num_cols = self.specs.len(),
            num_rows = self.num_rows,
            ?self.objective_sense,
            component = "solver",
            operation = "solve",
            status = "success",
            "Solving model"
        );

        let sense = match self.objective_sense {
            ObjectiveSense::Minimize => HighsSense::Minimise,
            ObjectiveSense::Maximize => HighsSense::Maximise,
        };

        // Consume the built problem to avoid cloning it.
        let problem = std::mem::take(&mut self.problem);
        let mut model = problem.optimise(sense);
        if self.verbosity.unwrap_or(0) == 0 && !self.log_to_console {
            model.make_quiet();
        }
        let mut options = std::mem::take(&mut self.options);
        if let Some(level) = self.verbosity {
            options.push(("output_flag".to_string(), HighsOption::Bool(level > 0)));
        }
        if self.log_to_console {
            options.push(("log_to_console".to_string(), HighsOption::Bool(true)));
            options.push(("output_flag".to_string(), HighsOption::Bool(true)));
        }
        for (option, value) in options {
            let applied = match &value {
                HighsOption::Bool(val) => model.try_set_option(option.as_str(), *val),
                HighsOption::Int(val) => model.try_set_option(option.as_str(), *val),
                HighsOption::Float(val) => model.try_set_option(option.as_str(), *val),
                HighsOption::Str(val) => model.try_set_option(option.as_str(), val.as_str()),
            };
            if let Err(err) = applied {
                warn!(
                    component = "solver",
                    operation = "set_option",
                    status = "error",
                    option = option.as_str(),
                    ?value,
                    ?err,
                    "HiGHS rejected option"
                );
                return Err(HighsModelError::OptionRejected { option });
            }
        }

        let outcome = match model.try_solve() {
            Ok(solved) => {
                // SAFETY: `solved` owns a live HiGHS instance for this call.
                let code = unsafe { highs_sys::Highs_getModelStatus(solved.as_ptr()) };
                trace!(
                    component = "solver",
                    operation = "solve",
                    status = "success",
                    model_status = code,
                    "Solution status received"
                );
                self.solved = Some(solved);
                RunOutcome::Finished(code)
            }
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "solve",
                    status = "error",
                    ?err,
                    "HiGHS run returned an error status"
                );
                RunOutcome::Failed
            }
        };
        self.columns.clear();
        self.verbosity = None;
        Ok(outcome)
    }

    /// Number of columns in the model.
    pub fn num_columns(&self) -> usize {
        self.specs.len()
    }

    /// Number of rows added so far. Unaffected by solving.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Get the objective value of the current solution
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn objective_value(&self) -> Result<f64, HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "objective_value",
        })?;
        Ok(solved.objective_value())
    }

    /// Primal column values of the current solution.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn col_values(&self) -> Result<Vec<f64>, HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "col_values",
        })?;
        Ok(solved.get_solution().columns().to_vec())
    }
}

/// Return the HiGHS solver version string, if available.
pub fn highs_version() -> Option<String> {
    // SAFETY: HiGHS returns a pointer to a static NUL-terminated string.
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

impl fmt::Debug for HighsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let objective_value = self.solved.as_ref().map(|s| s.objective_value());
        f.debug_struct("HighsModel")
            .field("num_variables", &self.specs.len())
            .field("num_constraints", &self.num_rows)
            .field("objective_sense", &self.objective_sense)
            .field("objective_value", &objective_value)
            .finish_non_exhaustive()
    }
}
