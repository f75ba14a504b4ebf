//! Capability interface implemented once per solver backend.

use crate::{SolveStatus, SolverConfig, SolverError};
use lpadapt_model::{Sense, VariableDomain};

/// Static properties of a backend that change how a program is translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Index of the first column in the backend's numbering (0 or 1).
    ///
    /// Slots below the base in dense rows are sentinels and stay zero.
    pub column_base: usize,
    /// Whether one row can carry both a lower and an upper bound.
    pub ranged_rows: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            column_base: 0,
            ranged_rows: false,
        }
    }
}

/// Relational form of one backend row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowBound {
    Equal(f64),
    AtLeast(f64),
    AtMost(f64),
    Range { lower: f64, upper: f64 },
}

impl RowBound {
    /// Interval `(lower, upper)` for backends that take rows as intervals.
    pub fn interval(self) -> (f64, f64) {
        match self {
            RowBound::Equal(value) => (value, value),
            RowBound::AtLeast(lower) => (lower, f64::INFINITY),
            RowBound::AtMost(upper) => (f64::NEG_INFINITY, upper),
            RowBound::Range { lower, upper } => (lower, upper),
        }
    }
}

/// Sparse row in backend column numbering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseRow {
    pub columns: Vec<usize>,
    pub coefficients: Vec<f64>,
}

impl SparseRow {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
            coefficients: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, column: usize, coefficient: f64) {
        self.columns.push(column);
        self.coefficients.push(coefficient);
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.columns
            .iter()
            .copied()
            .zip(self.coefficients.iter().copied())
    }
}

/// A solver backend: a factory for per-solve backend models.
pub trait Backend {
    /// Model handle owned by the driver for the duration of one solve.
    /// Dropping it must release every backend resource.
    type Model: BackendModel;

    /// Short stable name, e.g. `"highs"`.
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> Capabilities;

    /// Allocate a model with `num_columns` columns and apply `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::BackendInitFailure`] if the backend rejects the
    /// allocation or an option.
    fn create_model(
        &self,
        num_columns: usize,
        config: &SolverConfig,
    ) -> Result<Self::Model, SolverError>;
}

/// Backend-native model under construction, then solved once.
///
/// The driver calls these in a fixed order: every `set_column`, then
/// `set_objective`, then `begin_rows`, `add_row`* and `end_rows`, then
/// `solve`, then read-back. Column indices are already in the backend's
/// numbering.
pub trait BackendModel {
    fn set_column(
        &mut self,
        column: usize,
        domain: VariableDomain,
        lower: f64,
        upper: f64,
    ) -> Result<(), SolverError>;

    /// Dense objective row of length `num_columns + column_base`.
    fn set_objective(&mut self, sense: Sense, row: &[f64]) -> Result<(), SolverError>;

    /// Enter bulk row-loading mode.
    fn begin_rows(&mut self, _expected_rows: usize) -> Result<(), SolverError> {
        Ok(())
    }

    /// Leave bulk row-loading mode. Called exactly once after a successful
    /// `begin_rows`, even when adding a row failed.
    fn end_rows(&mut self) {}

    fn add_row(&mut self, row: &SparseRow, bound: RowBound) -> Result<(), SolverError>;

    /// Run the backend once and classify its native outcome.
    fn solve(&mut self) -> Result<SolveStatus, SolverError>;

    /// One value per column, in column order.
    fn column_values(&self) -> Result<Vec<f64>, SolverError>;

    /// Backend-reported objective value, without the program constant.
    fn objective_value(&self) -> Option<f64> {
        None
    }
}
