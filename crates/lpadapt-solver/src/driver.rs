//! Generic solve driver shared by every backend.

use crate::backend::{Backend, BackendModel, RowBound, SparseRow};
use crate::translate::{backend_column, objective_row, row_bounds, sparse_row};
use crate::{Solution, SolverConfig, SolverError};
use lpadapt_model::{CoefficientLocation, LinearProgram};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Keeps a backend model in row-loading mode until dropped.
struct RowLoader<'a, M: BackendModel> {
    model: &'a mut M,
    rows: usize,
}

impl<'a, M: BackendModel> RowLoader<'a, M> {
    fn begin(model: &'a mut M, expected_rows: usize) -> Result<Self, SolverError> {
        model.begin_rows(expected_rows)?;
        Ok(Self { model, rows: 0 })
    }

    fn add(&mut self, row: &SparseRow, bound: RowBound) -> Result<(), SolverError> {
        self.model.add_row(row, bound)?;
        self.rows += 1;
        Ok(())
    }
}

impl<M: BackendModel> Drop for RowLoader<'_, M> {
    fn drop(&mut self) {
        self.model.end_rows();
        trace!(
            component = "solver",
            operation = "end_rows",
            status = "success",
            num_rows = self.rows,
            "Left row-loading mode"
        );
    }
}

/// Solve `program` on `backend`.
///
/// Non-solution outcomes (infeasible, unbounded, limits, ...) are returned as
/// an `Ok` [`Solution`] with no values. Use [`Solution::into_values`] to turn
/// them into errors.
///
/// # Errors
///
/// - [`SolverError::EmptyModel`] if the program has no variables. The
///   backend is never called.
/// - [`SolverError::InvalidCoefficientIndex`] if a row names a column past
///   the variable count.
/// - [`SolverError::BackendInitFailure`] if the backend rejects the model or
///   an option.
/// - [`SolverError::Backend`] if the backend fails while loading rows or
///   returns the wrong number of values.
pub fn solve_with<B: Backend>(
    backend: &B,
    program: &LinearProgram,
    config: &SolverConfig,
) -> Result<Solution, SolverError> {
    let num_columns = program.num_variables();
    if num_columns == 0 {
        warn!(
            component = "solver",
            operation = "solve",
            status = "error",
            solver = backend.name(),
            "Program has no variables"
        );
        return Err(SolverError::EmptyModel);
    }
    if let Some(option) = config.invalid_option() {
        warn!(
            component = "solver",
            operation = "configure",
            status = "error",
            solver = backend.name(),
            option,
            "Rejected solver option"
        );
        return Err(SolverError::BackendInitFailure(format!(
            "invalid value for option '{}'",
            option
        )));
    }

    let capabilities = backend.capabilities();
    let base = capabilities.column_base;
    let objective = objective_row(program, capabilities)?;
    let mut rows = Vec::with_capacity(program.num_constraints());
    for (index, constraint) in program.constraints().iter().enumerate() {
        let row = sparse_row(
            constraint.coefficients(),
            CoefficientLocation::Constraint(index),
            num_columns,
            base,
        )?;
        rows.push((row, row_bounds(constraint.bound(), capabilities.ranged_rows)));
    }
    let num_rows: usize = rows.iter().map(|(_, bounds)| bounds.len()).sum();

    let solve_started = Instant::now();
    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = backend.name(),
        num_cols = num_columns,
        num_constraints = program.num_constraints(),
        num_rows,
        nnz = program.num_coefficients(),
        "Starting solve process"
    );

    let mut model = backend.create_model(num_columns, config)?;

    for (index, variable) in program.variables().iter().enumerate() {
        let (lower, upper) = variable.resolved_interval(program.default_bound())?;
        let column = backend_column(index, base);
        model.set_column(column, variable.domain(), lower, upper)?;
        trace!(
            component = "solver",
            operation = "set_column",
            status = "success",
            column,
            lower,
            upper,
            domain = variable.domain().as_str(),
            "Configured column"
        );
    }

    let sense = program.objective().sense;
    model.set_objective(sense, &objective)?;
    debug!(
        component = "solver",
        operation = "set_objective",
        status = "success",
        sense = sense.as_str(),
        terms = program.objective().coefficients().len(),
        "Set objective row"
    );

    {
        let mut loader = RowLoader::begin(&mut model, num_rows)?;
        for (constraint_index, (row, bounds)) in rows.iter().enumerate() {
            for bound in bounds {
                loader.add(row, *bound)?;
            }
            trace!(
                component = "solver",
                operation = "add_constraint",
                status = "success",
                constraint_index,
                num_coeffs = row.len(),
                backend_rows = bounds.len(),
                "Added constraint rows"
            );
        }
    }
    debug!(
        component = "solver",
        operation = "add_constraints",
        status = "success",
        num_constraints = program.num_constraints(),
        num_rows,
        "Added all constraints"
    );

    let status = model.solve()?;
    let solve_ms = solve_started.elapsed().as_secs_f64() * 1000.0;
    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = backend.name(),
        solver_status = status.as_str(),
        duration_ms = solve_ms,
        "Backend solve completed"
    );

    if !status.has_solution() {
        warn!(
            component = "solver",
            operation = "solve",
            status = "warn",
            solver = backend.name(),
            solver_status = status.as_str(),
            duration_ms = solve_ms,
            "Solver did not find a solution"
        );
        return Ok(Solution::new(
            status,
            Vec::new(),
            None,
            backend.name(),
            solve_started.elapsed().as_secs_f64(),
        ));
    }

    let values = model.column_values()?;
    if values.len() != num_columns {
        warn!(
            component = "solver",
            operation = "extract_solution",
            status = "error",
            expected = num_columns,
            got = values.len(),
            "Backend returned wrong number of column values"
        );
        return Err(SolverError::Backend(format!(
            "expected {} column values, got {}",
            num_columns,
            values.len()
        )));
    }
    let objective_value = match model.objective_value() {
        Some(value) => value + program.objective().constant(),
        None => program.objective_value(&values),
    };

    if !status.is_optimal() {
        warn!(
            component = "solver",
            operation = "solve",
            status = "warn",
            solver = backend.name(),
            solver_status = status.as_str(),
            objective_value,
            "Solver stopped early but returning best solution found"
        );
    }
    debug!(
        component = "solver",
        operation = "extract_solution",
        status = "success",
        objective_value,
        num_primal_values = values.len(),
        "Solution extracted"
    );

    Ok(Solution::new(
        status,
        values,
        Some(objective_value),
        backend.name(),
        solve_started.elapsed().as_secs_f64(),
    ))
}

/// A backend paired with the configuration for its next solves.
#[derive(Debug, Clone, Default)]
pub struct Solver<B> {
    backend: B,
    config: SolverConfig,
}

impl<B: Backend> Solver<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: SolverConfig::new(),
        }
    }

    pub fn with_config(backend: B, config: SolverConfig) -> Self {
        Self { backend, config }
    }

    fn update_config(&mut self, update: impl FnOnce(SolverConfig) -> SolverConfig) {
        self.config = update(std::mem::take(&mut self.config));
    }

    /// Enable or disable backend logging to console for the next solve.
    pub fn set_log_to_console(&mut self, enabled: bool) {
        self.update_config(|config| config.with_log_to_console(enabled));
    }

    /// Set a time limit in seconds for the next solve.
    pub fn set_time_limit(&mut self, seconds: f64) {
        self.update_config(|config| config.with_time_limit(seconds));
    }

    /// Set a relative MIP gap for the next solve.
    pub fn set_mip_gap(&mut self, gap: f64) {
        self.update_config(|config| config.with_mip_gap(gap));
    }

    pub fn set_verbosity(&mut self, level: u32) {
        self.update_config(|config| config.with_verbosity(level));
    }

    pub fn set_presolve(&mut self, enabled: bool) {
        self.update_config(|config| config.with_presolve(enabled));
    }

    pub fn set_threads(&mut self, threads: u32) {
        self.update_config(|config| config.with_threads(threads));
    }

    /// Set feasibility tolerance for the next solve.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.update_config(|config| config.with_tolerance(tolerance));
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Solve `program` with the stored configuration.
    pub fn solve(&self, program: &LinearProgram) -> Result<Solution, SolverError> {
        solve_with(&self.backend, program, &self.config)
    }
}
