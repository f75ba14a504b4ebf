//! [`Backend`] implementation on top of [`HighsModel`].

use crate::ffi::{
    HighsModel, HighsModelError, HighsOption, ObjectiveSense, RunOutcome, highs_version,
};
use crate::status::HighsModelCode;
use lpadapt_model::{Sense, VariableDomain};
use lpadapt_solver::{
    Backend, BackendModel, Capabilities, RowBound, SolveStatus, SolverConfig, SolverError,
    SparseRow,
};
use tracing::{debug, warn};

fn highs_model_error_to_solver_error(err: HighsModelError) -> SolverError {
    match err {
        HighsModelError::OptionRejected { .. } => SolverError::BackendInitFailure(err.to_string()),
        _ => SolverError::Backend(err.to_string()),
    }
}

/// The HiGHS backend: 0-based columns, native ranged rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsBackend;

impl HighsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for HighsBackend {
    type Model = HighsHandle;

    fn name(&self) -> &'static str {
        "highs"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            column_base: 0,
            ranged_rows: true,
        }
    }

    fn create_model(
        &self,
        num_columns: usize,
        config: &SolverConfig,
    ) -> Result<Self::Model, SolverError> {
        let solver_version = highs_version().unwrap_or_else(|| "unknown".to_string());
        let mut model = HighsModel::with_columns(num_columns);
        apply_solver_config(&mut model, config)?;
        debug!(
            component = "solver",
            operation = "create_model",
            status = "success",
            solver = "highs",
            solver_version = %solver_version,
            num_cols = num_columns,
            "Created HiGHS model"
        );
        Ok(HighsHandle { model })
    }
}

fn apply_solver_config(model: &mut HighsModel, config: &SolverConfig) -> Result<(), SolverError> {
    model.set_log_to_console(config.log_to_console.unwrap_or(false));

    if let Some(limit) = config.time_limit {
        model.set_option("time_limit", HighsOption::Float(limit));
    }
    if let Some(gap) = config.mip_gap {
        model.set_option("mip_rel_gap", HighsOption::Float(gap));
    }
    if let Some(level) = config.verbosity {
        model.set_verbosity(level);
    }
    if let Some(presolve) = config.presolve {
        let presolve_str = if presolve { "on" } else { "off" };
        model.set_option("presolve", HighsOption::Str(presolve_str.to_string()));
    }
    if let Some(threads) = config.threads {
        let threads = i32::try_from(threads).map_err(|_| {
            SolverError::BackendInitFailure(format!("thread count {} is too large", threads))
        })?;
        model.set_option("threads", HighsOption::Int(threads));
    }
    if let Some(tolerance) = config.tolerance {
        model.set_option("primal_feasibility_tolerance", HighsOption::Float(tolerance));
        model.set_option("dual_feasibility_tolerance", HighsOption::Float(tolerance));
    }
    Ok(())
}

/// One HiGHS model owned by the driver for a single solve.
#[derive(Debug)]
pub struct HighsHandle {
    model: HighsModel,
}

impl BackendModel for HighsHandle {
    fn set_column(
        &mut self,
        column: usize,
        domain: VariableDomain,
        lower: f64,
        upper: f64,
    ) -> Result<(), SolverError> {
        self.model
            .set_column(column, lower, upper, domain.is_integral())
            .map_err(highs_model_error_to_solver_error)
    }

    fn set_objective(&mut self, sense: Sense, row: &[f64]) -> Result<(), SolverError> {
        let sense = match sense {
            Sense::Minimize => ObjectiveSense::Minimize,
            Sense::Maximize => ObjectiveSense::Maximize,
        };
        self.model
            .set_objective(sense, row)
            .map_err(highs_model_error_to_solver_error)
    }

    fn begin_rows(&mut self, _expected_rows: usize) -> Result<(), SolverError> {
        self.model.materialize_columns();
        Ok(())
    }

    fn add_row(&mut self, row: &SparseRow, bound: RowBound) -> Result<(), SolverError> {
        let (lower, upper) = bound.interval();
        self.model
            .add_row(lower, upper, &row.columns, &row.coefficients)
            .map(|_| ())
            .map_err(highs_model_error_to_solver_error)
    }

    fn solve(&mut self) -> Result<SolveStatus, SolverError> {
        let outcome = self
            .model
            .solve()
            .map_err(highs_model_error_to_solver_error)?;
        let code = match outcome {
            RunOutcome::Finished(code) => HighsModelCode::from_raw(code),
            RunOutcome::Failed => HighsModelCode::SolveError,
        };
        let status = code.classify()?;
        if let HighsModelCode::Unrecognized(raw) = code {
            warn!(
                component = "solver",
                operation = "classify",
                status = "warn",
                solver = "highs",
                model_status = raw,
                "Unrecognized HiGHS model status"
            );
        }
        debug!(
            component = "solver",
            operation = "classify",
            status = "success",
            solver = "highs",
            model_status = %code,
            solver_status = status.as_str(),
            num_cols = self.model.num_columns(),
            num_rows = self.model.num_rows(),
            "Classified HiGHS outcome"
        );
        Ok(status)
    }

    fn column_values(&self) -> Result<Vec<f64>, SolverError> {
        self.model
            .col_values()
            .map_err(highs_model_error_to_solver_error)
    }

    fn objective_value(&self) -> Option<f64> {
        self.model.objective_value().ok()
    }
}
