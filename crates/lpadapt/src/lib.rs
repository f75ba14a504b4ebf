//! Solve one linear program model with interchangeable backends.
//!
//! Build a [`LinearProgram`], pick a backend with [`Config`], and call
//! [`solve`]:
//!
//! ```no_run
//! use lpadapt::{Config, LinearExpression, LinearProgram, Variable};
//!
//! let mut program = LinearProgram::new();
//! let x = program.add_variable(Variable::continuous().with_bounds(0.0, 10.0)?)?;
//! program.maximize(LinearExpression::var(x))?;
//!
//! let solution = lpadapt::solve(&program, &Config::default())?;
//! if solution.has_solution() {
//!     println!("x = {:?}", solution.value(x));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
pub mod config;

pub use backend::{BackendKind, UnknownBackend};
pub use config::Config;

pub use lpadapt_model::{
    CoefficientLocation, CoefficientMap, ConstraintBound, ConstraintId, LinearConstraint,
    LinearExpression, LinearProgram, ModelError, Objective, Sense, Variable, VariableBound,
    VariableDomain, VariableId,
};
pub use lpadapt_solver::{
    Backend, BackendModel, Capabilities, Solution, SolveStatus, Solver, SolverConfig,
    SolverError, solve_with,
};

#[cfg(feature = "highs")]
pub use lpadapt_highs::HighsBackend;
#[cfg(feature = "microlp")]
pub use lpadapt_microlp::MicrolpBackend;

/// Solve `program` on the backend named by `config`.
///
/// # Errors
///
/// Returns [`SolverError::BackendUnavailable`] if the backend was not
/// compiled in, and otherwise whatever [`solve_with`] returns.
pub fn solve(program: &LinearProgram, config: &Config) -> Result<Solution, SolverError> {
    tracing::debug!(
        component = "lpadapt",
        operation = "solve",
        status = "success",
        backend = config.backend.as_str(),
        "Dispatching to backend"
    );
    match config.backend {
        #[cfg(feature = "highs")]
        BackendKind::Highs => solve_with(&HighsBackend::new(), program, &config.solver),
        #[cfg(feature = "microlp")]
        BackendKind::Microlp => solve_with(&MicrolpBackend::new(), program, &config.solver),
        #[allow(unreachable_patterns)]
        other => {
            tracing::warn!(
                component = "lpadapt",
                operation = "solve",
                status = "error",
                backend = other.as_str(),
                "Backend not compiled into this build"
            );
            Err(SolverError::BackendUnavailable(other.as_str().to_string()))
        }
    }
}
