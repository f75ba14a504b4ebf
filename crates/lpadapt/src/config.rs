//! Top-level solve configuration.

use crate::BackendKind;
use lpadapt_solver::SolverConfig;

/// Backend choice plus the options handed to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub backend: BackendKind,
    pub solver: SolverConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

impl From<BackendKind> for Config {
    fn from(backend: BackendKind) -> Self {
        Self::new().with_backend(backend)
    }
}
