//! Backend-agnostic solve layer.
//!
//! A [`Backend`] turns a [`LinearProgram`](lpadapt_model::LinearProgram) into
//! its native model through the [`BackendModel`] calls issued by
//! [`solve_with`]. Backends classify their native result into a
//! [`SolveStatus`]; raw codes never leave the backend crate.

pub mod backend;
pub mod config;
pub mod driver;
pub mod error;
pub mod solution;
pub mod status;
pub mod translate;

pub use backend::{Backend, BackendModel, Capabilities, RowBound, SparseRow};
pub use config::SolverConfig;
pub use driver::{Solver, solve_with};
pub use error::SolverError;
pub use solution::Solution;
pub use status::SolveStatus;
