//! HiGHS backend for lpadapt.
//!
//! Columns are 0-based and rows carry both bounds natively, so double
//! bounded constraints reach HiGHS as a single ranged row.

pub mod backend;
pub mod ffi;
pub mod status;

pub use backend::{HighsBackend, HighsHandle};
pub use ffi::{
    HighsModel, HighsModelError, HighsOption, ObjectiveSense, RunOutcome, highs_version,
};
pub use status::HighsModelCode;
