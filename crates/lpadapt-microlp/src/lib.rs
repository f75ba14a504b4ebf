//! Pure-Rust microlp backend for lpadapt.
//!
//! microlp has no ranged rows, so double bounded constraints arrive as an
//! at-least row followed by an at-most row.

pub mod backend;
mod status;

pub use backend::{MicrolpBackend, MicrolpHandle};
pub use status::classify_error;
