//! Backend selection.

use std::fmt;
use std::str::FromStr;

/// Solver backends this crate knows about.
///
/// A kind may be known but not compiled in; see [`BackendKind::is_available`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BackendKind {
    Highs,
    Microlp,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::Highs, BackendKind::Microlp];

    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Highs => "highs",
            BackendKind::Microlp => "microlp",
        }
    }

    /// Whether this backend was compiled into the current build.
    pub fn is_available(self) -> bool {
        match self {
            BackendKind::Highs => cfg!(feature = "highs"),
            BackendKind::Microlp => cfg!(feature = "microlp"),
        }
    }

    /// Backends compiled into the current build, in preference order.
    pub fn available() -> Vec<BackendKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.is_available())
            .collect()
    }
}

impl Default for BackendKind {
    /// HiGHS when compiled in, microlp otherwise.
    fn default() -> Self {
        if cfg!(feature = "highs") || !cfg!(feature = "microlp") {
            BackendKind::Highs
        } else {
            BackendKind::Microlp
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown backend name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBackend(pub String);

impl fmt::Display for UnknownBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[BACKEND_UNKNOWN] Unknown backend '{}' (expected one of: highs, microlp)",
            self.0
        )
    }
}

impl std::error::Error for UnknownBackend {}

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "highs" => Ok(BackendKind::Highs),
            "microlp" => Ok(BackendKind::Microlp),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}
