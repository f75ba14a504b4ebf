//! Backend-independent solve outcomes.

/// Outcome of one solve, after the backend's native result code has been
/// classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// Integer-feasible solution found but not proven optimal.
    SuboptimalInteger,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// The backend gave up for numerical reasons.
    NumericalFailure,
    /// The backend ran out of memory or a similar resource.
    ResourceExhausted,
    /// Time limit, iteration limit or an abort stopped the solve.
    Cancelled,
    /// The backend reported a code this layer does not recognize.
    UnknownBackendOutcome,
}

impl SolveStatus {
    /// All statuses, in declaration order.
    pub const ALL: [SolveStatus; 8] = [
        SolveStatus::Optimal,
        SolveStatus::SuboptimalInteger,
        SolveStatus::Infeasible,
        SolveStatus::Unbounded,
        SolveStatus::NumericalFailure,
        SolveStatus::ResourceExhausted,
        SolveStatus::Cancelled,
        SolveStatus::UnknownBackendOutcome,
    ];

    /// Check if the status indicates an optimal solution.
    pub fn is_optimal(self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    /// Check if variable values are available for this status.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::SuboptimalInteger)
    }

    /// Check if the status indicates infeasibility.
    pub fn is_infeasible(self) -> bool {
        matches!(self, SolveStatus::Infeasible)
    }

    /// Check if the status indicates unboundedness.
    pub fn is_unbounded(self) -> bool {
        matches!(self, SolveStatus::Unbounded)
    }

    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::SuboptimalInteger => "suboptimal_integer",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::NumericalFailure => "numerical_failure",
            SolveStatus::ResourceExhausted => "resource_exhausted",
            SolveStatus::Cancelled => "cancelled",
            SolveStatus::UnknownBackendOutcome => "unknown_backend_outcome",
        }
    }

    pub(crate) fn message(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "Solver returned optimal",
            SolveStatus::SuboptimalInteger => {
                "Integer solution found but not proven optimal"
            }
            SolveStatus::Infeasible => "Problem is infeasible",
            SolveStatus::Unbounded => "Problem is unbounded",
            SolveStatus::NumericalFailure => "Solver encountered a numerical failure",
            SolveStatus::ResourceExhausted => "Solver ran out of resources",
            SolveStatus::Cancelled => "Solve was stopped by a limit or an abort",
            SolveStatus::UnknownBackendOutcome => "Solver returned an unrecognized outcome",
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
