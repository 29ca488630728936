use thiserror::Error;

/// Error taxonomy for the planner.
///
/// `NoSolution` is deliberately not a variant here: an unsatisfiable formula
/// at the requested horizon is a normal outcome, represented as a value
/// (`PlanOutcome::NoSolution`), never raised as an error.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Malformed input: raised before any clause is emitted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solver reported SAT but the decoder found an undefined schedule
    /// slot. Indicates a bug in the encoder or the solver; never recovered
    /// silently.
    #[error("inconsistent model: {0}")]
    InconsistentModel(String),

    /// The adapter could not communicate with the SAT backend.
    #[error("solver failure: {0}")]
    SolverFailure(String),
}
