use thiserror::Error;

/// The engine resolves degenerate domain inputs to sentinel values (an empty
/// schedule, an absent plan) rather than failing. The only input it rejects
/// outright is an annual rate at or below -100%, which leaves the annuity
/// formula without meaning.
#[derive(Debug, Error)]
pub enum LoanPlannerError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },
}
