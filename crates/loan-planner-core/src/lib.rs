pub mod affordability;
pub mod amortization;
pub mod error;
pub mod planning;
pub mod types;

pub use error::LoanPlannerError;
pub use types::*;

/// Standard result type for all loan-planner operations
pub type LoanPlannerResult<T> = Result<T, LoanPlannerError>;
