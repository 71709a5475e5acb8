pub mod book;
pub mod dates;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod schedule;
pub mod types;

pub use error::LoanbookError;
pub use types::*;

/// Standard result type for all loanbook operations
pub type LoanbookResult<T> = Result<T, LoanbookError>;
