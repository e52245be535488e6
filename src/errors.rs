use thiserror::Error;

use crate::cost_schedule::ScheduleError;
use crate::price_index::IndexError;
use crate::valuation::ValidationErrors;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Price index operation failed: {0}")]
    Index(#[from] IndexError),

    #[error("Cost schedule operation failed: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
