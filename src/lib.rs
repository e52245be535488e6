//! Ertragswert Core - income-approach (Ertragswertverfahren) valuation for
//! rented residential and commercial property.
//!
//! The engine validates a raw appraisal request, resolves the price index
//! and the management cost schedule applying to the property, capitalizes
//! the building income over its remaining useful life and assembles a
//! report-ready result. Reference data lives in immutable snapshots that
//! are swapped whole on refresh.

pub mod constants;
pub mod cost_schedule;
pub mod errors;
pub mod price_index;
pub mod utils;
pub mod valuation;

// Re-export common types from the valuation and reference data modules
pub use cost_schedule::*;
pub use price_index::*;
pub use valuation::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
