use crate::valuation::valuation_model::PropertyType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("No cost schedule entry for {property_type} properties with {units} residential unit(s)")]
    NoScheduleForProfile {
        property_type: PropertyType,
        units: u32,
    },

    #[error("Invalid cost schedule: {0}")]
    InvalidSchedule(String),

    #[error("Failed to load cost schedule: {0}")]
    LoadError(String),
}
