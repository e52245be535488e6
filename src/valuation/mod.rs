pub mod valuation_aggregator;
pub mod valuation_calculator;
pub mod valuation_errors;
pub mod valuation_model;
pub mod valuation_service;
pub mod valuation_validator;

pub use valuation_aggregator::assemble_result;
pub use valuation_calculator::{annual_gross_rent, capitalize, present_value_factor};
pub use valuation_errors::{ValidationErrors, ValidationIssue};
pub use valuation_model::{
    CapitalizedValue, PropertyProfile, PropertyType, ValuationInput, ValuationRequest,
    ValuationResult,
};
pub use valuation_service::{appraise, ValuationService, ValuationServiceTrait};
pub use valuation_validator::validate_request;
