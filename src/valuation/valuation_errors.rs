use crate::valuation::valuation_model::PropertyType;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// A single violated input constraint.
///
/// `field` carries the wire name of the offending request field (camelCase,
/// as callers submitted it).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    #[error("field '{field}' is out of range: {value} {constraint}")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        constraint: &'static str,
    },

    #[error("field '{field}' must be a rate greater than zero, got {value}")]
    InvalidRate { field: &'static str, value: Decimal },

    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("field '{field}' is not applicable to {property_type} property")]
    FieldNotApplicable {
        field: &'static str,
        property_type: PropertyType,
    },
}

impl ValidationIssue {
    /// The request field the issue refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationIssue::OutOfRange { field, .. }
            | ValidationIssue::InvalidRate { field, .. }
            | ValidationIssue::MissingField { field }
            | ValidationIssue::FieldNotApplicable { field, .. } => field,
        }
    }
}

/// Every constraint violation found in one request.
///
/// Validation does not stop at the first problem; callers get the complete
/// list in a single pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        ValidationErrors { issues }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether any issue concerns the given request field.
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rendered: Vec<String> = self.issues.iter().map(|issue| issue.to_string()).collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_joins_all_issues() {
        let errors = ValidationErrors::new(vec![
            ValidationIssue::MissingField {
                field: "residentialUnits",
            },
            ValidationIssue::InvalidRate {
                field: "propertyYield",
                value: dec!(0),
            },
        ]);
        let message = errors.to_string();
        assert!(message.contains("residentialUnits"));
        assert!(message.contains("propertyYield"));
        assert!(message.contains("; "));
    }

    #[test]
    fn test_mentions_matches_field_names() {
        let errors = ValidationErrors::new(vec![ValidationIssue::OutOfRange {
            field: "plotArea",
            value: dec!(-5),
            constraint: "(must be greater than zero)",
        }]);
        assert!(errors.mentions("plotArea"));
        assert!(!errors.mentions("livingArea"));
        assert_eq!(errors.len(), 1);
    }
}
