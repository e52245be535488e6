use super::valuation_errors::{ValidationErrors, ValidationIssue};
use super::valuation_model::{PropertyProfile, PropertyType, ValuationInput, ValuationRequest};
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Checks every request constraint and builds the validated input.
///
/// All violations are collected before returning, so a caller can surface
/// the complete list instead of fixing one field per round trip.
pub fn validate_request(request: &ValuationRequest) -> Result<ValuationInput, ValidationErrors> {
    let mut issues = Vec::new();

    require_positive(&mut issues, "monthlyNetRent", request.monthly_net_rent);
    require_positive(&mut issues, "livingArea", request.living_area);
    require_positive(&mut issues, "plotArea", request.plot_area);
    require_positive(
        &mut issues,
        "actualPurchasePrice",
        request.actual_purchase_price,
    );
    // A plot may carry no separate land value, e.g. leasehold, so zero is
    // legal here while negative is not.
    require_non_negative(&mut issues, "landValuePerSqm", request.land_value_per_sqm);

    if request.property_yield <= Decimal::ZERO {
        issues.push(ValidationIssue::InvalidRate {
            field: "propertyYield",
            value: request.property_yield,
        });
    } else if request.property_yield > dec!(0.5) {
        warn!(
            "propertyYield {} exceeds 50%; the field is a fraction, e.g. 0.05 for 5%",
            request.property_yield
        );
    }

    let profile = match resolve_profile(request) {
        Ok(profile) => Some(profile),
        Err(issue) => {
            issues.push(issue);
            None
        }
    };

    match profile {
        Some(profile) if issues.is_empty() => Ok(ValuationInput {
            profile,
            purchase_date: request.purchase_date,
            monthly_net_rent: request.monthly_net_rent,
            living_area: request.living_area,
            parking_units: request.parking_units,
            land_value_per_sqm: request.land_value_per_sqm,
            plot_area: request.plot_area,
            remaining_useful_life: request.remaining_useful_life,
            property_yield: request.property_yield,
            actual_purchase_price: request.actual_purchase_price,
        }),
        _ => Err(ValidationErrors::new(issues)),
    }
}

impl TryFrom<&ValuationRequest> for ValuationInput {
    type Error = ValidationErrors;

    fn try_from(request: &ValuationRequest) -> Result<Self, Self::Error> {
        validate_request(request)
    }
}

/// The unit count must match the property type: residential property needs
/// one, commercial property must not carry one. A commercial request with
/// an explicit count of zero is treated as "absent".
fn resolve_profile(request: &ValuationRequest) -> Result<PropertyProfile, ValidationIssue> {
    match request.property_type {
        PropertyType::Residential => match request.residential_units {
            Some(residential_units) => Ok(PropertyProfile::Residential { residential_units }),
            None => Err(ValidationIssue::MissingField {
                field: "residentialUnits",
            }),
        },
        PropertyType::Commercial => match request.residential_units {
            Some(units) if units > 0 => Err(ValidationIssue::FieldNotApplicable {
                field: "residentialUnits",
                property_type: PropertyType::Commercial,
            }),
            _ => Ok(PropertyProfile::Commercial),
        },
    }
}

fn require_positive(issues: &mut Vec<ValidationIssue>, field: &'static str, value: Decimal) {
    if value <= Decimal::ZERO {
        issues.push(ValidationIssue::OutOfRange {
            field,
            value,
            constraint: "(must be greater than zero)",
        });
    }
}

fn require_non_negative(issues: &mut Vec<ValidationIssue>, field: &'static str, value: Decimal) {
    if value < Decimal::ZERO {
        issues.push(ValidationIssue::OutOfRange {
            field,
            value,
            constraint: "(must not be negative)",
        });
    }
}
