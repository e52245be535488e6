use crate::cost_schedule::CostBreakdown;
use crate::price_index::ResolvedIndex;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of property being appraised; selects the cost schedule and decides
/// which request fields are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Residential,
    Commercial,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PropertyType::Residential => write!(f, "residential"),
            PropertyType::Commercial => write!(f, "commercial"),
        }
    }
}

/// Validated property profile.
///
/// A unit count only exists for residential property, so states like
/// "commercial with residential units" cannot be represented once
/// validation has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "propertyType", rename_all = "camelCase")]
pub enum PropertyProfile {
    #[serde(rename_all = "camelCase")]
    Residential { residential_units: u32 },
    Commercial,
}

impl PropertyProfile {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyProfile::Residential { .. } => PropertyType::Residential,
            PropertyProfile::Commercial => PropertyType::Commercial,
        }
    }

    /// Unit count for schedule bracket matching; commercial property counts
    /// as zero.
    pub fn residential_units(&self) -> u32 {
        match *self {
            PropertyProfile::Residential { residential_units } => residential_units,
            PropertyProfile::Commercial => 0,
        }
    }
}

/// Raw appraisal request as a caller submits it, before validation.
///
/// This mirrors the public API shape: a flat object where
/// `residential_units` is only meaningful for residential property. The
/// validator turns it into a [`ValuationInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    pub property_type: PropertyType,
    /// Required for residential property; rejected for commercial when > 0
    #[serde(default)]
    pub residential_units: Option<u32>,
    pub purchase_date: NaiveDate,
    /// Monthly net cold rent (Nettokaltmiete) in euros
    pub monthly_net_rent: Decimal,
    /// Living area for residential, usable area for commercial, in m²
    pub living_area: Decimal,
    /// Garages and parking spaces
    #[serde(default)]
    pub parking_units: u32,
    /// Land value per square metre (Bodenrichtwert) in €/m²
    pub land_value_per_sqm: Decimal,
    /// Plot area in m²
    pub plot_area: Decimal,
    /// Remaining useful life of the building in years (Restnutzungsdauer)
    pub remaining_useful_life: u32,
    /// Property yield (Liegenschaftszinssatz) as a fraction, e.g. 0.05
    pub property_yield: Decimal,
    /// Agreed purchase price in euros, split by value shares in the result
    pub actual_purchase_price: Decimal,
}

/// Validated appraisal input.
///
/// Constructed only by the validator, so downstream steps can rely on every
/// constraint having been checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    #[serde(flatten)]
    pub profile: PropertyProfile,
    pub purchase_date: NaiveDate,
    pub monthly_net_rent: Decimal,
    pub living_area: Decimal,
    pub parking_units: u32,
    pub land_value_per_sqm: Decimal,
    pub plot_area: Decimal,
    pub remaining_useful_life: u32,
    pub property_yield: Decimal,
    pub actual_purchase_price: Decimal,
}

/// Unrounded outcome of the capitalization chain.
///
/// Values carry full precision; rounding for presentation happens in the
/// aggregator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalizedValue {
    /// Jahresrohertrag: monthly net cold rent × 12
    pub annual_gross_rent: Decimal,
    pub management_costs: CostBreakdown,
    /// Gross rent less the management cost total
    pub annual_net_income: Decimal,
    /// Bodenwert: land value per m² × plot area
    pub land_value: Decimal,
    /// Bodenwertverzinsung: land value × property yield
    pub land_interest: Decimal,
    /// Income attributable to the building after interest on land;
    /// negative for land-value-dominant properties
    pub building_income: Decimal,
    /// Barwertfaktor over the remaining useful life
    pub present_value_factor: Decimal,
    pub building_value: Decimal,
    /// Ertragswert: land value plus building value
    pub total_value: Decimal,
}

/// Final appraisal figures as a report states them: monetary amounts in
/// whole euros, value shares at two decimals, the present-value factor at
/// four.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub annual_gross_rent: Decimal,
    pub management_costs: CostBreakdown,
    pub annual_net_income: Decimal,
    pub land_value: Decimal,
    pub land_interest: Decimal,
    pub building_income: Decimal,
    pub present_value_factor: Decimal,
    pub building_value: Decimal,
    pub total_value: Decimal,
    /// Land share of the total value, in percent
    pub land_share_percent: Decimal,
    /// Building share of the total value, in percent
    pub building_share_percent: Decimal,
    pub actual_purchase_price: Decimal,
    /// Purchase price attributed to the land by value share
    pub purchase_price_land_portion: Decimal,
    /// Purchase price attributed to the building by value share
    pub purchase_price_building_portion: Decimal,
    /// Index observations the valuation was based on
    pub price_index: ResolvedIndex,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_request_deserializes_from_camel_case() {
        let json = r#"
        {
            "propertyType": "residential",
            "residentialUnits": 3,
            "purchaseDate": "2021-05-10",
            "monthlyNetRent": 2000.0,
            "livingArea": 250.0,
            "parkingUnits": 2,
            "landValuePerSqm": 400.0,
            "plotArea": 500.0,
            "remainingUsefulLife": 20,
            "propertyYield": 0.05,
            "actualPurchasePrice": 400000.0
        }
        "#;
        let request: ValuationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.property_type, PropertyType::Residential);
        assert_eq!(request.residential_units, Some(3));
        assert_eq!(request.monthly_net_rent, dec!(2000));
        assert_eq!(request.property_yield, dec!(0.05));
        assert_eq!(
            request.purchase_date,
            NaiveDate::from_ymd_opt(2021, 5, 10).unwrap()
        );
    }

    #[test]
    fn test_request_optional_fields_default() {
        let json = r#"
        {
            "propertyType": "commercial",
            "purchaseDate": "2019-01-02",
            "monthlyNetRent": 5000.0,
            "livingArea": 800.0,
            "landValuePerSqm": 250.0,
            "plotArea": 1200.0,
            "remainingUsefulLife": 30,
            "propertyYield": 0.065,
            "actualPurchasePrice": 900000.0
        }
        "#;
        let request: ValuationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.residential_units, None);
        assert_eq!(request.parking_units, 0);
    }

    #[test]
    fn test_profile_accessors() {
        let residential = PropertyProfile::Residential {
            residential_units: 4,
        };
        assert_eq!(residential.property_type(), PropertyType::Residential);
        assert_eq!(residential.residential_units(), 4);

        let commercial = PropertyProfile::Commercial;
        assert_eq!(commercial.property_type(), PropertyType::Commercial);
        assert_eq!(commercial.residential_units(), 0);
    }

    #[test]
    fn test_profile_serializes_tagged() {
        let profile = PropertyProfile::Residential {
            residential_units: 2,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["propertyType"], "residential");
        assert_eq!(json["residentialUnits"], 2);
    }
}
