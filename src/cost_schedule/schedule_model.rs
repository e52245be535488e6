use super::schedule_errors::ScheduleError;
use crate::valuation::valuation_model::PropertyType;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How a management cost component is charged.
///
/// The embedded rate is a yearly euro amount except for
/// [`CostBasis::ShareOfGrossRent`], where it is a fraction of the annual
/// gross rent (0.02 = 2%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostBasis {
    /// Flat yearly amount
    FixedAnnual(Decimal),
    /// Yearly rate per square metre of living / usable area
    PerSquareMeter(Decimal),
    /// Yearly rate per residential unit
    PerResidentialUnit(Decimal),
    /// Yearly rate per garage or parking space
    PerParkingUnit(Decimal),
    /// Fraction of the annual gross rent
    ShareOfGrossRent(Decimal),
}

impl CostBasis {
    pub fn rate(&self) -> Decimal {
        match *self {
            CostBasis::FixedAnnual(rate)
            | CostBasis::PerSquareMeter(rate)
            | CostBasis::PerResidentialUnit(rate)
            | CostBasis::PerParkingUnit(rate)
            | CostBasis::ShareOfGrossRent(rate) => rate,
        }
    }
}

/// One cost line in a schedule entry, e.g. maintenance at 9.00 €/m².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComponent {
    pub name: String,
    pub basis: CostBasis,
    /// Whether the rate is carried forward with the price index
    #[serde(default)]
    pub index_linked: bool,
    /// Decimal places the index-scaled rate is rounded to before it is
    /// applied; published rate tables state carried-forward rates rounded.
    /// Ignored unless the component is index linked.
    #[serde(default)]
    pub rate_precision: Option<u32>,
}

/// Inclusive residential-unit range an entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitBracket {
    pub min_units: u32,
    /// `None` means open ended
    #[serde(default)]
    pub max_units: Option<u32>,
}

impl UnitBracket {
    pub fn open_ended(min_units: u32) -> Self {
        UnitBracket {
            min_units,
            max_units: None,
        }
    }

    pub fn bounded(min_units: u32, max_units: u32) -> Self {
        UnitBracket {
            min_units,
            max_units: Some(max_units),
        }
    }

    pub fn contains(&self, units: u32) -> bool {
        units >= self.min_units && self.max_units.map_or(true, |max| units <= max)
    }
}

/// Cost components for one property type and unit bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub property_type: PropertyType,
    pub bracket: UnitBracket,
    pub components: Vec<CostComponent>,
}

/// An ordered set of schedule entries; the first entry matching a property
/// profile wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ManagementCostSchedule {
    entries: Vec<ScheduleEntry>,
}

impl ManagementCostSchedule {
    /// Validates and wraps schedule entries.
    ///
    /// Rejects negative rates, shares outside 0..=1 and inverted unit
    /// brackets. An empty entry list is legal; resolution against it simply
    /// finds no entry.
    pub fn new(entries: Vec<ScheduleEntry>) -> Result<Self, ScheduleError> {
        for entry in &entries {
            if let Some(max) = entry.bracket.max_units {
                if max < entry.bracket.min_units {
                    return Err(ScheduleError::InvalidSchedule(format!(
                        "inverted unit bracket {}..{} in {} entry",
                        entry.bracket.min_units, max, entry.property_type
                    )));
                }
            }
            for component in &entry.components {
                let rate = component.basis.rate();
                if rate < Decimal::ZERO {
                    return Err(ScheduleError::InvalidSchedule(format!(
                        "component '{}' has a negative rate {}",
                        component.name, rate
                    )));
                }
                if let CostBasis::ShareOfGrossRent(share) = component.basis {
                    if share > Decimal::ONE {
                        return Err(ScheduleError::InvalidSchedule(format!(
                            "component '{}' share {} exceeds 1",
                            component.name, share
                        )));
                    }
                }
            }
        }
        Ok(ManagementCostSchedule { entries })
    }

    /// The customary German rates: administration per residential unit and
    /// per parking space, maintenance per square metre, and a rent-loss risk
    /// share. Commercial property carries rate-based administration and a
    /// higher risk share. Currency rates are index linked from their base
    /// level; shares are not.
    pub fn builtin() -> Self {
        let residential = ScheduleEntry {
            property_type: PropertyType::Residential,
            bracket: UnitBracket::open_ended(0),
            components: vec![
                CostComponent {
                    name: "administration".to_string(),
                    basis: CostBasis::PerResidentialUnit(dec!(270)),
                    index_linked: true,
                    rate_precision: Some(2),
                },
                CostComponent {
                    name: "parking_administration".to_string(),
                    basis: CostBasis::PerParkingUnit(dec!(35)),
                    index_linked: true,
                    rate_precision: Some(2),
                },
                CostComponent {
                    name: "maintenance".to_string(),
                    basis: CostBasis::PerSquareMeter(dec!(9.00)),
                    index_linked: true,
                    rate_precision: Some(1),
                },
                CostComponent {
                    name: "risk_of_rent_loss".to_string(),
                    basis: CostBasis::ShareOfGrossRent(dec!(0.02)),
                    index_linked: false,
                    rate_precision: None,
                },
            ],
        };

        let commercial = ScheduleEntry {
            property_type: PropertyType::Commercial,
            bracket: UnitBracket::open_ended(0),
            components: vec![
                CostComponent {
                    name: "administration".to_string(),
                    basis: CostBasis::ShareOfGrossRent(dec!(0.03)),
                    index_linked: false,
                    rate_precision: None,
                },
                CostComponent {
                    name: "maintenance".to_string(),
                    basis: CostBasis::PerSquareMeter(dec!(9.00)),
                    index_linked: true,
                    rate_precision: Some(1),
                },
                CostComponent {
                    name: "risk_of_rent_loss".to_string(),
                    basis: CostBasis::ShareOfGrossRent(dec!(0.04)),
                    index_linked: false,
                    rate_precision: None,
                },
            ],
        };

        ManagementCostSchedule {
            entries: vec![residential, commercial],
        }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// First entry matching the property type whose bracket contains
    /// `units`.
    pub fn entry_for(&self, property_type: PropertyType, units: u32) -> Option<&ScheduleEntry> {
        self.entries
            .iter()
            .find(|entry| entry.property_type == property_type && entry.bracket.contains(units))
    }
}

/// One resolved cost line, euro-rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    pub name: String,
    pub amount: Decimal,
}

/// All resolved cost lines for a property; `total` is the sum of the
/// rounded item amounts, so the breakdown is internally consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub items: Vec<CostItem>,
    pub total: Decimal,
}
