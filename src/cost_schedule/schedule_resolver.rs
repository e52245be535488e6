use super::schedule_errors::ScheduleError;
use super::schedule_model::{
    CostBasis, CostBreakdown, CostComponent, CostItem, ManagementCostSchedule,
};
use crate::utils::round_euro;
use crate::valuation::valuation_model::PropertyProfile;
use log::debug;
use rust_decimal::Decimal;

/// Resolves the yearly management costs for one property.
///
/// `annual_gross_rent` feeds share-based components and `index_factor`
/// carries index-linked rates from their base level to the current level.
/// Every component of the matching schedule entry produces a line item,
/// zero amounts included, and the total is the sum of the euro-rounded
/// items.
pub fn resolve_costs(
    schedule: &ManagementCostSchedule,
    profile: &PropertyProfile,
    living_area: Decimal,
    parking_units: u32,
    annual_gross_rent: Decimal,
    index_factor: Decimal,
) -> Result<CostBreakdown, ScheduleError> {
    let property_type = profile.property_type();
    let units = profile.residential_units();

    let entry = schedule
        .entry_for(property_type, units)
        .ok_or(ScheduleError::NoScheduleForProfile {
            property_type,
            units,
        })?;

    let mut items = Vec::with_capacity(entry.components.len());
    let mut total = Decimal::ZERO;
    for component in &entry.components {
        let amount = round_euro(component_amount(
            component,
            living_area,
            units,
            parking_units,
            annual_gross_rent,
            index_factor,
        ));
        total += amount;
        items.push(CostItem {
            name: component.name.clone(),
            amount,
        });
    }

    debug!(
        "Resolved {} cost line(s) for {} property with {} unit(s): total {}",
        items.len(),
        property_type,
        units,
        total
    );

    Ok(CostBreakdown { items, total })
}

fn component_amount(
    component: &CostComponent,
    living_area: Decimal,
    residential_units: u32,
    parking_units: u32,
    annual_gross_rent: Decimal,
    index_factor: Decimal,
) -> Decimal {
    match component.basis {
        CostBasis::FixedAnnual(rate) => effective_rate(component, rate, index_factor),
        CostBasis::PerSquareMeter(rate) => {
            effective_rate(component, rate, index_factor) * living_area
        }
        CostBasis::PerResidentialUnit(rate) => {
            effective_rate(component, rate, index_factor) * Decimal::from(residential_units)
        }
        CostBasis::PerParkingUnit(rate) => {
            effective_rate(component, rate, index_factor) * Decimal::from(parking_units)
        }
        CostBasis::ShareOfGrossRent(share) => {
            annual_gross_rent * effective_rate(component, share, index_factor)
        }
    }
}

/// Index-linked rates are scaled by the index factor and then rounded to the
/// component's configured precision before they are applied. Rates that are
/// not index linked are used exactly as configured.
fn effective_rate(component: &CostComponent, base_rate: Decimal, index_factor: Decimal) -> Decimal {
    if !component.index_linked {
        return base_rate;
    }
    let scaled = base_rate * index_factor;
    match component.rate_precision {
        Some(precision) => scaled.round_dp(precision),
        None => scaled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item_amount(breakdown: &CostBreakdown, name: &str) -> Decimal {
        breakdown
            .items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.amount)
            .unwrap_or_else(|| panic!("no item named '{}'", name))
    }

    #[test]
    fn test_residential_costs_with_indexed_rates() {
        let schedule = ManagementCostSchedule::builtin();
        let profile = PropertyProfile::Residential {
            residential_units: 3,
        };
        // Index level 112.7 over base 84.5
        let factor = dec!(1.333728);

        let breakdown =
            resolve_costs(&schedule, &profile, dec!(250), 2, dec!(24000), factor).unwrap();

        // 270 × 1.333728 = 360.10656 → 360.11/unit; 3 units → 1080.33 → 1080
        assert_eq!(item_amount(&breakdown, "administration"), dec!(1080));
        // 35 × 1.333728 = 46.68048 → 46.68/space; 2 spaces → 93.36 → 93
        assert_eq!(item_amount(&breakdown, "parking_administration"), dec!(93));
        // 9.00 × 1.333728 = 12.003552 → 12.0/m²; 250 m² → 3000
        assert_eq!(item_amount(&breakdown, "maintenance"), dec!(3000));
        // 2% of 24 000
        assert_eq!(item_amount(&breakdown, "risk_of_rent_loss"), dec!(480));

        assert_eq!(breakdown.total, dec!(4653));
    }

    #[test]
    fn test_commercial_costs_use_shares_for_administration() {
        let schedule = ManagementCostSchedule::builtin();
        let profile = PropertyProfile::Commercial;

        let breakdown =
            resolve_costs(&schedule, &profile, dec!(400), 0, dec!(50000), dec!(1.2)).unwrap();

        // 3% of 50 000, not index linked
        assert_eq!(item_amount(&breakdown, "administration"), dec!(1500));
        // 9.00 × 1.2 = 10.8/m²; 400 m² → 4320
        assert_eq!(item_amount(&breakdown, "maintenance"), dec!(4320));
        // 4% of 50 000
        assert_eq!(item_amount(&breakdown, "risk_of_rent_loss"), dec!(2000));

        assert_eq!(breakdown.total, dec!(7820));
    }

    #[test]
    fn test_zero_amount_lines_are_kept() {
        let schedule = ManagementCostSchedule::builtin();
        let profile = PropertyProfile::Residential {
            residential_units: 0,
        };

        let breakdown =
            resolve_costs(&schedule, &profile, dec!(80), 0, dec!(9600), dec!(1)).unwrap();

        assert_eq!(item_amount(&breakdown, "administration"), dec!(0));
        assert_eq!(item_amount(&breakdown, "parking_administration"), dec!(0));
        assert_eq!(breakdown.items.len(), 4);
    }

    #[test]
    fn test_total_is_sum_of_rounded_items() {
        let schedule = ManagementCostSchedule::builtin();
        let profile = PropertyProfile::Residential {
            residential_units: 1,
        };

        let breakdown =
            resolve_costs(&schedule, &profile, dec!(77.7), 1, dec!(7777), dec!(1.111111)).unwrap();

        let summed: Decimal = breakdown.items.iter().map(|item| item.amount).sum();
        assert_eq!(breakdown.total, summed);
        for item in &breakdown.items {
            assert_eq!(item.amount, round_euro(item.amount));
        }
    }

    #[test]
    fn test_factor_one_leaves_rates_at_base_level() {
        let schedule = ManagementCostSchedule::builtin();
        let profile = PropertyProfile::Residential {
            residential_units: 2,
        };

        let breakdown =
            resolve_costs(&schedule, &profile, dec!(100), 0, dec!(12000), dec!(1)).unwrap();

        assert_eq!(item_amount(&breakdown, "administration"), dec!(540));
        assert_eq!(item_amount(&breakdown, "maintenance"), dec!(900));
        assert_eq!(item_amount(&breakdown, "risk_of_rent_loss"), dec!(240));
    }

    #[test]
    fn test_missing_entry_is_an_error() {
        let schedule = ManagementCostSchedule::new(vec![]).unwrap();
        let profile = PropertyProfile::Commercial;

        let err =
            resolve_costs(&schedule, &profile, dec!(100), 0, dec!(12000), dec!(1)).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::NoScheduleForProfile { units: 0, .. }
        ));
    }
}
