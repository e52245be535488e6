use super::valuation_model::{CapitalizedValue, ValuationInput};
use crate::cost_schedule::CostBreakdown;
use log::{debug, warn};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

/// Months per year for annualizing the net cold rent
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Jahresrohertrag: monthly net cold rent × 12.
pub fn annual_gross_rent(monthly_net_rent: Decimal) -> Decimal {
    monthly_net_rent * MONTHS_PER_YEAR
}

/// Barwertfaktor over the remaining useful life n at yield i:
/// (1 − (1 + i)⁻ⁿ) / i.
///
/// A life of zero years gives a factor of zero, so a written-off building
/// contributes nothing to the total. A non-positive yield degenerates to
/// the factor's limit n; the validator rejects such yields upstream.
pub fn present_value_factor(property_yield: Decimal, remaining_useful_life: u32) -> Decimal {
    if remaining_useful_life == 0 {
        return Decimal::ZERO;
    }
    if property_yield <= Decimal::ZERO {
        return Decimal::from_u32(remaining_useful_life).unwrap_or_default();
    }
    // checked_powi overflows only when (1 + i)ⁿ leaves Decimal range, in
    // which case (1 + i)⁻ⁿ is zero for every representable purpose.
    let discounted = (Decimal::ONE + property_yield)
        .checked_powi(-(remaining_useful_life as i64))
        .unwrap_or(Decimal::ZERO);
    (Decimal::ONE - discounted) / property_yield
}

/// Runs the capitalization chain on validated input and resolved costs.
///
/// Every figure stays unrounded here; presentation rounding is the
/// aggregator's job. Negative building income is legal and propagates into
/// a building value below zero, which a high land value can still offset.
pub fn capitalize(input: &ValuationInput, management_costs: CostBreakdown) -> CapitalizedValue {
    let gross_rent = annual_gross_rent(input.monthly_net_rent);
    let net_income = gross_rent - management_costs.total;

    let land_value = input.land_value_per_sqm * input.plot_area;
    let land_interest = land_value * input.property_yield;

    let building_income = net_income - land_interest;
    if building_income < Decimal::ZERO {
        warn!(
            "Interest on land ({}) exceeds annual net income ({}); capitalizing negative building income",
            land_interest, net_income
        );
    }

    let factor = present_value_factor(input.property_yield, input.remaining_useful_life);
    let building_value = building_income * factor;
    let total_value = land_value + building_value;

    debug!(
        "Capitalized values: gross rent {}, net income {}, land value {}, land interest {}, building income {}, factor {}, building value {}, total {}",
        gross_rent, net_income, land_value, land_interest, building_income, factor, building_value, total_value
    );

    CapitalizedValue {
        annual_gross_rent: gross_rent,
        management_costs,
        annual_net_income: net_income,
        land_value,
        land_interest,
        building_income,
        present_value_factor: factor,
        building_value,
        total_value,
    }
}
