use super::valuation_model::{CapitalizedValue, ValuationResult};
use crate::constants::{FACTOR_PRECISION, PERCENT_PRECISION};
use crate::price_index::ResolvedIndex;
use crate::utils::round_euro;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Assembles the report-ready result from unrounded capitalized values.
///
/// Value shares are computed from the unrounded land and building values
/// and the purchase price split from the unrounded shares; every field is
/// then rounded exactly once for presentation.
pub fn assemble_result(
    capitalized: CapitalizedValue,
    price_index: ResolvedIndex,
    actual_purchase_price: Decimal,
) -> ValuationResult {
    let hundred = dec!(100);

    let (land_share, building_share) = if capitalized.total_value.is_zero() {
        // A worthless plot with a written-off building; there is nothing to
        // apportion.
        warn!("Total value is zero; land and building shares are reported as zero");
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            capitalized.land_value / capitalized.total_value * hundred,
            capitalized.building_value / capitalized.total_value * hundred,
        )
    };

    let land_portion = actual_purchase_price * land_share / hundred;
    let building_portion = actual_purchase_price * building_share / hundred;

    ValuationResult {
        annual_gross_rent: round_euro(capitalized.annual_gross_rent),
        management_costs: capitalized.management_costs,
        annual_net_income: round_euro(capitalized.annual_net_income),
        land_value: round_euro(capitalized.land_value),
        land_interest: round_euro(capitalized.land_interest),
        building_income: round_euro(capitalized.building_income),
        present_value_factor: capitalized.present_value_factor.round_dp(FACTOR_PRECISION),
        building_value: round_euro(capitalized.building_value),
        total_value: round_euro(capitalized.total_value),
        land_share_percent: land_share.round_dp(PERCENT_PRECISION),
        building_share_percent: building_share.round_dp(PERCENT_PRECISION),
        actual_purchase_price,
        purchase_price_land_portion: round_euro(land_portion),
        purchase_price_building_portion: round_euro(building_portion),
        price_index,
    }
}
