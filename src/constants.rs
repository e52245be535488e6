/// Decimal precision for internal calculations (index factors, ratios).
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for percentage shares reported in valuation results.
pub const PERCENT_PRECISION: u32 = 2;

/// Decimal precision for the reported present-value factor (Barwertfaktor).
pub const FACTOR_PRECISION: u32 = 4;

/// Decimal precision for monetary amounts in valuation results (whole euros,
/// the convention of German appraisal reports).
pub const EURO_PRECISION: u32 = 0;
