use super::index_errors::IndexError;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    /// Accepted textual forms: "2023" (full year) or "2023-Q2" (calendar quarter)
    static ref PERIOD_REGEX: Regex =
        Regex::new(r"^(\d{4})(?:-Q([1-4]))?$").expect("Invalid regex pattern");
}

/// Publication period of a price index observation.
///
/// Statistical offices publish index series at different granularities; this
/// engine supports annual averages and calendar quarters. A quarter is the
/// more specific period and wins over the year that contains it during
/// lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IndexPeriod {
    /// Annual average, e.g. "2023"
    Year(i32),
    /// Calendar quarter, e.g. "2023-Q2" (quarter is 1..=4)
    Quarter(i32, u8),
}

impl IndexPeriod {
    /// First and last calendar day covered by this period.
    ///
    /// Returns `None` when the period cannot be mapped to calendar dates
    /// (quarter outside 1..=4 or a year chrono cannot represent). Tables
    /// reject such records at construction, so lookups never see them.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            IndexPeriod::Year(year) => {
                let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
                Some((start, end))
            }
            IndexPeriod::Quarter(year, quarter) => {
                if !(1..=4).contains(&quarter) {
                    return None;
                }
                let start_month = (quarter as u32 - 1) * 3 + 1;
                let start = NaiveDate::from_ymd_opt(year, start_month, 1)?;
                let end = if quarter == 4 {
                    NaiveDate::from_ymd_opt(year, 12, 31)?
                } else {
                    NaiveDate::from_ymd_opt(year, start_month + 3, 1)?.pred_opt()?
                };
                Some((start, end))
            }
        }
    }

    /// Whether `date` falls within this period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.bounds()
            .map_or(false, |(start, end)| start <= date && date <= end)
    }
}

impl fmt::Display for IndexPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IndexPeriod::Year(year) => write!(f, "{:04}", year),
            IndexPeriod::Quarter(year, quarter) => write!(f, "{:04}-Q{}", year, quarter),
        }
    }
}

impl FromStr for IndexPeriod {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = PERIOD_REGEX.captures(s.trim()).ok_or_else(|| {
            IndexError::InvalidRecord(format!(
                "invalid index period '{}', expected 'YYYY' or 'YYYY-Q1'..'YYYY-Q4'",
                s
            ))
        })?;

        let year: i32 = captures
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| IndexError::InvalidRecord(format!("invalid year in period '{}'", s)))?;

        match captures.get(2) {
            Some(quarter) => {
                let quarter: u8 = quarter.as_str().parse().map_err(|_| {
                    IndexError::InvalidRecord(format!("invalid quarter in period '{}'", s))
                })?;
                Ok(IndexPeriod::Quarter(year, quarter))
            }
            None => Ok(IndexPeriod::Year(year)),
        }
    }
}

impl From<IndexPeriod> for String {
    fn from(period: IndexPeriod) -> Self {
        period.to_string()
    }
}

impl TryFrom<String> for IndexPeriod {
    type Error = IndexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One published index observation, e.g. consumer price index 2023-Q4 = 121.6.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceIndexRecord {
    pub period: IndexPeriod,
    /// Published index value, on whatever base the series uses (base period = 100)
    pub value: Decimal,
}

/// Outcome of resolving a purchase date against an index table.
///
/// `adjustment_factor` scales index-linked cost rates from the level of the
/// purchase period to today's level: `current.value / at_purchase.value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIndex {
    pub at_purchase: PriceIndexRecord,
    pub current: PriceIndexRecord,
    pub adjustment_factor: Decimal,
}
