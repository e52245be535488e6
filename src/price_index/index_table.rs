use super::index_errors::IndexError;
use super::index_model::{PriceIndexRecord, ResolvedIndex};
use crate::constants::DECIMAL_PRECISION;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A record together with its precomputed calendar bounds.
#[derive(Debug, Clone)]
struct IndexEntry {
    record: PriceIndexRecord,
    start: NaiveDate,
    end: NaiveDate,
}

/// Immutable lookup table over price index observations.
///
/// Construction validates, deduplicates and sorts the records once; lookups
/// are a binary search plus a short backwards scan. A table is never mutated
/// after construction. Refreshing a series means building a new table and
/// swapping it in at the service level.
#[derive(Debug, Clone)]
pub struct PriceIndexTable {
    /// Sorted by period start ascending; on equal start the wider period
    /// sorts first so that reverse scans meet the most specific period first.
    entries: Vec<IndexEntry>,
}

impl PriceIndexTable {
    /// Builds a table from raw records.
    ///
    /// Rejects records with non-positive values or periods that do not map
    /// to calendar dates. When the same period appears more than once the
    /// later record wins, mirroring how statistical offices re-publish
    /// revised figures.
    pub fn new(records: Vec<PriceIndexRecord>) -> Result<Self, IndexError> {
        let mut by_period = HashMap::new();

        for record in records {
            if record.value <= Decimal::ZERO {
                return Err(IndexError::InvalidRecord(format!(
                    "non-positive index value {} for period {}",
                    record.value, record.period
                )));
            }
            let (start, end) = record.period.bounds().ok_or_else(|| {
                IndexError::InvalidRecord(format!(
                    "period {} does not map to calendar dates",
                    record.period
                ))
            })?;
            if by_period
                .insert(record.period, IndexEntry { record, start, end })
                .is_some()
            {
                debug!("Duplicate index period {}; keeping the later record", record.period);
            }
        }

        let mut entries: Vec<IndexEntry> = by_period.into_values().collect();
        entries.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        Ok(PriceIndexTable { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The record whose period covers `date`.
    ///
    /// When several periods cover the date the most specific one wins, i.e.
    /// a quarter beats the year containing it. When no period covers the
    /// date the closest preceding period is used, so dates past the end of
    /// the series resolve to the latest observation. Dates before the first
    /// recorded period are an error.
    pub fn record_at(&self, date: NaiveDate) -> Result<&PriceIndexRecord, IndexError> {
        if self.entries.is_empty() {
            return Err(IndexError::NotAvailable(
                "price index table contains no records".to_string(),
            ));
        }

        let first_after = self.entries.partition_point(|entry| entry.start <= date);
        if first_after == 0 {
            return Err(IndexError::NotAvailable(format!(
                "date {} precedes the earliest recorded period {}",
                date, self.entries[0].record.period
            )));
        }

        let candidates = &self.entries[..first_after];

        // Reverse scan: latest start first, and within an equal start the
        // narrower period first. The first entry still covering the date is
        // therefore the most specific covering period.
        if let Some(entry) = candidates.iter().rev().find(|entry| entry.end >= date) {
            return Ok(&entry.record);
        }

        // Nothing covers the date; fall back to the period that ended last.
        let preceding = candidates
            .iter()
            .max_by(|a, b| a.end.cmp(&b.end).then(a.start.cmp(&b.start)))
            .ok_or_else(|| {
                IndexError::NotAvailable(format!("no recorded period precedes {}", date))
            })?;
        debug!(
            "No index period covers {}; using closest preceding period {}",
            date, preceding.record.period
        );
        Ok(&preceding.record)
    }

    /// The most recent observation, by period end and then specificity.
    pub fn latest(&self) -> Option<&PriceIndexRecord> {
        self.entries
            .iter()
            .max_by(|a, b| a.end.cmp(&b.end).then(a.start.cmp(&b.start)))
            .map(|entry| &entry.record)
    }

    /// Resolves a purchase date to its index observation plus the factor
    /// that carries purchase-period cost rates to the current index level.
    pub fn resolve(&self, purchase_date: NaiveDate) -> Result<ResolvedIndex, IndexError> {
        let at_purchase = *self.record_at(purchase_date)?;
        let current = *self.latest().ok_or_else(|| {
            IndexError::NotAvailable("price index table contains no records".to_string())
        })?;

        // at_purchase.value > 0 is guaranteed at construction
        let adjustment_factor = (current.value / at_purchase.value).round_dp(DECIMAL_PRECISION);
        debug!(
            "Resolved index for {}: {}={} at purchase, {}={} current, adjustment factor {}",
            purchase_date,
            at_purchase.period,
            at_purchase.value,
            current.period,
            current.value,
            adjustment_factor
        );

        Ok(ResolvedIndex {
            at_purchase,
            current,
            adjustment_factor,
        })
    }
}
