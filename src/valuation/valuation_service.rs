use super::valuation_aggregator::assemble_result;
use super::valuation_calculator::{annual_gross_rent, capitalize};
use super::valuation_model::{ValuationRequest, ValuationResult};
use super::valuation_validator::validate_request;
use crate::cost_schedule::{resolve_costs, ManagementCostSchedule};
use crate::errors::{Error, Result};
use crate::price_index::PriceIndexTable;
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};

/// Appraises one request against explicit reference data.
///
/// This is the pure core of the engine: validation, index lookup, cost
/// resolution, capitalization and aggregation in order, with no shared
/// state involved.
pub fn appraise(
    request: &ValuationRequest,
    price_index: &PriceIndexTable,
    cost_schedule: &ManagementCostSchedule,
) -> Result<ValuationResult> {
    let input = validate_request(request)?;
    let resolved = price_index.resolve(input.purchase_date)?;
    let gross_rent = annual_gross_rent(input.monthly_net_rent);
    let costs = resolve_costs(
        cost_schedule,
        &input.profile,
        input.living_area,
        input.parking_units,
        gross_rent,
        resolved.adjustment_factor,
    )?;
    let capitalized = capitalize(&input, costs);
    Ok(assemble_result(
        capitalized,
        resolved,
        input.actual_purchase_price,
    ))
}

/// Engine interface for appraisals and reference data management.
pub trait ValuationServiceTrait: Send + Sync {
    /// Validates and appraises one request against the current snapshots.
    fn appraise(&self, request: &ValuationRequest) -> Result<ValuationResult>;

    /// Current price index snapshot.
    fn price_index(&self) -> Result<Arc<PriceIndexTable>>;

    /// Current cost schedule snapshot.
    fn cost_schedule(&self) -> Result<Arc<ManagementCostSchedule>>;

    /// Replaces the price index table. Appraisals already running keep the
    /// snapshot they started with.
    fn refresh_price_index(&self, table: PriceIndexTable) -> Result<()>;

    /// Replaces the cost schedule. Appraisals already running keep the
    /// snapshot they started with.
    fn refresh_cost_schedule(&self, schedule: ManagementCostSchedule) -> Result<()>;
}

/// Engine facade holding the current reference data.
///
/// Both tables are immutable snapshots behind an `RwLock<Arc<_>>`. A
/// refresh builds a complete new table and swaps the pointer, so a reader
/// never observes a half-updated series and an appraisal uses one
/// consistent pair of snapshots from start to finish.
pub struct ValuationService {
    price_index: RwLock<Arc<PriceIndexTable>>,
    cost_schedule: RwLock<Arc<ManagementCostSchedule>>,
}

impl ValuationService {
    pub fn new(price_index: PriceIndexTable, cost_schedule: ManagementCostSchedule) -> Self {
        ValuationService {
            price_index: RwLock::new(Arc::new(price_index)),
            cost_schedule: RwLock::new(Arc::new(cost_schedule)),
        }
    }

    /// Service backed by the built-in cost schedule.
    pub fn with_builtin_schedule(price_index: PriceIndexTable) -> Self {
        Self::new(price_index, ManagementCostSchedule::builtin())
    }
}

impl ValuationServiceTrait for ValuationService {
    fn appraise(&self, request: &ValuationRequest) -> Result<ValuationResult> {
        let price_index = self.price_index()?;
        let cost_schedule = self.cost_schedule()?;
        appraise(request, &price_index, &cost_schedule)
    }

    fn price_index(&self) -> Result<Arc<PriceIndexTable>> {
        let guard = self.price_index.read().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn cost_schedule(&self) -> Result<Arc<ManagementCostSchedule>> {
        let guard = self.cost_schedule.read().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn refresh_price_index(&self, table: PriceIndexTable) -> Result<()> {
        let mut guard = self.price_index.write().map_err(poisoned)?;
        *guard = Arc::new(table);
        debug!("Price index refreshed: {} record(s)", guard.len());
        Ok(())
    }

    fn refresh_cost_schedule(&self, schedule: ManagementCostSchedule) -> Result<()> {
        let mut guard = self.cost_schedule.write().map_err(poisoned)?;
        *guard = Arc::new(schedule);
        debug!("Cost schedule refreshed: {} entries", guard.entries().len());
        Ok(())
    }
}

fn poisoned<T>(err: PoisonError<T>) -> Error {
    Error::Unexpected(format!("reference data lock poisoned: {}", err))
}
