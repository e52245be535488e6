pub mod schedule_errors;
pub mod schedule_loader;
pub mod schedule_model;
pub mod schedule_resolver;

pub use schedule_errors::ScheduleError;
pub use schedule_loader::{load_cost_schedule, parse_cost_schedule};
pub use schedule_model::{
    CostBasis, CostBreakdown, CostComponent, CostItem, ManagementCostSchedule, ScheduleEntry,
    UnitBracket,
};
pub use schedule_resolver::resolve_costs;
