pub mod index_errors;
pub mod index_loader;
pub mod index_model;
pub mod index_table;

pub use index_errors::IndexError;
pub use index_loader::{load_price_index, parse_price_index};
pub use index_model::{IndexPeriod, PriceIndexRecord, ResolvedIndex};
pub use index_table::PriceIndexTable;
