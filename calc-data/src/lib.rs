mod builtin;
mod loader;

pub use builtin::{builtin_tables, default_niit};
pub use loader::{BracketRecord, RateTableLoader, RateTableLoaderError, StateRateRecord};
