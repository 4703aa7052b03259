pub mod factory;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use repository::{ROUND_HISTORY_CAP, RoundStore, StoreError};
