pub mod calculations;
pub mod models;
pub mod share;
pub mod store;

pub use models::*;
pub use share::{ShareParams, ShareParamsError};
pub use store::repository::{ROUND_HISTORY_CAP, RoundStore, StoreError};
