mod decimal;
mod factory;
mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteRoundStore;
