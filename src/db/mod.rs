pub mod audit;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod store;

pub use store::SqliteStore;
