pub mod gold_prices;
pub mod kv;
pub mod memory_store;
pub mod redis_store;

pub use gold_prices::GoldPriceStore;
pub use kv::{CacheError, KeyValueStore};
