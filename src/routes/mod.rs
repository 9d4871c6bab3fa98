pub(crate) mod gold_prices;
pub(crate) mod health;
pub(crate) mod jobs;
