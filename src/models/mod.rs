mod chart;
mod gold_price;
mod instrument;

pub use chart::{ChartData, ExtractedSeries};
pub use gold_price::{DailyQuote, GoldPriceRecord};
pub use instrument::{Instrument, UnknownInstrument};
