// Domain types and value objects
pub mod candle;
pub mod pair;
pub mod selection;
pub mod series;
pub mod theme;
pub mod timeframe;

// Re-export commonly used types
pub use candle::{Candle, CandleType};
pub use pair::SupportedPair;
pub use selection::Selection;
pub use series::Series;
pub use theme::Theme;
pub use timeframe::Timeframe;
