pub mod types;
pub mod utils;
pub mod http_client;
pub mod data;
pub mod technical_indicators;
pub mod tactical;
pub mod backtest;
pub mod prediction;
pub mod report;

pub use types::*;
pub use data::*;
pub use technical_indicators::calculate_indicators;
pub use tactical::{classify_price_position, generate_tactical_panel, ActionDirective, MarketRegime};
pub use backtest::{run_all_backtests, run_backtest, StrategyType};
pub use prediction::{predict_trend, DEFAULT_FORECAST_DAYS};
pub use report::generate_raw_data_report;
