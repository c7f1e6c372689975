use serde::{Deserialize, Serialize};

use super::tactical::ActionDirective;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StockData {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InstrumentInfo {
    pub symbol: String,
    pub name: String,
    pub price: Option<f64>,
    pub market_cap: Option<i64>,
    pub trailing_pe: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub quote_type: Option<String>,
}

// Columns are aligned to the input bars by index. A value stays None until
// its lookback window has filled; EMA-based columns seed from the first bar.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TechnicalIndicators {
    pub sma_20: Vec<Option<f64>>,
    pub sma_50: Vec<Option<f64>>,
    pub ema_12: Vec<Option<f64>>,
    pub ema_26: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub bollinger_middle: Vec<Option<f64>>,
    pub bollinger_upper: Vec<Option<f64>>,
    pub bollinger_lower: Vec<Option<f64>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OptionContract {
    pub contract_symbol: String,
    pub strike: f64,
    pub last_price: f64,
    pub volume: i64,
    pub implied_volatility: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OptionsSummary {
    pub expiration_date: String,
    pub put_call_ratio: f64,
    pub total_call_volume: i64,
    pub total_put_volume: i64,
    pub top_calls: Vec<OptionContract>,
    pub top_puts: Vec<OptionContract>,
}

// The core's output bundle: regime label, band levels, sentiment text and
// ranked directives. Built fresh on every classification call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TacticalPanel {
    pub support: f64,
    pub resistance: f64,
    pub price_percentile: f64,
    pub state_title: String,
    pub state_desc: String,
    pub emotion: String,
    pub actions: Vec<ActionDirective>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PredictionPoint {
    pub date: String,
    pub predicted_close: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrendForecast {
    pub slope: f64,
    pub points: Vec<PredictionPoint>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StrategyReport {
    pub name: String,
    pub total_return_pct: f64,
    pub final_value: f64,
    pub trades: usize,
}
