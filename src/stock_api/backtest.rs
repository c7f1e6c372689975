use serde::{Deserialize, Serialize};

use super::technical_indicators::{
    calculate_bollinger_bands, calculate_macd, calculate_rsi, calculate_sma,
};
use super::types::{StockData, StrategyReport};

pub const INITIAL_CAPITAL: f64 = 10_000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum StrategyType {
    SmaCross { fast: usize, slow: usize },
    RsiReversion { period: usize, oversold: f64, overbought: f64 },
    MacdTrend { fast: usize, slow: usize, signal: usize },
    BollingerBreakout { period: usize, multiplier: f64 },
}

impl StrategyType {
    pub fn label(&self) -> &'static str {
        match self {
            StrategyType::SmaCross { .. } => "SMA Golden Cross",
            StrategyType::RsiReversion { .. } => "RSI Mean Reversion",
            StrategyType::MacdTrend { .. } => "MACD Trend",
            StrategyType::BollingerBreakout { .. } => "Bollinger Breakout",
        }
    }

    pub fn defaults() -> Vec<StrategyType> {
        vec![
            StrategyType::SmaCross { fast: 20, slow: 50 },
            StrategyType::RsiReversion {
                period: 14,
                oversold: 30.0,
                overbought: 70.0,
            },
            StrategyType::MacdTrend {
                fast: 12,
                slow: 26,
                signal: 9,
            },
            StrategyType::BollingerBreakout {
                period: 20,
                multiplier: 2.0,
            },
        ]
    }
}

// Exposure-style signals: 1.0 while the strategy wants to be in the market,
// 0.0 while flat. Bars inside an indicator's warm-up keep the prior state
// (or flat, for the cross strategies).
pub fn generate_signals(data: &[StockData], strategy: &StrategyType) -> Vec<f64> {
    let closes: Vec<f64> = data.iter().map(|d| d.close).collect();
    let mut signals = vec![0.0; data.len()];

    match strategy {
        StrategyType::SmaCross { fast, slow } => {
            let ma_fast = calculate_sma(&closes, *fast);
            let ma_slow = calculate_sma(&closes, *slow);
            for i in 0..data.len() {
                if let (Some(f), Some(s)) = (ma_fast[i], ma_slow[i]) {
                    signals[i] = if f > s { 1.0 } else { 0.0 };
                }
            }
        }
        StrategyType::RsiReversion {
            period,
            oversold,
            overbought,
        } => {
            let rsi = calculate_rsi(&closes, *period);
            let mut current = 0.0;
            for i in 0..data.len() {
                if let Some(r) = rsi[i] {
                    if r < *oversold {
                        current = 1.0;
                    } else if r > *overbought {
                        current = 0.0;
                    }
                }
                signals[i] = current;
            }
        }
        StrategyType::MacdTrend { fast, slow, signal } => {
            let macd = calculate_macd(&closes, *fast, *slow, *signal);
            for i in 0..data.len() {
                signals[i] = if macd.macd[i] > macd.signal[i] { 1.0 } else { 0.0 };
            }
        }
        StrategyType::BollingerBreakout { period, multiplier } => {
            let bb = calculate_bollinger_bands(&closes, *period, *multiplier);
            let mut current = 0.0;
            for i in 0..data.len() {
                match (bb.lower[i], bb.upper[i]) {
                    (Some(lower), Some(upper)) => {
                        if closes[i] < lower {
                            current = 1.0;
                        } else if closes[i] > upper {
                            current = 0.0;
                        }
                        signals[i] = current;
                    }
                    _ => signals[i] = 0.0,
                }
            }
        }
    }

    signals
}

// Day-over-day signal change: +1 enter, -1 exit, 0 hold.
pub fn position_changes(signals: &[f64]) -> Vec<i32> {
    let mut positions = vec![0; signals.len()];
    for i in 1..signals.len() {
        positions[i] = (signals[i] - signals[i - 1]) as i32;
    }
    positions
}

pub fn run_backtest(data: &[StockData], strategy: StrategyType) -> Result<StrategyReport, String> {
    if data.is_empty() {
        return Err("Insufficient data for backtest".to_string());
    }

    let signals = generate_signals(data, &strategy);
    let positions = position_changes(&signals);

    let mut balance = INITIAL_CAPITAL;
    let mut shares = 0.0;
    let mut trades = 0;

    for (i, d) in data.iter().enumerate() {
        let price = d.close;
        match positions[i] {
            1 if balance > 0.0 && price > 0.0 => {
                shares = balance / price;
                balance = 0.0;
                trades += 1;
            }
            -1 if shares > 0.0 => {
                balance = shares * price;
                shares = 0.0;
                trades += 1;
            }
            _ => {}
        }
    }

    let last_close = data[data.len() - 1].close;
    let final_value = balance + shares * last_close;
    let total_return_pct = (final_value - INITIAL_CAPITAL) / INITIAL_CAPITAL * 100.0;

    Ok(StrategyReport {
        name: strategy.label().to_string(),
        total_return_pct,
        final_value,
        trades,
    })
}

// One row per default strategy; strategies that cannot run are skipped.
pub fn run_all_backtests(data: &[StockData]) -> Vec<StrategyReport> {
    StrategyType::defaults()
        .into_iter()
        .filter_map(|strategy| run_backtest(data, strategy).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(closes: &[f64]) -> Vec<StockData> {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| StockData {
                date: (start + chrono::Duration::days(i as i64))
                    .format("%Y-%m-%d")
                    .to_string(),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000,
            })
            .collect()
    }

    #[test]
    fn position_changes_are_the_signal_diff() {
        let positions = position_changes(&[0.0, 1.0, 1.0, 0.0, 1.0]);
        assert_eq!(positions, vec![0, 1, 0, -1, 1]);
    }

    #[test]
    fn sma_cross_round_trip_books_the_gain() {
        let data = bars(&[10.0, 10.0, 10.0, 20.0, 30.0, 30.0, 30.0, 5.0, 5.0]);
        let strategy = StrategyType::SmaCross { fast: 2, slow: 3 };

        let signals = generate_signals(&data, &strategy);
        assert_eq!(signals, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);

        // buy at 20, sell at 30: 10000 -> 15000
        let report = run_backtest(&data, strategy).unwrap();
        assert_eq!(report.trades, 2);
        assert!((report.final_value - 15_000.0).abs() < 1e-9);
        assert!((report.total_return_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn rsi_reversion_latches_between_thresholds() {
        // fall hard (RSI 0), then drift: the latch must stay long until an
        // overbought print, not flip off when RSI merely recovers past 30
        let data = bars(&[
            100.0, 90.0, 80.0, 70.0, 60.0, 61.0, 60.0, 61.0, 60.0, 61.0,
        ]);
        let strategy = StrategyType::RsiReversion {
            period: 3,
            oversold: 30.0,
            overbought: 70.0,
        };
        let signals = generate_signals(&data, &strategy);
        assert_eq!(signals[..3], [0.0, 0.0, 0.0]);
        assert_eq!(signals[3], 1.0);
        assert!(signals[4..].iter().all(|&s| s == 1.0));
    }

    #[test]
    fn open_position_is_marked_to_market() {
        let data = bars(&[10.0, 10.0, 10.0, 20.0, 40.0]);
        let strategy = StrategyType::SmaCross { fast: 2, slow: 3 };
        // buy at 20, never exits; final equity = 500 shares * 40
        let report = run_backtest(&data, strategy).unwrap();
        assert_eq!(report.trades, 1);
        assert!((report.final_value - 20_000.0).abs() < 1e-9);
    }

    #[test]
    fn macd_signals_are_binary_and_aligned() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64).sin() * 5.0).collect();
        let data = bars(&closes);
        let signals = generate_signals(
            &data,
            &StrategyType::MacdTrend {
                fast: 12,
                slow: 26,
                signal: 9,
            },
        );
        assert_eq!(signals.len(), data.len());
        assert!(signals.iter().all(|&s| s == 0.0 || s == 1.0));
    }

    #[test]
    fn bollinger_warmup_emits_flat() {
        let data = bars(&[10.0, 11.0, 12.0, 11.0, 10.0]);
        let signals = generate_signals(
            &data,
            &StrategyType::BollingerBreakout {
                period: 20,
                multiplier: 2.0,
            },
        );
        assert!(signals.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn empty_series_is_an_error() {
        let err = run_backtest(&[], StrategyType::SmaCross { fast: 20, slow: 50 });
        assert!(err.is_err());
    }

    #[test]
    fn all_backtests_cover_the_four_strategies() {
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + (i as f64 / 3.0).sin() * 10.0 + i as f64 * 0.2)
            .collect();
        let data = bars(&closes);
        let reports = run_all_backtests(&data);
        assert_eq!(reports.len(), 4);
        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"SMA Golden Cross"));
        assert!(names.contains(&"RSI Mean Reversion"));
        assert!(names.contains(&"MACD Trend"));
        assert!(names.contains(&"Bollinger Breakout"));
    }
}
