use chrono::Datelike;

use super::types::{PredictionPoint, StockData, TrendForecast};
use super::utils::{add_days, linear_regression, parse_date};

pub const DEFAULT_FORECAST_DAYS: usize = 30;
const MIN_HISTORY_BARS: usize = 50;

// Least-squares trend of close over calendar-day ordinals, projected over
// the next `future_days` calendar dates. None when history is too short for
// the fit to mean anything.
pub fn predict_trend(data: &[StockData], future_days: usize) -> Option<TrendForecast> {
    if data.len() < MIN_HISTORY_BARS {
        return None;
    }

    let mut ordinals = Vec::with_capacity(data.len());
    let mut closes = Vec::with_capacity(data.len());
    for d in data {
        let date = parse_date(&d.date).ok()?;
        ordinals.push(date.num_days_from_ce() as f64);
        closes.push(d.close);
    }

    let (slope, intercept) = linear_regression(&ordinals, &closes);

    let last_date = parse_date(&data[data.len() - 1].date).ok()?;
    let last_ordinal = last_date.num_days_from_ce() as f64;

    let points = (1..=future_days)
        .map(|offset| PredictionPoint {
            date: add_days(&last_date, offset as i64),
            predicted_close: slope * (last_ordinal + offset as f64) + intercept,
        })
        .collect();

    Some(TrendForecast { slope, points })
}
