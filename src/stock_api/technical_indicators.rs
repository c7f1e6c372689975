use super::types::{StockData, TechnicalIndicators};

pub struct MacdResult {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

pub struct BollingerResult {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

pub fn calculate_indicators(data: &[StockData]) -> TechnicalIndicators {
    let closes: Vec<f64> = data.iter().map(|d| d.close).collect();

    let sma_20 = calculate_sma(&closes, 20);
    let sma_50 = calculate_sma(&closes, 50);
    let ema_12 = calculate_ema(&closes, 12);
    let ema_26 = calculate_ema(&closes, 26);
    let rsi = calculate_rsi(&closes, 14);
    let macd_result = calculate_macd(&closes, 12, 26, 9);
    let bollinger = calculate_bollinger_bands(&closes, 20, 2.0);

    TechnicalIndicators {
        sma_20,
        sma_50,
        ema_12: ema_12.into_iter().map(Some).collect(),
        ema_26: ema_26.into_iter().map(Some).collect(),
        rsi,
        macd: macd_result.macd.into_iter().map(Some).collect(),
        macd_signal: macd_result.signal.into_iter().map(Some).collect(),
        bollinger_middle: bollinger.middle,
        bollinger_upper: bollinger.upper,
        bollinger_lower: bollinger.lower,
    }
}

pub fn calculate_sma(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(data.len());

    for i in 0..data.len() {
        if period == 0 || i + 1 < period {
            result.push(None);
        } else {
            let window = &data[i + 1 - period..=i];
            let sum: f64 = window.iter().sum();
            result.push(Some(sum / period as f64));
        }
    }

    result
}

// Exponential moving average seeded at the first value, so the column is
// defined from the first bar onward (no warm-up gap).
pub fn calculate_ema(data: &[f64], period: usize) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(data.len());

    let mut ema = data[0];
    result.push(ema);

    for &value in &data[1..] {
        ema = value * multiplier + ema * (1.0 - multiplier);
        result.push(ema);
    }

    result
}

pub fn calculate_rsi(data: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; data.len()];
    }

    let mut gains = Vec::new();
    let mut losses = Vec::new();

    for i in 1..data.len() {
        let change = data[i] - data[i - 1];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut result = Vec::with_capacity(data.len());

    for i in 0..data.len() {
        if i < period {
            result.push(None);
            continue;
        }

        // changes[i - 1] is the move into bar i; average the last `period` moves
        let window_gain: f64 = gains[i - period..i].iter().sum::<f64>() / period as f64;
        let window_loss: f64 = losses[i - period..i].iter().sum::<f64>() / period as f64;

        if window_loss == 0.0 {
            // A fully flat window has no defined RSI; a loss-free one pegs at 100
            if window_gain == 0.0 {
                result.push(None);
            } else {
                result.push(Some(100.0));
            }
        } else {
            let rs = window_gain / window_loss;
            result.push(Some(100.0 - (100.0 / (1.0 + rs))));
        }
    }

    result
}

pub fn calculate_macd(data: &[f64], fast: usize, slow: usize, signal: usize) -> MacdResult {
    let ema_fast = calculate_ema(data, fast);
    let ema_slow = calculate_ema(data, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = calculate_ema(&macd_line, signal);

    MacdResult {
        macd: macd_line,
        signal: signal_line,
    }
}

pub fn calculate_bollinger_bands(data: &[f64], period: usize, multiplier: f64) -> BollingerResult {
    let middle = calculate_sma(data, period);
    let mut upper = Vec::with_capacity(data.len());
    let mut lower = Vec::with_capacity(data.len());

    for i in 0..data.len() {
        match middle[i] {
            Some(mean) if period > 1 => {
                let window = &data[i + 1 - period..=i];
                // sample standard deviation, matching rolling().std()
                let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
                    / (period - 1) as f64;
                let std_dev = variance.sqrt();
                upper.push(Some(mean + multiplier * std_dev));
                lower.push(Some(mean - multiplier * std_dev));
            }
            _ => {
                upper.push(None);
                lower.push(None);
            }
        }
    }

    BollingerResult {
        middle,
        upper,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(closes: &[f64]) -> Vec<StockData> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| StockData {
                date: format!("2024-01-{:02}", i + 1),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000,
            })
            .collect()
    }

    #[test]
    fn sma_is_undefined_until_window_fills() {
        let result = calculate_sma(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_eq!(result[2], Some(2.0));
        assert_eq!(result[3], Some(3.0));
    }

    #[test]
    fn ema_is_seeded_from_first_value() {
        let result = calculate_ema(&[10.0, 10.0, 10.0], 5);
        assert_eq!(result, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn rsi_warmup_then_pegged_on_pure_gains() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let rsi = calculate_rsi(&closes, 14);
        for value in &rsi[..14] {
            assert_eq!(*value, None);
        }
        for value in &rsi[14..] {
            assert_eq!(*value, Some(100.0));
        }
    }

    #[test]
    fn rsi_is_undefined_on_flat_series() {
        let closes = vec![50.0; 20];
        let rsi = calculate_rsi(&closes, 14);
        assert!(rsi.iter().all(|v| v.is_none()));
    }

    #[test]
    fn bollinger_bands_are_symmetric_around_middle() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + (i % 5) as f64).collect();
        let bb = calculate_bollinger_bands(&closes, 20, 2.0);
        for i in 19..closes.len() {
            let middle = bb.middle[i].unwrap();
            let upper = bb.upper[i].unwrap();
            let lower = bb.lower[i].unwrap();
            assert!(upper >= middle && middle >= lower);
            assert!((upper - middle - (middle - lower)).abs() < 1e-9);
        }
        assert_eq!(bb.upper[18], None);
    }

    #[test]
    fn columns_stay_aligned_on_short_series() {
        let data = bars(&[10.0, 11.0, 12.0, 11.5, 12.5]);
        let ind = calculate_indicators(&data);
        assert_eq!(ind.sma_20.len(), data.len());
        assert_eq!(ind.sma_50.len(), data.len());
        assert_eq!(ind.rsi.len(), data.len());
        assert_eq!(ind.macd.len(), data.len());
        assert_eq!(ind.bollinger_upper.len(), data.len());
        assert!(ind.sma_50.iter().all(|v| v.is_none()));
        assert!(ind.ema_12.iter().all(|v| v.is_some()));
    }
}
