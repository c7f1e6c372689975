use crate::stock_api::http_client::{http_client, is_connection_error, reset_http_client};
use crate::stock_api::types::StockData;
use crate::stock_api::utils::normalize_period;

// Daily OHLCV history from the Yahoo Finance v8 chart endpoint.
pub async fn fetch_price_history(symbol: &str, period: &str) -> Result<Vec<StockData>, String> {
    let range = normalize_period(period);
    let url = format!(
        "https://query1.finance.yahoo.com/v8/finance/chart/{}?range={}&interval=1d",
        urlencoding::encode(symbol),
        range
    );

    let json = fetch_json_with_retry(&url, symbol).await?;
    let bars = parse_chart_json(&json)?;

    if bars.is_empty() {
        return Err(format!("No price data returned for {}", symbol));
    }

    Ok(bars)
}

pub(crate) async fn fetch_json_with_retry(
    url: &str,
    symbol: &str,
) -> Result<serde_json::Value, String> {
    let mut client = http_client().await?;
    let mut last_error = String::new();

    eprintln!("Fetching {} from {}", symbol, url);

    for attempt in 0..3 {
        let response_result = client
            .get(url)
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await;

        match response_result {
            Ok(response) => {
                if !response.status().is_success() {
                    last_error = format!("API error: {}", response.status());
                    eprintln!("{}", last_error);
                } else {
                    match response.json::<serde_json::Value>().await {
                        Ok(json) => return Ok(json),
                        Err(e) => {
                            last_error = format!("Parse error: {}", e);
                            eprintln!("{}", last_error);
                        }
                    }
                }
            }
            Err(e) => {
                last_error = format!("Network error: {}", e);
                eprintln!("{}", last_error);
                if is_connection_error(&last_error) && attempt < 2 {
                    reset_http_client().await;
                    client = http_client().await?;
                }
            }
        }

        if attempt < 2 {
            tokio::time::sleep(std::time::Duration::from_millis(500 * (attempt + 1) as u64))
                .await;
        }
    }

    Err(last_error)
}

// Bars with a null close (halted sessions) are skipped; a null volume is
// kept as zero.
pub fn parse_chart_json(json: &serde_json::Value) -> Result<Vec<StockData>, String> {
    let chart = &json["chart"];
    if !chart["error"].is_null() {
        let description = chart["error"]["description"]
            .as_str()
            .unwrap_or("unknown chart error");
        return Err(format!("API error: {}", description));
    }

    let result = &chart["result"][0];
    if result.is_null() {
        return Err("No data returned".to_string());
    }

    let timestamps = result["timestamp"].as_array().ok_or("No timestamps")?;
    let quote = &result["indicators"]["quote"][0];
    let opens = quote["open"].as_array().ok_or("No open column")?;
    let highs = quote["high"].as_array().ok_or("No high column")?;
    let lows = quote["low"].as_array().ok_or("No low column")?;
    let closes = quote["close"].as_array().ok_or("No close column")?;
    let volumes = quote["volume"].as_array().ok_or("No volume column")?;

    let mut bars = Vec::with_capacity(timestamps.len());

    for (i, ts) in timestamps.iter().enumerate() {
        let close = match closes.get(i).and_then(|v| v.as_f64()) {
            Some(c) => c,
            None => continue,
        };
        let seconds = match ts.as_i64() {
            Some(s) => s,
            None => continue,
        };
        let date = match chrono::DateTime::from_timestamp(seconds, 0) {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => continue,
        };

        bars.push(StockData {
            date,
            open: opens.get(i).and_then(|v| v.as_f64()).unwrap_or(close),
            high: highs.get(i).and_then(|v| v.as_f64()).unwrap_or(close),
            low: lows.get(i).and_then(|v| v.as_f64()).unwrap_or(close),
            close,
            volume: volumes.get(i).and_then(|v| v.as_i64()).unwrap_or(0),
        });
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_payload_parses_into_bars() {
        let payload = json!({
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000],
                    "indicators": {
                        "quote": [{
                            "open": [184.3, 185.0],
                            "high": [186.0, 186.4],
                            "low": [183.9, 184.2],
                            "close": [185.6, 184.8],
                            "volume": [52_000_000i64, 48_000_000i64]
                        }]
                    }
                }],
                "error": null
            }
        });

        let bars = parse_chart_json(&payload).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, "2024-01-02");
        assert_eq!(bars[0].close, 185.6);
        assert_eq!(bars[1].volume, 48_000_000);
    }

    #[test]
    fn null_closes_are_skipped_and_null_volume_is_zero() {
        let payload = json!({
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000, 1704326400],
                    "indicators": {
                        "quote": [{
                            "open": [10.0, null, 12.0],
                            "high": [11.0, null, 13.0],
                            "low": [9.0, null, 11.0],
                            "close": [10.5, null, 12.5],
                            "volume": [1000i64, null, null]
                        }]
                    }
                }],
                "error": null
            }
        });

        let bars = parse_chart_json(&payload).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].close, 12.5);
        assert_eq!(bars[1].volume, 0);
    }

    #[test]
    fn provider_error_is_propagated() {
        let payload = json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        });

        let err = parse_chart_json(&payload).unwrap_err();
        assert!(err.contains("delisted"));
    }
}
