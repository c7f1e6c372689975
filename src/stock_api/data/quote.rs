use crate::stock_api::data::history::fetch_json_with_retry;
use crate::stock_api::types::InstrumentInfo;

// Instrument metadata (52-week range, market cap, PE, quote type) from the
// Yahoo Finance v7 quote endpoint. Every analytic field stays optional;
// callers treat a failed fetch as "no metadata", not as a hard error.
pub async fn fetch_instrument_info(symbol: &str) -> Result<InstrumentInfo, String> {
    let url = format!(
        "https://query1.finance.yahoo.com/v7/finance/quote?symbols={}",
        urlencoding::encode(symbol)
    );

    let json = fetch_json_with_retry(&url, symbol).await?;
    parse_quote_json(symbol, &json)
}

pub fn parse_quote_json(symbol: &str, json: &serde_json::Value) -> Result<InstrumentInfo, String> {
    let response = &json["quoteResponse"];
    if !response["error"].is_null() {
        let description = response["error"]["description"]
            .as_str()
            .unwrap_or("unknown quote error");
        return Err(format!("API error: {}", description));
    }

    let result = &response["result"][0];
    if result.is_null() {
        return Err(format!("No quote data returned for {}", symbol));
    }

    let name = result["shortName"]
        .as_str()
        .or_else(|| result["longName"].as_str())
        .unwrap_or(symbol)
        .to_string();

    // market cap shows up as integer, float or string depending on listing
    let market_cap = result["marketCap"]
        .as_i64()
        .or_else(|| {
            result["marketCap"].as_f64().and_then(|v| {
                if v.is_finite() && v >= 0.0 {
                    Some(v as i64)
                } else {
                    None
                }
            })
        })
        .or_else(|| {
            result["marketCap"]
                .as_str()
                .and_then(|s| s.trim().parse::<i64>().ok())
        });

    Ok(InstrumentInfo {
        symbol: symbol.to_string(),
        name,
        price: result["regularMarketPrice"].as_f64(),
        market_cap,
        trailing_pe: result["trailingPE"].as_f64(),
        fifty_two_week_high: result["fiftyTwoWeekHigh"].as_f64(),
        fifty_two_week_low: result["fiftyTwoWeekLow"].as_f64(),
        quote_type: result["quoteType"].as_str().map(|s| s.to_string()),
    })
}
