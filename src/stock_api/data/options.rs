use crate::stock_api::data::history::fetch_json_with_retry;
use crate::stock_api::types::{OptionContract, OptionsSummary};

const TOP_CONTRACTS: usize = 5;

// Nearest-expiration option-chain aggregates from the Yahoo Finance v7
// options endpoint. "No listed options" is an error here so the command
// layer can map it (like any other fetch failure) to a neutral None.
pub async fn fetch_options_summary(symbol: &str) -> Result<OptionsSummary, String> {
    let url = format!(
        "https://query2.finance.yahoo.com/v7/finance/options/{}",
        urlencoding::encode(symbol)
    );

    let json = fetch_json_with_retry(&url, symbol).await?;
    parse_options_json(symbol, &json)
}

pub fn parse_options_json(symbol: &str, json: &serde_json::Value) -> Result<OptionsSummary, String> {
    let chain = &json["optionChain"];
    if !chain["error"].is_null() {
        let description = chain["error"]["description"]
            .as_str()
            .unwrap_or("unknown options error");
        return Err(format!("API error: {}", description));
    }

    let result = &chain["result"][0];
    if result.is_null() {
        return Err(format!("No options chain returned for {}", symbol));
    }

    let nearest = &result["options"][0];
    if nearest.is_null() {
        return Err(format!("No listed options for {}", symbol));
    }

    let expiration_date = nearest["expirationDate"]
        .as_i64()
        .and_then(|seconds| chrono::DateTime::from_timestamp(seconds, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .ok_or("No expiration date")?;

    let calls = parse_contracts(&nearest["calls"]);
    let puts = parse_contracts(&nearest["puts"]);

    let total_call_volume: i64 = calls.iter().map(|c| c.volume).sum();
    let total_put_volume: i64 = puts.iter().map(|p| p.volume).sum();

    // no call volume means the ratio is undefined; the source pins it to 0
    let put_call_ratio = if total_call_volume > 0 {
        total_put_volume as f64 / total_call_volume as f64
    } else {
        0.0
    };

    Ok(OptionsSummary {
        expiration_date,
        put_call_ratio,
        total_call_volume,
        total_put_volume,
        top_calls: top_by_volume(calls),
        top_puts: top_by_volume(puts),
    })
}

fn parse_contracts(contracts: &serde_json::Value) -> Vec<OptionContract> {
    let Some(rows) = contracts.as_array() else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| {
            Some(OptionContract {
                contract_symbol: row["contractSymbol"].as_str()?.to_string(),
                strike: row["strike"].as_f64()?,
                last_price: row["lastPrice"].as_f64().unwrap_or(0.0),
                volume: row["volume"].as_i64().unwrap_or(0),
                implied_volatility: row["impliedVolatility"].as_f64(),
            })
        })
        .collect()
}

fn top_by_volume(mut contracts: Vec<OptionContract>) -> Vec<OptionContract> {
    contracts.sort_by(|a, b| b.volume.cmp(&a.volume));
    contracts.truncate(TOP_CONTRACTS);
    contracts
}
