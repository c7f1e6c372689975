use crate::cache::StockCache;
use crate::stock_api::{
    fetch_instrument_info, fetch_options_summary, fetch_price_history, InstrumentInfo,
    OptionsSummary, StockData,
};
use std::sync::Arc;
use tauri::State;

// A failed or empty history fetch is the one hard failure in the pipeline;
// the frontend shows a load-failure message and stops.
#[tauri::command]
pub async fn get_stock_history(
    symbol: String,
    period: String,
    cache: State<'_, Arc<StockCache>>,
) -> Result<Vec<StockData>, String> {
    if let Some(cached) = cache.get_history(&symbol, &period).await {
        return Ok(cached);
    }

    let fetched = fetch_price_history(&symbol, &period).await?;
    cache
        .set_history(symbol, period, fetched.clone())
        .await;

    Ok(fetched)
}

// Metadata is optional everywhere downstream, so a failed fetch degrades to
// None instead of failing the lookup.
#[tauri::command]
pub async fn get_instrument_info(
    symbol: String,
    cache: State<'_, Arc<StockCache>>,
) -> Result<Option<InstrumentInfo>, String> {
    if let Some(cached) = cache.get_info(&symbol).await {
        return Ok(Some(cached));
    }

    match fetch_instrument_info(&symbol).await {
        Ok(info) => {
            cache.set_info(symbol, info.clone()).await;
            Ok(Some(info))
        }
        Err(err) => {
            eprintln!("Failed to fetch instrument info for {}: {}", symbol, err);
            Ok(None)
        }
    }
}

// Tickers without listed derivatives are a normal outcome: the core falls
// back to a neutral put/call ratio.
#[tauri::command]
pub async fn get_options_summary(
    symbol: String,
    cache: State<'_, Arc<StockCache>>,
) -> Result<Option<OptionsSummary>, String> {
    if let Some(cached) = cache.get_options(&symbol).await {
        return Ok(cached);
    }

    let summary = match fetch_options_summary(&symbol).await {
        Ok(summary) => Some(summary),
        Err(err) => {
            eprintln!("No options summary for {}: {}", symbol, err);
            None
        }
    };

    cache.set_options(symbol, summary.clone()).await;
    Ok(summary)
}
