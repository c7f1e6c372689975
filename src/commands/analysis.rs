use crate::stock_api::{
    calculate_indicators, generate_raw_data_report, generate_tactical_panel, predict_trend,
    run_all_backtests, InstrumentInfo, OptionsSummary, StockData, StrategyReport, TacticalPanel,
    TechnicalIndicators, TrendForecast, DEFAULT_FORECAST_DAYS,
};

#[tauri::command]
pub fn calculate_technical_indicators(
    data: Vec<StockData>,
) -> Result<TechnicalIndicators, String> {
    Ok(calculate_indicators(&data))
}

// Ok(None) means "not enough data for a panel"; the frontend renders a
// warning instead of a crash.
#[tauri::command]
pub fn get_tactical_panel(
    data: Vec<StockData>,
    options: Option<OptionsSummary>,
    info: Option<InstrumentInfo>,
) -> Result<Option<TacticalPanel>, String> {
    let indicators = calculate_indicators(&data);
    Ok(generate_tactical_panel(
        &data,
        &indicators,
        options.as_ref(),
        info.as_ref(),
    ))
}

#[tauri::command]
pub fn run_strategy_backtests(data: Vec<StockData>) -> Result<Vec<StrategyReport>, String> {
    Ok(run_all_backtests(&data))
}

#[tauri::command]
pub fn predict_price_trend(
    data: Vec<StockData>,
    future_days: Option<usize>,
) -> Result<Option<TrendForecast>, String> {
    Ok(predict_trend(
        &data,
        future_days.unwrap_or(DEFAULT_FORECAST_DAYS),
    ))
}

#[tauri::command]
pub fn generate_raw_report(
    data: Vec<StockData>,
    info: Option<InstrumentInfo>,
    options: Option<OptionsSummary>,
) -> Result<String, String> {
    let indicators = calculate_indicators(&data);
    let panel = generate_tactical_panel(&data, &indicators, options.as_ref(), info.as_ref());
    Ok(generate_raw_data_report(
        &data,
        info.as_ref(),
        options.as_ref(),
        panel.as_ref(),
    ))
}
