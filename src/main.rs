// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cache;
mod commands;
mod stock_api;

use cache::StockCache;
use std::sync::Arc;
use tauri::Manager;

fn main() {
    tauri::Builder::default()
        .setup(|app| {
            app.manage(Arc::new(StockCache::new()));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_stock_history,
            commands::get_instrument_info,
            commands::get_options_summary,
            commands::calculate_technical_indicators,
            commands::get_tactical_panel,
            commands::run_strategy_backtests,
            commands::predict_price_trend,
            commands::generate_raw_report
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
