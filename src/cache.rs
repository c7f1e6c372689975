use std::time::Duration;
use moka::future::Cache;
use crate::stock_api::{InstrumentInfo, OptionsSummary, StockData};

// Session-scoped TTL caches in front of the network fetchers. History moves
// once per session, quotes go stale within a minute, option chains sit in
// between. Nothing is persisted.
pub struct StockCache {
    history: Cache<String, Vec<StockData>>,
    info: Cache<String, InstrumentInfo>,
    options: Cache<String, Option<OptionsSummary>>,
}

impl StockCache {
    pub fn new() -> Self {
        let history_cache = Cache::builder()
            .time_to_live(Duration::from_secs(6 * 60 * 60))
            .build();

        let info_cache = Cache::builder()
            .time_to_live(Duration::from_secs(65))
            .build();

        let options_cache = Cache::builder()
            .time_to_live(Duration::from_secs(10 * 60))
            .build();

        Self {
            history: history_cache,
            info: info_cache,
            options: options_cache,
        }
    }

    pub async fn get_history(&self, symbol: &str, period: &str) -> Option<Vec<StockData>> {
        let key = format!("{}:{}", symbol, period);
        self.history.get(&key).await
    }

    pub async fn set_history(&self, symbol: String, period: String, data: Vec<StockData>) {
        let key = format!("{}:{}", symbol, period);
        self.history.insert(key, data).await;
    }

    pub async fn get_info(&self, symbol: &str) -> Option<InstrumentInfo> {
        self.info.get(symbol).await
    }

    pub async fn set_info(&self, symbol: String, info: InstrumentInfo) {
        self.info.insert(symbol, info).await;
    }

    // The absence of a chain is cached too: tickers with no listed
    // derivatives should not be re-queried on every lookup.
    pub async fn get_options(&self, symbol: &str) -> Option<Option<OptionsSummary>> {
        self.options.get(symbol).await
    }

    pub async fn set_options(&self, symbol: String, summary: Option<OptionsSummary>) {
        self.options.insert(symbol, summary).await;
    }
}

impl Default for StockCache {
    fn default() -> Self {
        Self::new()
    }
}
