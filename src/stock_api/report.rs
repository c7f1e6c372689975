use super::types::{InstrumentInfo, OptionsSummary, StockData, TacticalPanel};

fn fmt_opt_f64(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

fn fmt_opt_i64(value: Option<i64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

// Plain-text dump of the inputs and the generated script, for export.
pub fn generate_raw_data_report(
    data: &[StockData],
    info: Option<&InstrumentInfo>,
    options: Option<&OptionsSummary>,
    panel: Option<&TacticalPanel>,
) -> String {
    let mut report = Vec::new();

    report.push("=== Instrument Fundamentals ===".to_string());
    if let Some(info) = info {
        let current = info.price.or_else(|| data.last().map(|d| d.close));
        report.push(format!("Symbol: {}", info.symbol));
        report.push(format!("Name: {}", info.name));
        report.push(format!("Current price: {}", fmt_opt_f64(current)));
        report.push(format!("Market cap: {}", fmt_opt_i64(info.market_cap)));
        report.push(format!("Trailing PE: {}", fmt_opt_f64(info.trailing_pe)));
        report.push(format!(
            "52-week high: {}",
            fmt_opt_f64(info.fifty_two_week_high)
        ));
        report.push(format!(
            "52-week low: {}",
            fmt_opt_f64(info.fifty_two_week_low)
        ));
    } else {
        match data.last() {
            Some(last) => report.push(format!(
                "No fundamentals available; last close {:.2} on {}",
                last.close, last.date
            )),
            None => report.push("No fundamentals available".to_string()),
        }
    }

    report.push(String::new());
    report.push("=== Options Sentiment ===".to_string());
    if let Some(options) = options {
        report.push(format!("Expiration: {}", options.expiration_date));
        report.push(format!(
            "Put/Call Ratio (PCR): {:.4}",
            options.put_call_ratio
        ));
        report.push(format!("Total call volume: {}", options.total_call_volume));
        report.push(format!("Total put volume: {}", options.total_put_volume));
    } else {
        report.push("No options data".to_string());
    }

    report.push(String::new());
    report.push("=== Tactical Panel ===".to_string());
    if let Some(panel) = panel {
        report.push(format!("State: {}", panel.state_title));
        report.push(format!("Percentile: {:.1}", panel.price_percentile));
        report.push(format!("Resistance: {:.2}", panel.resistance));
        report.push(format!("Support: {:.2}", panel.support));
        report.push(format!("Sentiment: {}", panel.emotion));
        for action in &panel.actions {
            report.push(format!("- {}", action.render()));
        }
    } else {
        report.push("Insufficient data for tactical directives".to_string());
    }

    report.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock_api::tactical::{build_panel, RegimeSnapshot};
    use crate::stock_api::types::OptionContract;

    fn sample_info() -> InstrumentInfo {
        InstrumentInfo {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            price: Some(190.25),
            market_cap: Some(2_900_000_000_000),
            trailing_pe: None,
            fifty_two_week_high: Some(199.62),
            fifty_two_week_low: Some(164.08),
            quote_type: Some("EQUITY".to_string()),
        }
    }

    fn sample_options() -> OptionsSummary {
        OptionsSummary {
            expiration_date: "2024-06-21".to_string(),
            put_call_ratio: 0.8125,
            total_call_volume: 16_000,
            total_put_volume: 13_000,
            top_calls: vec![OptionContract {
                contract_symbol: "AAPL240621C00190000".to_string(),
                strike: 190.0,
                last_price: 4.35,
                volume: 9_200,
                implied_volatility: Some(0.24),
            }],
            top_puts: Vec::new(),
        }
    }

    #[test]
    fn report_lists_fundamentals_sentiment_and_script() {
        let snapshot = RegimeSnapshot {
            support: 180.0,
            resistance: 195.0,
            percentile: 74.0,
        };
        let panel = build_panel(&snapshot, 190.25, 55.0, 0.8125, false);
        let report = generate_raw_data_report(
            &[],
            Some(&sample_info()),
            Some(&sample_options()),
            Some(&panel),
        );
        assert!(report.contains("=== Instrument Fundamentals ==="));
        assert!(report.contains("Symbol: AAPL"));
        assert!(report.contains("Trailing PE: N/A"));
        assert!(report.contains("=== Options Sentiment ==="));
        assert!(report.contains("Put/Call Ratio (PCR): 0.8125"));
        assert!(report.contains("Total put volume: 13000"));
        assert!(report.contains("=== Tactical Panel ==="));
        assert!(report.contains("Range-Bound Zone"));
        assert!(report.contains("- Defined band"));
    }

    #[test]
    fn report_degrades_when_everything_is_missing() {
        let report = generate_raw_data_report(&[], None, None, None);
        assert!(report.contains("No fundamentals available"));
        assert!(report.contains("No options data"));
        assert!(report.contains("Insufficient data for tactical directives"));
    }
}
