pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, String> {
    let date_part = if date_str.contains(' ') {
        date_str.split(' ').next().unwrap_or(date_str)
    } else {
        date_str
    };
    chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| chrono::NaiveDate::parse_from_str(date_part, "%Y/%m/%d"))
        .map_err(|e| format!("Failed to parse date: {}", e))
}

pub fn add_days(date: &chrono::NaiveDate, days: i64) -> String {
    (*date + chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

// Normalize a UI period selection to the provider's range parameter.
// Unknown values fall back to one year of history.
pub fn normalize_period(period: &str) -> &'static str {
    match period {
        "1mo" => "1mo",
        "3mo" => "3mo",
        "6mo" => "6mo",
        "1y" => "1y",
        "2y" => "2y",
        "5y" => "5y",
        "max" => "max",
        _ => "1y",
    }
}

// Ordinary least squares fit of y over x; returns (slope, intercept).
// Degenerate inputs (fewer than 2 points, zero x variance) yield a flat fit.
pub fn linear_regression(x: &[f64], y: &[f64]) -> (f64, f64) {
    if x.len() != y.len() || x.len() < 2 {
        let last = y.last().copied().unwrap_or(0.0);
        return (0.0, last);
    }

    let n = x.len() as f64;
    let x_sum: f64 = x.iter().sum();
    let y_sum: f64 = y.iter().sum();
    let xy_sum: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let x2_sum: f64 = x.iter().map(|a| a * a).sum();

    let denom = n * x2_sum - x_sum * x_sum;
    if denom.abs() < 1e-10 {
        return (0.0, y_sum / n);
    }

    let slope = (n * xy_sum - x_sum * y_sum) / denom;
    let intercept = (y_sum - slope * x_sum) / n;
    (slope, intercept)
}

// Mean over the trailing `window` values, None until the window has filled.
pub fn rolling_mean_last(data: &[f64], window: usize) -> Option<f64> {
    if window == 0 || data.len() < window {
        return None;
    }
    let tail = &data[data.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}
