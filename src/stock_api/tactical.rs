use serde::{Deserialize, Serialize};

use super::types::{InstrumentInfo, OptionsSummary, StockData, TacticalPanel, TechnicalIndicators};
use super::utils::rolling_mean_last;

// The band deliberately uses a short window: it tracks the real bull/bear
// battleground after a violent move instead of a stale 30-day range.
pub const TACTICAL_WINDOW: usize = 8;
pub const DEEP_VALUE_MAX_PERCENTILE: f64 = 25.0;
pub const HIGH_TREND_MIN_PERCENTILE: f64 = 75.0;
pub const VOLUME_SURGE_WINDOW: usize = 20;
pub const VOLUME_SURGE_RATIO: f64 = 1.5;

const DEGENERATE_RANGE_NUDGE: f64 = 0.01;
const BREAKOUT_PROXIMITY: f64 = 0.95;
const OVERSOLD_PCR: f64 = 0.7;
const OVERSOLD_RSI: f64 = 35.0;
const OVERBOUGHT_RSI: f64 = 70.0;
const EUPHORIC_PCR: f64 = 0.6;
const DEFENSIVE_PCR: f64 = 1.2;
const NEUTRAL_RSI: f64 = 50.0;
const NEUTRAL_PCR: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarketRegime {
    DeepValue,
    RangeBound,
    HighTrend,
}

impl MarketRegime {
    pub fn from_percentile(percentile: f64) -> Self {
        if percentile <= DEEP_VALUE_MAX_PERCENTILE {
            MarketRegime::DeepValue
        } else if percentile <= HIGH_TREND_MIN_PERCENTILE {
            MarketRegime::RangeBound
        } else {
            MarketRegime::HighTrend
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MarketRegime::DeepValue => "Deep-Value Zone (oversold left side)",
            MarketRegime::RangeBound => "Range-Bound Zone (two-way chop)",
            MarketRegime::HighTrend => "High-Trend Zone (right-side momentum)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MarketRegime::DeepValue => {
                "Price sits in the absolute bottom region of its one-year range. Moving averages are likely inverted or whipsawing here, so trend signals cannot be trusted."
            }
            MarketRegime::RangeBound => {
                "Price has left the bottom and entered a sideways consolidation. Chasing strength and selling weakness both get punished in this phase."
            }
            MarketRegime::HighTrend => {
                "Price is running in a strong ascending channel or near its one-year high. Go with the move; trend indicators are at their most reliable."
            }
        }
    }
}

// Structured directives: the decision logic picks kinds and parameters,
// the presentation layer decides how to word them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params")]
pub enum ActionDirective {
    NoPanicSelling,
    DistrustTrendSignals,
    OversoldBounceAlert,
    RangeRotation { support: f64, resistance: f64 },
    PatientProbe,
    BandBoundaries { support: f64, resistance: f64 },
    GridTactics,
    BreakoutWatch,
    WeakApproach,
    TrailMovingAverages,
    ToppingRisk,
    RideTrend,
}

impl ActionDirective {
    pub fn render(&self) -> String {
        match self {
            ActionDirective::NoPanicSelling => {
                "Absolute discipline: no panic selling or capitulation stops at this level.".to_string()
            }
            ActionDirective::DistrustTrendSignals => {
                "Filter the averages: ignore SMA/MACD sell signals down here and watch the floor instead.".to_string()
            }
            ActionDirective::OversoldBounceAlert => {
                "Anomaly alert: sentiment is extremely oversold or the options tape is twitching; a technical bounce can fire at any time.".to_string()
            }
            ActionDirective::RangeRotation { support, resistance } => format!(
                "Grid activation: scalp out near ${:.2} and rebuild near ${:.2} to grind down the cost basis.",
                resistance, support
            ),
            ActionDirective::PatientProbe => {
                "Patient ambush: the right side has not confirmed; probe with a small position near support and wait for a volume breakout before sizing up.".to_string()
            }
            ActionDirective::BandBoundaries { support, resistance } => format!(
                "Defined band: currently trading inside the ${:.2} - ${:.2} box.",
                support, resistance
            ),
            ActionDirective::GridTactics => {
                "Range rotation: buy near the floor, sell near the ceiling, harvest the swing.".to_string()
            }
            ActionDirective::BreakoutWatch => {
                "Breakout watch: price is pressing the ceiling on surging volume; if the close holds above it the box opens, be ready to chase.".to_string()
            }
            ActionDirective::WeakApproach => {
                "Heavy-resistance warning: testing the ceiling without volume; stand ready to sell into strength.".to_string()
            }
            ActionDirective::TrailMovingAverages => {
                "Core protection: hold while the 20/50-day averages hold; no break, no sale.".to_string()
            }
            ActionDirective::ToppingRisk => {
                "Topping risk: RSI is deeply overbought while options are euphoric; guard against a blow-off and consider scaling out in tranches.".to_string()
            }
            ActionDirective::RideTrend => {
                "Ride the trend: momentum is healthy, do not guess the top, let profits run.".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeSnapshot {
    pub support: f64,
    pub resistance: f64,
    pub percentile: f64,
}

// Short-window support/resistance band plus the 52-week price percentile.
// Falls back to the full series range when metadata is missing; only an
// empty series yields None.
pub fn classify_price_position(
    data: &[StockData],
    info: Option<&InstrumentInfo>,
) -> Option<RegimeSnapshot> {
    let current = data.last()?.close;

    let window_start = data.len().saturating_sub(TACTICAL_WINDOW);
    let window = &data[window_start..];
    let support = window.iter().map(|d| d.low).fold(f64::INFINITY, f64::min);
    let resistance = window
        .iter()
        .map(|d| d.high)
        .fold(f64::NEG_INFINITY, f64::max);

    let series_high = data.iter().map(|d| d.high).fold(f64::NEG_INFINITY, f64::max);
    let series_low = data.iter().map(|d| d.low).fold(f64::INFINITY, f64::min);

    let low_52w = info
        .and_then(|i| i.fifty_two_week_low)
        .filter(|v| v.is_finite())
        .unwrap_or(series_low);
    let mut high_52w = info
        .and_then(|i| i.fifty_two_week_high)
        .filter(|v| v.is_finite())
        .unwrap_or(series_high);

    // degenerate one-year range: nudge the divisor instead of dividing by zero
    if high_52w == low_52w {
        high_52w += DEGENERATE_RANGE_NUDGE;
    }

    // Intentionally unclamped: a close outside stale 52-week bounds pushes
    // the percentile outside [0, 100] and callers must tolerate that.
    let percentile = (current - low_52w) / (high_52w - low_52w) * 100.0;

    Some(RegimeSnapshot {
        support,
        resistance,
        percentile,
    })
}

pub fn volume_surge(data: &[StockData]) -> bool {
    let volumes: Vec<f64> = data.iter().map(|d| d.volume as f64).collect();
    match (volumes.last(), rolling_mean_last(&volumes, VOLUME_SURGE_WINDOW)) {
        (Some(&latest), Some(mean)) => latest > mean * VOLUME_SURGE_RATIO,
        _ => false,
    }
}

pub fn sentiment_narrative(put_call_ratio: f64) -> String {
    if put_call_ratio < EUPHORIC_PCR {
        format!(
            "PCR very low ({:.2}): options money is betting hard on an upside move.",
            put_call_ratio
        )
    } else if put_call_ratio > DEFENSIVE_PCR {
        format!(
            "PCR elevated ({:.2}): hedging and risk-off flows dominate, keep defense in mind.",
            put_call_ratio
        )
    } else {
        format!(
            "PCR neutral ({:.2}): the options market shows no extreme split.",
            put_call_ratio
        )
    }
}

// Three-regime dispatch. Secondary conditions append in a fixed order,
// defensive directives first.
pub fn build_panel(
    snapshot: &RegimeSnapshot,
    current_price: f64,
    rsi: f64,
    put_call_ratio: f64,
    volume_surge: bool,
) -> TacticalPanel {
    let regime = MarketRegime::from_percentile(snapshot.percentile);
    let mut actions = Vec::new();

    match regime {
        MarketRegime::DeepValue => {
            actions.push(ActionDirective::NoPanicSelling);
            actions.push(ActionDirective::DistrustTrendSignals);
            if put_call_ratio < OVERSOLD_PCR || rsi < OVERSOLD_RSI {
                actions.push(ActionDirective::OversoldBounceAlert);
                actions.push(ActionDirective::RangeRotation {
                    support: snapshot.support,
                    resistance: snapshot.resistance,
                });
            } else {
                actions.push(ActionDirective::PatientProbe);
            }
        }
        MarketRegime::RangeBound => {
            actions.push(ActionDirective::BandBoundaries {
                support: snapshot.support,
                resistance: snapshot.resistance,
            });
            actions.push(ActionDirective::GridTactics);
            if current_price >= snapshot.resistance * BREAKOUT_PROXIMITY {
                if volume_surge {
                    actions.push(ActionDirective::BreakoutWatch);
                } else {
                    actions.push(ActionDirective::WeakApproach);
                }
            }
        }
        MarketRegime::HighTrend => {
            actions.push(ActionDirective::TrailMovingAverages);
            if rsi > OVERBOUGHT_RSI && put_call_ratio < EUPHORIC_PCR {
                actions.push(ActionDirective::ToppingRisk);
            } else {
                actions.push(ActionDirective::RideTrend);
            }
        }
    }

    TacticalPanel {
        support: snapshot.support,
        resistance: snapshot.resistance,
        price_percentile: snapshot.percentile,
        state_title: regime.title().to_string(),
        state_desc: regime.description().to_string(),
        emotion: sentiment_narrative(put_call_ratio),
        actions,
    }
}

pub fn generate_tactical_panel(
    data: &[StockData],
    indicators: &TechnicalIndicators,
    options: Option<&OptionsSummary>,
    info: Option<&InstrumentInfo>,
) -> Option<TacticalPanel> {
    let snapshot = classify_price_position(data, info)?;
    let current_price = data.last()?.close;

    let rsi = indicators
        .rsi
        .last()
        .copied()
        .flatten()
        .unwrap_or(NEUTRAL_RSI);
    let put_call_ratio = options.map(|o| o.put_call_ratio).unwrap_or(NEUTRAL_PCR);

    Some(build_panel(
        &snapshot,
        current_price,
        rsi,
        put_call_ratio,
        volume_surge(data),
    ))
}
