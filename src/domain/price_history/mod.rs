//! Price history domain — raw observations, alignment, pair-price composition.
//!
//! Data flow for one chart selection:
//!
//! ```text
//! fetch (per asset) → bucket → align → compose → summarize
//! ```
//!
//! Everything in this module except `client` is pure and synchronous.

pub mod align;
pub mod bucket;
#[cfg(feature = "http")]
pub mod client;
pub mod compose;
pub(crate) mod convert;
pub mod state;
pub mod summary;
pub mod wire;

pub use align::{align, AlignedPair};
pub use bucket::{bucket, ToBucket};
pub use compose::{compose_candles, compose_line};
pub use state::{ChartSnapshot, ChartState, ChartView, PipelineState};
pub use summary::{summarize, SeriesSummary, SummaryStatus};

use crate::shared::{BucketKey, ViewMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Raw observations ────────────────────────────────────────────────────────

/// Anything carrying an upstream millisecond timestamp.
pub trait Observation {
    fn timestamp_ms(&self) -> i64;

    fn bucket(&self) -> BucketKey {
        bucket::bucket(self.timestamp_ms())
    }
}

/// One upstream line point: `[timestamp_ms, price]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePoint {
    pub timestamp_ms: i64,
    pub price: Decimal,
}

impl Observation for LinePoint {
    fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }
}

/// One upstream candle: `[timestamp_ms, open, high, low, close]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandlePoint {
    pub timestamp_ms: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl Observation for CandlePoint {
    fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }
}

// ─── Derived observations ────────────────────────────────────────────────────

/// A single point on a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineData {
    pub time: BucketKey,
    pub value: Decimal,
}

/// A single candle on a candlestick chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleData {
    pub time: BucketKey,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl CandleData {
    /// Whether `low ≤ open, close ≤ high` holds.
    ///
    /// A pair candle is divided component-wise, so this can be false even when
    /// both source candles were well-formed.
    pub fn is_ordered(&self) -> bool {
        self.low <= self.open.min(self.close)
            && self.high >= self.open.max(self.close)
            && self.low <= self.high
    }
}

/// A composed chart series, shape matching the view mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum ChartSeries {
    Line(Vec<LineData>),
    Candle(Vec<CandleData>),
}

impl ChartSeries {
    pub fn empty(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Line => ChartSeries::Line(Vec::new()),
            ViewMode::Candlestick => ChartSeries::Candle(Vec::new()),
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            ChartSeries::Line(_) => ViewMode::Line,
            ChartSeries::Candle(_) => ViewMode::Candlestick,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChartSeries::Line(points) => points.len(),
            ChartSeries::Candle(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Headline value of the first point (`value`, or `open` for candles).
    pub fn first_value(&self) -> Option<(BucketKey, Decimal)> {
        match self {
            ChartSeries::Line(points) => points.first().map(|p| (p.time, p.value)),
            ChartSeries::Candle(points) => points.first().map(|c| (c.time, c.open)),
        }
    }

    /// Headline value of the last point (`value`, or `open` for candles).
    pub fn last_value(&self) -> Option<(BucketKey, Decimal)> {
        match self {
            ChartSeries::Line(points) => points.last().map(|p| (p.time, p.value)),
            ChartSeries::Candle(points) => points.last().map(|c| (c.time, c.open)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(secs: i64) -> BucketKey {
        BucketKey::from_floored_secs(secs)
    }

    #[test]
    fn test_candle_is_ordered() {
        let ok = CandleData {
            time: key(0),
            open: Decimal::from(2),
            high: Decimal::from(4),
            low: Decimal::from(1),
            close: Decimal::from(3),
        };
        assert!(ok.is_ordered());

        let inverted = CandleData { high: Decimal::from(2), ..ok };
        assert!(!inverted.is_ordered());
    }

    #[test]
    fn test_series_headline_values() {
        let series = ChartSeries::Candle(vec![
            CandleData {
                time: key(0),
                open: Decimal::from(5),
                high: Decimal::from(9),
                low: Decimal::from(1),
                close: Decimal::from(7),
            },
            CandleData {
                time: key(60),
                open: Decimal::from(6),
                high: Decimal::from(9),
                low: Decimal::from(1),
                close: Decimal::from(8),
            },
        ]);
        assert_eq!(series.first_value(), Some((key(0), Decimal::from(5))));
        assert_eq!(series.last_value(), Some((key(60), Decimal::from(6))));
        assert_eq!(series.mode(), ViewMode::Candlestick);
    }

    #[test]
    fn test_series_json_shape() {
        let series = ChartSeries::Line(vec![LineData {
            time: key(60),
            value: Decimal::new(15, 1),
        }]);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["points"][0]["time"], 60);
        assert_eq!(json["points"][0]["value"], "1.5");
    }

    #[test]
    fn test_empty_series_matches_mode() {
        assert!(ChartSeries::empty(ViewMode::Line).is_empty());
        assert_eq!(
            ChartSeries::empty(ViewMode::Candlestick).mode(),
            ViewMode::Candlestick
        );
    }
}
