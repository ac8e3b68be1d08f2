//! Chart selection — pair, time range and view mode.
//!
//! A change to any of the three restarts the pipeline.

use crate::domain::asset::PairSelection;
use crate::shared::ViewMode;
use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};

// ─── TimeRange ───────────────────────────────────────────────────────────────

/// A selectable chart window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Short name shown on the range selector, e.g. `"1W"`.
    pub name: String,
    /// Day count for the candlestick endpoint. `None` for line ranges.
    pub days: Option<u32>,
    /// Human label for the headline, e.g. `"Past week"`.
    pub label: String,
}

impl TimeRange {
    pub fn new(name: &str, days: Option<u32>, label: &str) -> Self {
        Self {
            name: name.to_string(),
            days,
            label: label.to_string(),
        }
    }

    /// Ranges offered for a view mode, first one is the default.
    pub fn presets(mode: ViewMode) -> Vec<TimeRange> {
        match mode {
            ViewMode::Candlestick => vec![
                TimeRange::new("1D", Some(1), "Past 1 day"),
                TimeRange::new("1W", Some(7), "Past week"),
                TimeRange::new("2W", Some(14), "Past 2 weeks"),
                TimeRange::new("1M", Some(30), "Past month"),
            ],
            ViewMode::Line => vec![
                TimeRange::new("1D", None, "Past 1 day"),
                TimeRange::new("3D", None, "Past 3 days"),
                TimeRange::new("1W", None, "Past week"),
                TimeRange::new("1M", None, "Past month"),
                TimeRange::new("1Y", None, "Past year"),
            ],
        }
    }

    pub fn default_for(mode: ViewMode) -> TimeRange {
        match mode {
            ViewMode::Candlestick => TimeRange::new("1D", Some(1), "Past 1 day"),
            ViewMode::Line => TimeRange::new("1D", None, "Past 1 day"),
        }
    }

    /// Day count for the candlestick endpoint, derived from the name when unset.
    pub fn day_count(&self) -> u32 {
        if let Some(d) = self.days {
            return d;
        }
        match self.name.as_str() {
            "3D" => 3,
            "1W" => 7,
            "2W" => 14,
            "1M" => 30,
            "1Y" => 365,
            _ => 1,
        }
    }

    /// Query window ending at `now`, in Unix seconds rounded up.
    ///
    /// Months and years are subtracted on the calendar and clamp to month end:
    /// "1M" from March 31 starts on the last day of February instead of
    /// rolling over into early March. Unknown names leave `from == to`.
    pub fn window(&self, now: DateTime<Utc>) -> Window {
        let start = match self.name.as_str() {
            "1D" => now.checked_sub_days(Days::new(1)),
            "3D" => now.checked_sub_days(Days::new(3)),
            "1W" => now.checked_sub_days(Days::new(7)),
            "2W" => now.checked_sub_days(Days::new(14)),
            "1M" => now.checked_sub_months(Months::new(1)),
            "1Y" => now.checked_sub_months(Months::new(12)),
            other => {
                tracing::debug!(range = other, "unknown range name, empty window");
                Some(now)
            }
        }
        .unwrap_or(now);

        Window {
            from_secs: ceil_secs(start),
            to_secs: ceil_secs(now),
        }
    }
}

fn ceil_secs(t: DateTime<Utc>) -> i64 {
    let millis = t.timestamp_millis();
    millis.div_euclid(1000) + i64::from(millis.rem_euclid(1000) != 0)
}

/// A `[from, to]` query window in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub from_secs: i64,
    pub to_secs: i64,
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// Everything that determines one chart series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub pair: PairSelection,
    pub range: TimeRange,
    pub mode: ViewMode,
}

impl Selection {
    /// A selection with the default range for `mode`.
    pub fn new(pair: PairSelection, mode: ViewMode) -> Self {
        Self {
            pair,
            range: TimeRange::default_for(mode),
            mode,
        }
    }

    pub fn with_pair(self, pair: PairSelection) -> Self {
        Self { pair, ..self }
    }

    pub fn with_range(self, range: TimeRange) -> Self {
        Self { range, ..self }
    }

    /// Switch view mode. The range resets to the new mode's default because
    /// the two modes offer different ranges.
    pub fn with_view_mode(self, mode: ViewMode) -> Self {
        Self {
            range: TimeRange::default_for(mode),
            mode,
            ..self
        }
    }

    pub fn is_pair(&self) -> bool {
        self.pair.is_pair()
    }
}
