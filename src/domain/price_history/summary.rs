//! Headline numbers for a composed series.

use super::compose::ratio;
use super::ChartSeries;
use crate::error::ComputeError;
use crate::shared::fmt;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// How a [`SeriesSummary`] was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum SummaryStatus {
    /// Numbers come from a non-empty series.
    Computed,
    /// The series was empty; numbers are zero.
    NoData,
    /// A zero denominator or overflow; numbers must not be shown.
    Degenerate(ComputeError),
}

/// Latest price and percent change over the selected window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesSummary {
    pub latest_value: Decimal,
    /// `last / first * 100 - 100`, two fraction digits.
    pub percent_change: Decimal,
    /// Human label of the time range, e.g. `"Past week"`.
    pub window_label: String,
    pub status: SummaryStatus,
}

impl SeriesSummary {
    /// The zero-value summary used for an empty series.
    pub fn no_data(window_label: &str) -> Self {
        Self {
            latest_value: Decimal::ZERO,
            percent_change: Decimal::ZERO,
            window_label: window_label.to_string(),
            status: SummaryStatus::NoData,
        }
    }

    /// A summary carrying a computation error instead of numbers.
    pub fn degenerate(error: ComputeError, window_label: &str) -> Self {
        Self {
            latest_value: Decimal::ZERO,
            percent_change: Decimal::ZERO,
            window_label: window_label.to_string(),
            status: SummaryStatus::Degenerate(error),
        }
    }

    pub fn is_computed(&self) -> bool {
        self.status == SummaryStatus::Computed
    }

    /// Formatted latest price, or `None` unless the numbers are meaningful.
    pub fn display_price(&self) -> Option<String> {
        self.is_computed().then(|| fmt::price(&self.latest_value))
    }

    /// Formatted signed percent change, or `None` unless the numbers are meaningful.
    pub fn display_percent(&self) -> Option<String> {
        self.is_computed().then(|| fmt::percent(&self.percent_change))
    }
}

/// Summarize a series: latest value (`value`, or `open` for candles) and
/// percent change between the first and last points.
pub fn summarize(series: &ChartSeries, window_label: &str) -> SeriesSummary {
    let (Some((first_time, first)), Some((last_time, last))) =
        (series.first_value(), series.last_value())
    else {
        return SeriesSummary::no_data(window_label);
    };

    let percent = ratio(last, first, first_time).and_then(|r| {
        r.checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|p| p.checked_sub(Decimal::ONE_HUNDRED))
            .ok_or(ComputeError::Overflow { time: last_time })
    });

    match percent {
        Ok(p) => SeriesSummary {
            latest_value: last,
            percent_change: p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            window_label: window_label.to_string(),
            status: SummaryStatus::Computed,
        },
        Err(e) => {
            tracing::warn!(error = %e, "percent change is undefined for this series");
            SeriesSummary::degenerate(e, window_label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_history::{CandleData, LineData};
    use crate::shared::BucketKey;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(points: &[(i64, &str)]) -> ChartSeries {
        ChartSeries::Line(
            points
                .iter()
                .map(|&(t, v)| LineData {
                    time: BucketKey::from_floored_secs(t),
                    value: dec(v),
                })
                .collect(),
        )
    }

    #[test]
    fn test_percent_change_example() {
        let summary = summarize(&line(&[(0, "100"), (60, "110")]), "Past 1 day");
        assert_eq!(summary.latest_value, dec("110"));
        assert_eq!(summary.percent_change, dec("10.00"));
        assert_eq!(summary.window_label, "Past 1 day");
        assert!(summary.is_computed());
        assert_eq!(summary.display_percent().as_deref(), Some("+10.00%"));
        assert_eq!(summary.display_price().as_deref(), Some("110"));
    }

    #[test]
    fn test_percent_change_rounds_half_away_from_zero() {
        // 1.00005 / 1 * 100 - 100 = 0.005
        let up = summarize(&line(&[(0, "1"), (60, "1.00005")]), "");
        assert_eq!(up.percent_change, dec("0.01"));
        let down = summarize(&line(&[(0, "1"), (60, "0.99995")]), "");
        assert_eq!(down.percent_change, dec("-0.01"));
    }

    #[test]
    fn test_single_point_is_zero_change() {
        let summary = summarize(&line(&[(0, "42.5")]), "");
        assert_eq!(summary.latest_value, dec("42.5"));
        assert!(summary.percent_change.is_zero());
        assert!(summary.is_computed());
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let summary = summarize(&ChartSeries::Line(Vec::new()), "Past week");
        assert_eq!(summary, SeriesSummary::no_data("Past week"));
        assert!(summary.latest_value.is_zero());
        assert!(summary.display_price().is_none());
    }

    #[test]
    fn test_candle_uses_open() {
        let candle = |t: i64, open: &str, close: &str| CandleData {
            time: BucketKey::from_floored_secs(t),
            open: dec(open),
            high: dec("1000"),
            low: dec("0.1"),
            close: dec(close),
        };
        let series = ChartSeries::Candle(vec![candle(0, "50", "80"), candle(60, "40", "90")]);
        let summary = summarize(&series, "");
        assert_eq!(summary.latest_value, dec("40"));
        assert_eq!(summary.percent_change, dec("-20"));
    }

    #[test]
    fn test_zero_first_value_is_degenerate_not_zero() {
        let summary = summarize(&line(&[(0, "0"), (60, "5")]), "Past 1 day");
        assert_eq!(
            summary.status,
            SummaryStatus::Degenerate(ComputeError::ZeroDenominator {
                time: BucketKey::from_floored_secs(0),
            })
        );
        assert_ne!(summary, SeriesSummary::no_data("Past 1 day"));
        assert!(summary.display_percent().is_none());
    }

    #[test]
    fn test_status_json_shape() {
        let json = serde_json::to_value(SeriesSummary::no_data("Past year")).unwrap();
        assert_eq!(json["status"]["status"], "no_data");
        assert_eq!(json["window_label"], "Past year");
    }
}
