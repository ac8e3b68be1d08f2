//! Conversions from wire rows to raw observations, with validation.

use super::align::ensure_ascending;
use super::wire::{MarketChartRangeResponse, PriceRow};
use super::{CandlePoint, LinePoint};
use crate::error::SeriesError;
use crate::shared::serde_util::{decimal_number, timestamp_ms};
use serde_json::Number;

impl TryFrom<&[Number]> for LinePoint {
    type Error = String;

    fn try_from(row: &[Number]) -> Result<Self, Self::Error> {
        let [t, price] = row else {
            return Err(format!("expected 2 fields, got {}", row.len()));
        };
        Ok(Self {
            timestamp_ms: timestamp_ms::from_number(t)?,
            price: decimal_number::from_number(price)?,
        })
    }
}

impl TryFrom<&[Number]> for CandlePoint {
    type Error = String;

    fn try_from(row: &[Number]) -> Result<Self, Self::Error> {
        let [t, open, high, low, close] = row else {
            return Err(format!("expected 5 fields, got {}", row.len()));
        };
        Ok(Self {
            timestamp_ms: timestamp_ms::from_number(t)?,
            open: decimal_number::from_number(open)?,
            high: decimal_number::from_number(high)?,
            low: decimal_number::from_number(low)?,
            close: decimal_number::from_number(close)?,
        })
    }
}

fn convert_rows<T>(rows: &[PriceRow]) -> Result<Vec<T>, SeriesError>
where
    T: for<'a> TryFrom<&'a [Number], Error = String> + super::Observation,
{
    let points = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            T::try_from(row.as_slice()).map_err(|reason| SeriesError::MalformedRow { index, reason })
        })
        .collect::<Result<Vec<T>, _>>()?;
    ensure_ascending(&points)?;
    Ok(points)
}

/// Line points from a market-chart response. A missing `prices` field is empty.
pub(crate) fn line_points(resp: &MarketChartRangeResponse) -> Result<Vec<LinePoint>, SeriesError> {
    match &resp.prices {
        Some(rows) => convert_rows(rows),
        None => Ok(Vec::new()),
    }
}

/// Candle points from an OHLC response.
pub(crate) fn candle_points(rows: &[PriceRow]) -> Result<Vec<CandlePoint>, SeriesError> {
    convert_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_history::wire::OhlcResponse;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_line_points_conversion() {
        let resp: MarketChartRangeResponse =
            serde_json::from_str(r#"{"prices": [[1000, 1.5], [61000, 2.25]]}"#).unwrap();
        let points = line_points(&resp).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp_ms, 1000);
        assert_eq!(points[1].price, Decimal::from_str("2.25").unwrap());
    }

    #[test]
    fn test_line_points_missing_prices_is_empty() {
        let points = line_points(&MarketChartRangeResponse::default()).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_line_row_wrong_arity() {
        let resp: MarketChartRangeResponse =
            serde_json::from_str(r#"{"prices": [[1000, 1.5], [2000]]}"#).unwrap();
        let err = line_points(&resp).unwrap_err();
        assert!(matches!(err, SeriesError::MalformedRow { index: 1, .. }));
    }

    #[test]
    fn test_candle_points_conversion() {
        let rows: OhlcResponse =
            serde_json::from_str("[[0, 10, 20, 5, 15], [1800000, 15, 16, 14, 15.5]]").unwrap();
        let points = candle_points(&rows).unwrap();
        assert_eq!(points[1].close, Decimal::from_str("15.5").unwrap());
        assert_eq!(points[0].high, Decimal::from(20));
    }

    #[test]
    fn test_candle_points_unordered_is_rejected() {
        let rows: OhlcResponse =
            serde_json::from_str("[[1800000, 1, 1, 1, 1], [0, 1, 1, 1, 1]]").unwrap();
        assert!(matches!(
            candle_points(&rows),
            Err(SeriesError::Unordered { index: 1, .. })
        ));
    }
}
