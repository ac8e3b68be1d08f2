//! Ratio composition — aligned pairs into the derived pair-price series.

use super::{AlignedPair, CandleData, CandlePoint, LineData, LinePoint};
use crate::error::ComputeError;
use crate::shared::BucketKey;
use rust_decimal::Decimal;

/// `numerator / denominator`, refusing to paper over a zero or an overflow.
pub(crate) fn ratio(
    numerator: Decimal,
    denominator: Decimal,
    time: BucketKey,
) -> Result<Decimal, ComputeError> {
    if denominator.is_zero() {
        return Err(ComputeError::ZeroDenominator { time });
    }
    numerator
        .checked_div(denominator)
        .ok_or(ComputeError::Overflow { time })
}

/// Compose a line series. Single-asset pairs copy the price through;
/// two-asset pairs give `from.price / to.price`.
pub fn compose_line(pairs: &[AlignedPair<'_, LinePoint>]) -> Result<Vec<LineData>, ComputeError> {
    pairs
        .iter()
        .map(|pair| {
            let value = match pair.to {
                None => pair.from.price,
                Some(to) => ratio(pair.from.price, to.price, pair.key)?,
            };
            Ok(LineData {
                time: pair.key,
                value,
            })
        })
        .collect()
}

/// Compose a candlestick series.
///
/// Each of open/high/low/close is divided independently, so the result is not
/// guaranteed to satisfy `low ≤ open, close ≤ high` (see [`CandleData::is_ordered`]).
pub fn compose_candles(
    pairs: &[AlignedPair<'_, CandlePoint>],
) -> Result<Vec<CandleData>, ComputeError> {
    pairs
        .iter()
        .map(|pair| {
            let from = pair.from;
            let time = pair.key;
            match pair.to {
                None => Ok(CandleData {
                    time,
                    open: from.open,
                    high: from.high,
                    low: from.low,
                    close: from.close,
                }),
                Some(to) => Ok(CandleData {
                    time,
                    open: ratio(from.open, to.open, time)?,
                    high: ratio(from.high, to.high, time)?,
                    low: ratio(from.low, to.low, time)?,
                    close: ratio(from.close, to.close, time)?,
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_history::align;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn candle(ms: i64, o: i64, h: i64, l: i64, c: i64) -> CandlePoint {
        CandlePoint {
            timestamp_ms: ms,
            open: Decimal::from(o),
            high: Decimal::from(h),
            low: Decimal::from(l),
            close: Decimal::from(c),
        }
    }

    fn line(points: &[(i64, &str)]) -> Vec<LinePoint> {
        points
            .iter()
            .map(|&(ms, p)| LinePoint {
                timestamp_ms: ms,
                price: dec(p),
            })
            .collect()
    }

    #[test]
    fn test_single_asset_line_is_unchanged() {
        let from = line(&[(0, "1.25"), (60_000, "0.000001"), (120_000, "31000.5")]);
        let series = compose_line(&align(&from, None).unwrap()).unwrap();
        assert_eq!(series.len(), from.len());
        for (point, raw) in series.iter().zip(&from) {
            assert_eq!(point.value, raw.price);
        }
    }

    #[test]
    fn test_two_asset_line_divides() {
        let from = line(&[(0, "300"), (60_000, "310")]);
        let to = line(&[(0, "1.5"), (60_000, "2")]);
        let series = compose_line(&align(&from, Some(&to)).unwrap()).unwrap();
        assert_eq!(series[0].value, dec("200"));
        assert_eq!(series[1].value, dec("155"));
        assert_eq!(series[1].time.as_secs(), 60);
    }

    #[test]
    fn test_line_ratio_is_exact_decimal() {
        let from = line(&[(0, "0.3")]);
        let to = line(&[(0, "0.1")]);
        let series = compose_line(&align(&from, Some(&to)).unwrap()).unwrap();
        assert_eq!(series[0].value, dec("3"));
    }

    #[test]
    fn test_candle_ratio() {
        let t = 1_617_235_200_000;
        let from = vec![candle(t, 10, 20, 5, 15)];
        let to = vec![candle(t, 2, 4, 1, 3)];
        let series = compose_candles(&align(&from, Some(&to)).unwrap()).unwrap();
        assert_eq!(
            series,
            vec![CandleData {
                time: BucketKey::from_floored_secs(1_617_235_200),
                open: dec("5"),
                high: dec("5"),
                low: dec("5"),
                close: dec("5"),
            }]
        );
    }

    #[test]
    fn test_candle_ratio_may_break_ohlc_order() {
        let from = vec![candle(0, 10, 12, 8, 11)];
        let to = vec![candle(0, 1, 6, 1, 1)];
        let series = compose_candles(&align(&from, Some(&to)).unwrap()).unwrap();
        assert_eq!(series[0].high, dec("2"));
        assert!(!series[0].is_ordered());
    }

    #[test]
    fn test_single_asset_candles_pass_through() {
        let from = vec![candle(0, 1, 4, 1, 3), candle(60_000, 3, 5, 2, 4)];
        let series = compose_candles(&align(&from, None).unwrap()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].close, dec("4"));
        assert!(series.iter().all(CandleData::is_ordered));
    }

    #[test]
    fn test_zero_denominator_is_an_error() {
        let from = line(&[(0, "1"), (60_000, "2")]);
        let to = line(&[(0, "1"), (60_000, "0")]);
        let err = compose_line(&align(&from, Some(&to)).unwrap()).unwrap_err();
        assert_eq!(
            err,
            ComputeError::ZeroDenominator {
                time: BucketKey::from_floored_secs(60),
            }
        );
    }

    #[test]
    fn test_zero_numerator_is_a_legitimate_zero() {
        let from = line(&[(0, "0")]);
        let to = line(&[(0, "4")]);
        let series = compose_line(&align(&from, Some(&to)).unwrap()).unwrap();
        assert!(series[0].value.is_zero());
    }

    #[test]
    fn test_candle_zero_low_is_an_error() {
        let from = vec![candle(0, 1, 1, 1, 1)];
        let to = vec![candle(0, 1, 1, 0, 1)];
        assert!(matches!(
            compose_candles(&align(&from, Some(&to)).unwrap()),
            Err(ComputeError::ZeroDenominator { .. })
        ));
    }
}
