//! Wire types for the upstream price history endpoints.

use serde::Deserialize;
use serde_json::Number;

/// One raw tuple: `[timestamp_ms, price]` or `[timestamp_ms, open, high, low, close]`.
pub type PriceRow = Vec<Number>;

/// `GET {base}/contract/{address}/market_chart/range` response.
///
/// Only `prices` is consumed; market caps and volumes are ignored.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct MarketChartRangeResponse {
    #[serde(default)]
    pub prices: Option<Vec<PriceRow>>,
}

/// `GET {base}/{coin_id}/ohlc` response: a bare array of 5-tuples.
pub type OhlcResponse = Vec<PriceRow>;
