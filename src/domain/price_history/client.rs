//! Asset series fetcher — one asset's raw history with bounded retry.
//!
//! Failures never cross this boundary: after the retry budget is spent the
//! fetcher logs and returns an empty series, which callers read as "no data".

use super::{CandlePoint, LinePoint};
use crate::domain::selection::Window;
use crate::error::HttpError;
use crate::http::retry::{with_retry, RetryConfig, RetryPolicy};
use crate::shared::{CoinId, ContractAddress};
use async_trait::async_trait;

/// One upstream request per call; no retries, no fallbacks.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceSource {
    /// Line history for a contract over a window.
    async fn line_prices(
        &self,
        contract: &ContractAddress,
        currency: &str,
        window: Window,
    ) -> Result<Vec<LinePoint>, HttpError>;

    /// OHLC history for a coin over the last `days` days.
    async fn ohlc(
        &self,
        coin: &CoinId,
        currency: &str,
        days: u32,
    ) -> Result<Vec<CandlePoint>, HttpError>;
}

/// Wraps a [`PriceSource`] with the retry policy and the empty-on-failure contract.
#[derive(Debug, Clone)]
pub struct AssetSeriesFetcher<S> {
    source: S,
    retry: RetryConfig,
}

impl<S: PriceSource> AssetSeriesFetcher<S> {
    pub fn new(source: S, retry: RetryPolicy) -> Self {
        Self {
            source,
            retry: retry.config(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Line history, or empty when the upstream keeps failing.
    pub async fn fetch_line(
        &self,
        contract: &ContractAddress,
        currency: &str,
        window: Window,
    ) -> Vec<LinePoint> {
        let label = format!("line:{}", contract);
        let result = with_retry(&self.retry, &label, || {
            self.source.line_prices(contract, currency, window)
        })
        .await;
        Self::or_empty(result, &label)
    }

    /// OHLC history, or empty when the upstream keeps failing.
    pub async fn fetch_candles(&self, coin: &CoinId, currency: &str, days: u32) -> Vec<CandlePoint> {
        let label = format!("ohlc:{}", coin);
        let result = with_retry(&self.retry, &label, || self.source.ohlc(coin, currency, days)).await;
        Self::or_empty(result, &label)
    }

    fn or_empty<T>(result: Result<Vec<T>, HttpError>, label: &str) -> Vec<T> {
        match result {
            Ok(points) => {
                if points.is_empty() {
                    tracing::debug!(asset = label, "upstream returned no data");
                }
                points
            }
            Err(e) => {
                tracing::warn!(asset = label, error = %e, "Failed to fetch price data");
                Vec::new()
            }
        }
    }
}
