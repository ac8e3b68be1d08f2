//! Low-level HTTP client — `PriceApiHttp`.
//!
//! One method per upstream endpoint, one request per call. Retry lives in
//! [`AssetSeriesFetcher`](crate::domain::price_history::client::AssetSeriesFetcher).

use crate::domain::price_history::client::PriceSource;
use crate::domain::price_history::convert;
use crate::domain::price_history::wire::{MarketChartRangeResponse, OhlcResponse};
use crate::domain::price_history::{CandlePoint, LinePoint};
use crate::domain::selection::Window;
use crate::error::HttpError;
use crate::network::{DEFAULT_CANDLE_API_URL, DEFAULT_LINE_API_URL};
use crate::shared::{CoinId, ContractAddress};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// HTTP client for the upstream price history API.
#[derive(Debug, Clone)]
pub struct PriceApiHttp {
    line_base_url: String,
    candle_base_url: String,
    client: Client,
}

impl Default for PriceApiHttp {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_API_URL, DEFAULT_CANDLE_API_URL)
    }
}

impl PriceApiHttp {
    pub fn new(line_base_url: &str, candle_base_url: &str) -> Self {
        Self::with_client(line_base_url, candle_base_url, Self::build_client(None))
    }

    /// Native request timeout. Ignored on WASM, where the browser owns timeouts.
    pub fn with_timeout(line_base_url: &str, candle_base_url: &str, timeout_secs: u64) -> Self {
        Self::with_client(
            line_base_url,
            candle_base_url,
            Self::build_client(Some(timeout_secs)),
        )
    }

    pub fn with_client(line_base_url: &str, candle_base_url: &str, client: Client) -> Self {
        Self {
            line_base_url: line_base_url.trim_end_matches('/').to_string(),
            candle_base_url: candle_base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    #[allow(unused_variables, unused_mut)]
    fn build_client(timeout_secs: Option<u64>) -> Client {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(
                    timeout_secs.unwrap_or(crate::network::DEFAULT_TIMEOUT_SECS),
                ))
                .pool_max_idle_per_host(4);
        }
        builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "HTTP client builder failed, using defaults");
            Client::new()
        })
    }

    // ── URLs ─────────────────────────────────────────────────────────────

    pub fn line_url(&self, contract: &ContractAddress, currency: &str, window: Window) -> String {
        format!(
            "{}/contract/{}/market_chart/range?vs_currency={}&from={}&to={}",
            self.line_base_url,
            contract.as_str(),
            urlencoding::encode(currency),
            window.from_secs,
            window.to_secs
        )
    }

    pub fn ohlc_url(&self, coin: &CoinId, currency: &str, days: u32) -> String {
        format!(
            "{}/{}/ohlc?vs_currency={}&days={}",
            self.candle_base_url,
            urlencoding::encode(coin.as_str()),
            urlencoding::encode(currency),
            days
        )
    }

    // ── Endpoints ────────────────────────────────────────────────────────

    pub async fn get_market_chart_range(
        &self,
        contract: &ContractAddress,
        currency: &str,
        window: Window,
    ) -> Result<MarketChartRangeResponse, HttpError> {
        self.get(&self.line_url(contract, currency, window)).await
    }

    pub async fn get_ohlc(
        &self,
        coin: &CoinId,
        currency: &str,
        days: u32,
    ) -> Result<OhlcResponse, HttpError> {
        self.get(&self.ohlc_url(coin, currency, days)).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await.map_err(transport_error)?;
        let status = resp.status();

        if status.is_success() {
            let body = resp.text().await.map_err(transport_error)?;
            return serde_json::from_str::<T>(&body)
                .map_err(|e| HttpError::MalformedBody(e.to_string()));
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

/// Timeouts get their own variant; everything else stays a transport error.
fn transport_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceSource for PriceApiHttp {
    async fn line_prices(
        &self,
        contract: &ContractAddress,
        currency: &str,
        window: Window,
    ) -> Result<Vec<LinePoint>, HttpError> {
        let resp = self.get_market_chart_range(contract, currency, window).await?;
        Ok(convert::line_points(&resp)?)
    }

    async fn ohlc(
        &self,
        coin: &CoinId,
        currency: &str,
        days: u32,
    ) -> Result<Vec<CandlePoint>, HttpError> {
        let rows = self.get_ohlc(coin, currency, days).await?;
        Ok(convert::candle_points(&rows)?)
    }
}
