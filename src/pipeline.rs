//! Pipeline orchestrator — `ChartPipeline`, the one entry point the UI calls.
//!
//! Each call to [`ChartPipeline::select`] is one run:
//! `Idle → Fetching → Aligning → Composing → Ready` (or `Failed`).
//! Runs are numbered; starting a new run supersedes every older one, and a
//! superseded run's results are dropped even if its fetches finish last.

use crate::domain::asset::{AssetResolver, AssetDescriptor, PairSelection, ResolverSession};
use crate::domain::price_history::client::{AssetSeriesFetcher, PriceSource};
use crate::domain::price_history::{
    align, compose_candles, compose_line, summarize, AlignedPair, ChartSeries, ChartSnapshot,
    ChartState, ChartView, Observation, PipelineState, SeriesSummary,
};
use crate::domain::selection::Selection;
use crate::error::{ComputeError, SdkError};
use crate::http::{PriceApiHttp, RetryPolicy};
use crate::network::{
    DEFAULT_CANDLE_API_URL, DEFAULT_CURRENCY, DEFAULT_LINE_API_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::shared::ViewMode;

use async_lock::RwLock;
use chrono::Utc;
use futures_util::future::join;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Completed(Arc<ChartSnapshot>),
    /// Two-asset selection and neither asset had data.
    Failed,
    /// A newer selection started before this run finished.
    Superseded,
}

/// Coordinates fetch → align → compose → summarize for the current selection.
pub struct ChartPipeline<S = PriceApiHttp> {
    fetcher: Arc<AssetSeriesFetcher<S>>,
    currency: String,
    state: Arc<RwLock<ChartState>>,
    generation: Arc<AtomicU64>,
}

impl ChartPipeline<PriceApiHttp> {
    pub fn builder() -> ChartPipelineBuilder {
        ChartPipelineBuilder::default()
    }
}

impl<S: PriceSource> ChartPipeline<S> {
    /// A pipeline over any price source.
    pub fn with_source(source: S, retry: RetryPolicy, currency: &str) -> Self {
        Self {
            fetcher: Arc::new(AssetSeriesFetcher::new(source, retry)),
            currency: currency.to_string(),
            state: Arc::new(RwLock::new(ChartState::new())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn fetcher(&self) -> &AssetSeriesFetcher<S> {
        &self.fetcher
    }

    /// A copy of the current state.
    pub async fn state(&self) -> ChartState {
        self.state.read().await.clone()
    }

    pub async fn view(&self) -> ChartView {
        self.state.read().await.view()
    }

    pub async fn current_selection(&self) -> Option<Selection> {
        self.state.read().await.selection().cloned()
    }

    /// Forget the current selection and result. Runs in flight are superseded.
    pub async fn clear(&self) {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if self.state.write().await.clear(ticket) {
            tracing::debug!(ticket, "chart pipeline cleared");
        }
    }

    /// The swap widget's tokens changed: chart `a/b` in the current mode.
    pub async fn swap_changed(
        &self,
        session: &ResolverSession,
        a: &AssetDescriptor,
        b: &AssetDescriptor,
    ) -> PipelineOutcome {
        let mode = self
            .current_selection()
            .await
            .map(|s| s.mode)
            .unwrap_or_default();
        let pair = PairSelection::candidates(a, b).swap_remove(0);
        self.select(session, Selection::new(pair, mode)).await
    }

    /// Run the pipeline for `selection`, superseding any run in flight.
    pub async fn select(&self, session: &ResolverSession, selection: Selection) -> PipelineOutcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.state.write().await.begin(ticket, selection.clone()) {
            return PipelineOutcome::Superseded;
        }
        tracing::debug!(
            ticket,
            pair = %selection.pair.name,
            mode = %selection.mode,
            range = %selection.range.name,
            "chart pipeline started"
        );

        match selection.mode {
            ViewMode::Line => self.run_line(ticket, session, selection).await,
            ViewMode::Candlestick => self.run_candles(ticket, session, selection).await,
        }
    }

    async fn run_line(
        &self,
        ticket: u64,
        session: &ResolverSession,
        selection: Selection,
    ) -> PipelineOutcome {
        let window = selection.range.window(Utc::now());
        let from_addr = resolved(session.contract_address(&selection.pair.from));
        let to_addr = selection
            .pair
            .to
            .as_ref()
            .map(|to| resolved(session.contract_address(to)));

        let fetch_from = async {
            match &from_addr {
                Some(addr) => self.fetcher.fetch_line(addr, &self.currency, window).await,
                None => Vec::new(),
            }
        };
        let fetch_to = async {
            match &to_addr {
                Some(Some(addr)) => Some(self.fetcher.fetch_line(addr, &self.currency, window).await),
                Some(None) => Some(Vec::new()),
                None => None,
            }
        };
        let (from, to) = join(fetch_from, fetch_to).await;

        self.finish(ticket, selection, from, to, compose_line, ChartSeries::Line)
            .await
    }

    async fn run_candles(
        &self,
        ticket: u64,
        session: &ResolverSession,
        selection: Selection,
    ) -> PipelineOutcome {
        let days = selection.range.day_count();
        let from_coin = resolved(session.coin_id(&selection.pair.from));
        let to_coin = selection
            .pair
            .to
            .as_ref()
            .map(|to| resolved(session.coin_id(to)));

        let fetch_from = async {
            match &from_coin {
                Some(coin) => self.fetcher.fetch_candles(coin, &self.currency, days).await,
                None => Vec::new(),
            }
        };
        let fetch_to = async {
            match &to_coin {
                Some(Some(coin)) => Some(self.fetcher.fetch_candles(coin, &self.currency, days).await),
                Some(None) => Some(Vec::new()),
                None => None,
            }
        };
        let (from, to) = join(fetch_from, fetch_to).await;

        self.finish(ticket, selection, from, to, compose_candles, ChartSeries::Candle)
            .await
    }

    /// Align, compose and publish, checking the ticket at every step.
    async fn finish<T, D>(
        &self,
        ticket: u64,
        selection: Selection,
        from: Vec<T>,
        to: Option<Vec<T>>,
        compose: fn(&[AlignedPair<'_, T>]) -> Result<Vec<D>, ComputeError>,
        wrap: fn(Vec<D>) -> ChartSeries,
    ) -> PipelineOutcome
    where
        T: Observation,
    {
        if let Some(to) = &to {
            if from.is_empty() && to.is_empty() {
                return if self.state.write().await.fail(ticket) {
                    tracing::warn!(ticket, pair = %selection.pair.name, "no data for either asset");
                    PipelineOutcome::Failed
                } else {
                    self.superseded(ticket)
                };
            }
        }

        if !self.advance(ticket, PipelineState::Aligning).await {
            return self.superseded(ticket);
        }
        let pairs = align(&from, to.as_deref()).unwrap_or_else(|e| {
            tracing::warn!(ticket, error = %e, "upstream series rejected");
            Vec::new()
        });

        if !self.advance(ticket, PipelineState::Composing).await {
            return self.superseded(ticket);
        }
        let label = selection.range.label.as_str();
        let (series, summary) = match compose(&pairs) {
            Ok(points) => {
                let series = wrap(points);
                let summary = summarize(&series, label);
                (series, summary)
            }
            Err(e) => {
                tracing::warn!(ticket, error = %e, "pair price is undefined");
                (
                    ChartSeries::empty(selection.mode),
                    SeriesSummary::degenerate(e, label),
                )
            }
        };

        let snapshot = Arc::new(ChartSnapshot {
            selection,
            series,
            summary,
        });
        if self.state.write().await.complete(ticket, snapshot.clone()) {
            tracing::debug!(ticket, points = snapshot.series.len(), "chart pipeline ready");
            PipelineOutcome::Completed(snapshot)
        } else {
            self.superseded(ticket)
        }
    }

    async fn advance(&self, ticket: u64, phase: PipelineState) -> bool {
        self.state.write().await.advance(ticket, phase)
    }

    fn superseded(&self, ticket: u64) -> PipelineOutcome {
        tracing::debug!(
            ticket,
            current = self.generation.load(Ordering::SeqCst),
            "discarding superseded chart run"
        );
        PipelineOutcome::Superseded
    }
}

/// Log and drop an unresolved asset; its fetch is skipped.
fn resolved<T>(result: Result<T, crate::error::ResolveError>) -> Option<T> {
    result
        .map_err(|e| tracing::warn!(error = %e, "asset not resolved, skipping fetch"))
        .ok()
}

impl<S> Clone for ChartPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            currency: self.currency.clone(),
            state: self.state.clone(),
            generation: self.generation.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ChartPipelineBuilder {
    line_base_url: String,
    candle_base_url: String,
    currency: String,
    retry: RetryPolicy,
    timeout_secs: u64,
}

impl Default for ChartPipelineBuilder {
    fn default() -> Self {
        Self {
            line_base_url: DEFAULT_LINE_API_URL.to_string(),
            candle_base_url: DEFAULT_CANDLE_API_URL.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            retry: RetryPolicy::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ChartPipelineBuilder {
    pub fn line_base_url(mut self, url: &str) -> Self {
        self.line_base_url = url.to_string();
        self
    }

    pub fn candle_base_url(mut self, url: &str) -> Self {
        self.candle_base_url = url.to_string();
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_lowercase();
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<ChartPipeline<PriceApiHttp>, SdkError> {
        if self.currency.is_empty() {
            return Err(SdkError::Other("currency must not be empty".to_string()));
        }
        for url in [&self.line_base_url, &self.candle_base_url] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(SdkError::Other(format!("invalid base URL: {}", url)));
            }
        }
        let http = PriceApiHttp::with_timeout(
            &self.line_base_url,
            &self.candle_base_url,
            self.timeout_secs,
        );
        Ok(ChartPipeline::with_source(http, self.retry, &self.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = ChartPipelineBuilder::default();
        assert_eq!(builder.currency, "usd");
        assert_eq!(builder.line_base_url, DEFAULT_LINE_API_URL);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = ChartPipeline::builder().candle_base_url("ftp://nope").build();
        assert!(matches!(result, Err(SdkError::Other(_))));
    }

    #[test]
    fn test_builder_rejects_empty_currency() {
        assert!(ChartPipeline::builder().currency("").build().is_err());
    }

    #[tokio::test]
    async fn test_new_pipeline_is_idle() {
        let pipeline = ChartPipeline::builder().build().unwrap();
        assert_eq!(pipeline.view().await, ChartView::Idle);
        assert!(pipeline.current_selection().await.is_none());
    }
}
