//! # pair-chart
//!
//! Pair-price chart pipeline for a token-swap dashboard: fetch two assets'
//! price histories, align them on a one-minute grid, divide them into a pair
//! price, and summarize the result. Supports both native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Newtypes, observations, bucketing, alignment, composition, summaries (always available, WASM-safe)
//! 2. **HTTP API** — `PriceApiHttp` with bounded retry
//! 3. **Pipeline** — `ChartPipeline`, the orchestrator the UI calls on every selection change
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pair_chart::prelude::*;
//!
//! let pipeline = ChartPipeline::builder()
//!     .line_base_url("https://api.coingecko.com/api/v3/coins/binance-smart-chain")
//!     .build()?;
//! let session = ResolverSession::new("binance-smart-chain", catalog);
//!
//! let bnb = AssetDescriptor::new("BNB", None);
//! let usdc = AssetDescriptor::new("USDC", Some("0x8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d"));
//! let outcome = pipeline.swap_changed(&session, &bnb, &usdc).await;
//!
//! if let ChartView::Ready(snapshot) = pipeline.view().await {
//!     println!("{:?}", snapshot.summary.display_price());
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Upstream URL and default constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: Pipeline ────────────────────────────────────────────────────────

/// `ChartPipeline` — the primary entry point.
#[cfg(feature = "http")]
pub mod pipeline;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{BucketKey, CoinId, ContractAddress, ViewMode};

    // Domain types — assets
    pub use crate::domain::asset::resolver::{AssetResolver, CoinCatalog, CoinEntry, ResolverSession};
    pub use crate::domain::asset::{AssetDescriptor, PairSelection};

    // Domain types — selection
    pub use crate::domain::selection::{Selection, TimeRange, Window};

    // Domain types — price history
    pub use crate::domain::price_history::{
        CandleData, CandlePoint, ChartSeries, LineData, LinePoint, Observation, SeriesSummary,
        SummaryStatus,
    };

    // State containers
    pub use crate::domain::price_history::{ChartSnapshot, ChartState, ChartView, PipelineState};

    // Errors
    pub use crate::error::{ComputeError, HttpError, ResolveError, SdkError, SeriesError};

    // Network
    pub use crate::network::{DEFAULT_CANDLE_API_URL, DEFAULT_LINE_API_URL};

    // HTTP client + pipeline
    #[cfg(feature = "http")]
    pub use crate::domain::price_history::client::{AssetSeriesFetcher, PriceSource};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
    #[cfg(feature = "http")]
    pub use crate::http::PriceApiHttp;
    #[cfg(feature = "http")]
    pub use crate::pipeline::{ChartPipeline, ChartPipelineBuilder, PipelineOutcome};
}
