//! HTTP layer — `PriceApiHttp` plus the bounded retry loop.

pub mod client;
pub mod retry;

pub use client::PriceApiHttp;
pub use retry::{with_retry, RetryConfig, RetryOn, RetryPolicy};
