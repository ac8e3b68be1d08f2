//! Human-readable formatting for headline chart values.

pub mod decimal;

pub use decimal::{percent, price};
