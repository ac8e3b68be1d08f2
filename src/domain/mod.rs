//! Domain modules organized as vertical slices.
//!
//! - `asset` — descriptors, selectable pairs, upstream id resolution
//! - `selection` — time ranges and the pair/range/mode selection
//! - `price_history` — observations, bucketing, alignment, composition, summaries

pub mod asset;
pub mod price_history;
pub mod selection;
