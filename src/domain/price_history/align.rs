//! Series alignment — pairing two independently sampled feeds by bucket.

use super::Observation;
use crate::error::SeriesError;
use crate::shared::BucketKey;
use std::collections::HashMap;

/// One aligned observation pair. `to` is `None` in single-asset mode.
#[derive(Debug, PartialEq)]
pub struct AlignedPair<'a, T> {
    pub key: BucketKey,
    pub from: &'a T,
    pub to: Option<&'a T>,
}

impl<T> Clone for AlignedPair<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AlignedPair<'_, T> {}

/// Align a from-series with an optional to-series.
///
/// - `to == None`: every from-point passes through, keyed by its bucket.
/// - Equal lengths: points are paired by index, keyed by the from-point's bucket.
///   Timestamps are NOT compared; two feeds of equal length but different
///   phase produce mismatched pairs.
/// - Unequal lengths: inner join on bucket key, driven by the to-series so output
///   follows its order. A bucket is emitted at most once (first to-point wins);
///   when several from-points share a bucket, the last one is used.
///
/// Either side empty in two-asset mode yields an empty result. Input that is not
/// timestamp-ascending is rejected, never re-sorted.
pub fn align<'a, T: Observation>(
    from: &'a [T],
    to: Option<&'a [T]>,
) -> Result<Vec<AlignedPair<'a, T>>, SeriesError> {
    ensure_ascending(from)?;

    let Some(to) = to else {
        return Ok(from
            .iter()
            .map(|f| AlignedPair {
                key: f.bucket(),
                from: f,
                to: None,
            })
            .collect());
    };

    ensure_ascending(to)?;

    if from.is_empty() || to.is_empty() {
        return Ok(Vec::new());
    }

    if from.len() == to.len() {
        return Ok(from
            .iter()
            .zip(to)
            .map(|(f, t)| AlignedPair {
                key: f.bucket(),
                from: f,
                to: Some(t),
            })
            .collect());
    }

    let mut by_key: HashMap<BucketKey, &'a T> = HashMap::with_capacity(from.len());
    for f in from {
        by_key.insert(f.bucket(), f);
    }

    Ok(to
        .iter()
        .filter_map(|t| {
            let key = t.bucket();
            by_key.remove(&key).map(|f| AlignedPair {
                key,
                from: f,
                to: Some(t),
            })
        })
        .collect())
}

/// Reject a series whose timestamps go backwards.
pub fn ensure_ascending<T: Observation>(series: &[T]) -> Result<(), SeriesError> {
    for (index, pair) in series.windows(2).enumerate() {
        let previous_ms = pair[0].timestamp_ms();
        let timestamp_ms = pair[1].timestamp_ms();
        if timestamp_ms < previous_ms {
            return Err(SeriesError::Unordered {
                index: index + 1,
                previous_ms,
                timestamp_ms,
            });
        }
    }
    Ok(())
}
