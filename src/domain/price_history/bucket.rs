//! Timestamp bucketing — the alignment tolerance between two feeds.

use crate::shared::BucketKey;

/// Something that can be floored onto the one-minute bucket grid.
pub trait ToBucket {
    fn to_bucket(&self) -> BucketKey;
}

/// Raw Unix milliseconds.
impl ToBucket for i64 {
    fn to_bucket(&self) -> BucketKey {
        let secs = self.div_euclid(1000);
        BucketKey::from_floored_secs(secs - secs.rem_euclid(BucketKey::WIDTH_SECS))
    }
}

/// A key is already on the grid.
impl ToBucket for BucketKey {
    fn to_bucket(&self) -> BucketKey {
        *self
    }
}

/// Floor a timestamp to whole seconds, then to the whole minute.
///
/// `bucket(1_617_235_259_999)` and `bucket(1_617_235_200_000)` both give
/// `1_617_235_200`. Bucketing an existing key returns it unchanged.
pub fn bucket<T: ToBucket>(t: T) -> BucketKey {
    t.to_bucket()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_floors_to_minute() {
        assert_eq!(bucket(1_617_235_200_000i64).as_secs(), 1_617_235_200);
        assert_eq!(bucket(1_617_235_259_999i64).as_secs(), 1_617_235_200);
        assert_eq!(bucket(1_617_235_260_000i64).as_secs(), 1_617_235_260);
    }

    #[test]
    fn test_bucket_drops_sub_second_precision() {
        assert_eq!(bucket(999i64).as_secs(), 0);
        assert_eq!(bucket(60_999i64).as_secs(), 60);
    }

    #[test]
    fn test_bucket_is_idempotent() {
        for t in [0i64, 1, 59_999, 60_000, 1_617_235_231_417, -1, -60_001, i64::MAX] {
            let once = bucket(t);
            assert_eq!(bucket(once), once, "t = {}", t);
            assert_eq!(once.as_secs() % 60, 0);
        }
    }

    #[test]
    fn test_bucket_negative_floors_downward() {
        assert_eq!(bucket(-1i64).as_secs(), -60);
        assert_eq!(bucket(-60_000i64).as_secs(), -60);
    }
}
