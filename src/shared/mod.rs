//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the upstream API and the chart renderer use.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── BucketKey ───────────────────────────────────────────────────────────────

/// Minute-resolution alignment key, in whole Unix seconds.
///
/// Always a multiple of 60. Produced by [`crate::domain::price_history::bucket`];
/// used as the join key between two independently sampled series and as the
/// `time` of every derived chart point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey(i64);

impl BucketKey {
    /// Width of one bucket in seconds.
    pub const WIDTH_SECS: i64 = 60;

    pub(crate) fn from_floored_secs(secs: i64) -> Self {
        debug_assert_eq!(secs.rem_euclid(Self::WIDTH_SECS), 0);
        Self(secs)
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BucketKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for BucketKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = i64::deserialize(deserializer)?;
        if secs.rem_euclid(Self::WIDTH_SECS) != 0 {
            return Err(serde::de::Error::custom(format!(
                "bucket key {} is not minute-aligned",
                secs
            )));
        }
        Ok(BucketKey(secs))
    }
}

// ─── ViewMode ────────────────────────────────────────────────────────────────

/// Chart view mode, which also selects the upstream endpoint flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Time-range query, one price per timestamp.
    #[default]
    Line,
    /// Fixed-days query, open/high/low/close per timestamp.
    Candlestick,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Candlestick => "candlestick",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Upstream coin identifier (e.g. `"binancecoin"`), used by the candlestick endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ─── ContractAddress ─────────────────────────────────────────────────────────

/// A token contract address, normalized to lowercase.
///
/// The line endpoint is case-sensitive and expects lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContractAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContractAddress {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl Serialize for ContractAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContractAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ContractAddress::new(&s))
    }
}
