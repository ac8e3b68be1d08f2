//! Symbol → upstream identifier resolution.
//!
//! The line endpoint is keyed by contract address, the candlestick endpoint by
//! coin id. Both are resolved through an explicit [`ResolverSession`] handed to
//! each pipeline run.

use super::AssetDescriptor;
use crate::error::{ResolveError, SdkError};
use crate::network::DEFAULT_PLATFORM;
use crate::shared::{CoinId, ContractAddress};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static! {
    /// Native gas tokens have no contract; their price history lives under the
    /// wrapped token's address.
    static ref DEFAULT_WRAPPED: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("BNB", "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c");
        m.insert("AVAX", "0xB31f66AA3C1e785363F0875A1B74E27b85FD66c7");
        m
    };
}

// ─── CoinCatalog ─────────────────────────────────────────────────────────────

/// One entry of the upstream coin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinEntry {
    pub id: CoinId,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    /// Platform id → contract address. Empty or missing for native coins.
    #[serde(default)]
    pub platforms: HashMap<String, Option<String>>,
}

/// Coin list indexed by lowercase symbol. The first entry for a symbol wins.
#[derive(Debug, Clone, Default)]
pub struct CoinCatalog {
    entries: Vec<CoinEntry>,
    by_symbol: HashMap<String, usize>,
}

impl CoinCatalog {
    pub fn new(entries: Vec<CoinEntry>) -> Self {
        let mut by_symbol = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_symbol.entry(entry.symbol.to_lowercase()).or_insert(i);
        }
        Self { entries, by_symbol }
    }

    /// Parse the upstream `coins/list?include_platform=true` body.
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn find_by_symbol(&self, symbol: &str) -> Option<&CoinEntry> {
        self.by_symbol
            .get(&symbol.to_lowercase())
            .map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Maps an asset to the identifier each endpoint flavor expects.
pub trait AssetResolver {
    /// Contract address for the line endpoint.
    fn contract_address(&self, asset: &AssetDescriptor) -> Result<ContractAddress, ResolveError>;

    /// Coin id for the candlestick endpoint.
    fn coin_id(&self, asset: &AssetDescriptor) -> Result<CoinId, ResolveError>;
}

/// Per-network resolution context: platform, wrapped overrides, coin catalog.
#[derive(Debug, Clone)]
pub struct ResolverSession {
    pub platform: String,
    pub wrapped: HashMap<String, ContractAddress>,
    pub catalog: CoinCatalog,
}

impl Default for ResolverSession {
    fn default() -> Self {
        Self::new(DEFAULT_PLATFORM, CoinCatalog::default())
    }
}

impl ResolverSession {
    /// A session with the default wrapped-token overrides.
    pub fn new(platform: &str, catalog: CoinCatalog) -> Self {
        Self {
            platform: platform.to_string(),
            wrapped: Self::default_wrapped(),
            catalog,
        }
    }

    pub fn default_wrapped() -> HashMap<String, ContractAddress> {
        DEFAULT_WRAPPED
            .iter()
            .map(|(symbol, addr)| (symbol.to_string(), ContractAddress::new(addr)))
            .collect()
    }

    pub fn with_wrapped(mut self, symbol: &str, address: &str) -> Self {
        self.wrapped
            .insert(symbol.to_string(), ContractAddress::new(address));
        self
    }
}

impl AssetResolver for ResolverSession {
    /// Wrapped override, then the catalog's address on this platform, then the
    /// token list's own address.
    fn contract_address(&self, asset: &AssetDescriptor) -> Result<ContractAddress, ResolveError> {
        if let Some(addr) = self.wrapped.get(&asset.symbol) {
            return Ok(addr.clone());
        }

        let from_catalog = self
            .catalog
            .find_by_symbol(&asset.symbol)
            .and_then(|coin| coin.platforms.get(&self.platform))
            .and_then(|addr| addr.as_deref())
            .filter(|addr| !addr.is_empty())
            .map(ContractAddress::new);

        from_catalog
            .or_else(|| asset.address.clone())
            .ok_or_else(|| ResolveError::NoContractAddress {
                symbol: asset.symbol.clone(),
                platform: self.platform.clone(),
            })
    }

    fn coin_id(&self, asset: &AssetDescriptor) -> Result<CoinId, ResolveError> {
        self.catalog
            .find_by_symbol(&asset.symbol)
            .map(|coin| coin.id.clone())
            .ok_or_else(|| ResolveError::UnknownSymbol(asset.symbol.clone()))
    }
}
