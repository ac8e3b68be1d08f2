//! Asset domain — descriptors, selectable pairs, upstream id resolution.

pub mod resolver;

pub use resolver::{AssetResolver, CoinCatalog, CoinEntry, ResolverSession};

use crate::shared::ContractAddress;
use serde::{Deserialize, Serialize};

/// One tradable asset as the swap widget knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub symbol: String,
    /// Contract address on the current network, if the token list has one.
    pub address: Option<ContractAddress>,
    #[serde(default)]
    pub logo_uri: Option<String>,
}

impl AssetDescriptor {
    pub fn new(symbol: &str, address: Option<&str>) -> Self {
        Self {
            symbol: symbol.to_string(),
            address: address.map(ContractAddress::new),
            logo_uri: None,
        }
    }

    pub fn with_logo(mut self, uri: &str) -> Self {
        self.logo_uri = Some(uri.to_string());
        self
    }
}

/// What the chart shows: `from` priced in `to`, or `from` alone in USD.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairSelection {
    /// Display name, `"ETH/USDC"` or `"ETH"`.
    pub name: String,
    pub from: AssetDescriptor,
    pub to: Option<AssetDescriptor>,
}

impl PairSelection {
    pub fn pair(from: AssetDescriptor, to: AssetDescriptor) -> Self {
        Self {
            name: format!("{}/{}", from.symbol, to.symbol),
            from,
            to: Some(to),
        }
    }

    pub fn single(asset: AssetDescriptor) -> Self {
        Self {
            name: asset.symbol.clone(),
            from: asset,
            to: None,
        }
    }

    /// Whether a second asset is involved (pair price rather than USD price).
    pub fn is_pair(&self) -> bool {
        self.to.is_some()
    }

    /// The four selectable entries for a swap between `a` and `b`:
    /// `a/b`, `b/a`, `a`, `b`. The first is the default after a swap change.
    pub fn candidates(a: &AssetDescriptor, b: &AssetDescriptor) -> Vec<PairSelection> {
        vec![
            PairSelection::pair(a.clone(), b.clone()),
            PairSelection::pair(b.clone(), a.clone()),
            PairSelection::single(a.clone()),
            PairSelection::single(b.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates() {
        let eth = AssetDescriptor::new("ETH", None);
        let usdc = AssetDescriptor::new("USDC", Some("0xA0b8"));
        let list = PairSelection::candidates(&eth, &usdc);
        let names: Vec<_> = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["ETH/USDC", "USDC/ETH", "ETH", "USDC"]);
        assert!(list[0].is_pair());
        assert!(!list[3].is_pair());
        assert_eq!(list[1].from.address.as_ref().unwrap().as_str(), "0xa0b8");
    }
}
