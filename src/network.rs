//! Upstream URL constants and request defaults.

/// Default base for contract-address (line) price history.
///
/// The platform segment must match [`DEFAULT_PLATFORM`].
pub const DEFAULT_LINE_API_URL: &str = "https://api.coingecko.com/api/v3/coins/ethereum";

/// Default base for coin-id (candlestick) price history.
pub const DEFAULT_CANDLE_API_URL: &str = "https://api.coingecko.com/api/v3/coins";

/// Default asset platform used to look up contract addresses in the coin catalog.
pub const DEFAULT_PLATFORM: &str = "ethereum";

/// Quote currency every asset is priced in before the pair ratio is taken.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Native request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
