use serde::{Deserialize, Serialize};

/// A currency or tradeable asset managed by an account.
///
/// **Identity**: `ticker` is the unique identifier of an asset within an
/// account (e.g. "BTC"). Tickers are compared exactly — no case folding —
/// because precision override maps on journal columns are keyed by these
/// strings.
///
/// Assets are immutable once created; edits replace the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Ticker of the asset, e.g. "BTC". Unique within the account.
    pub ticker: String,

    /// Human-readable name, e.g. "Bitcoin".
    pub name: String,

    /// Number of fractional digits used to record amounts of this asset.
    pub precision: u32,

    /// Number of fractional digits used to show prices quoted in this asset.
    pub price_precision: u32,

    /// true if the asset is a currency.
    pub is_currency: bool,

    /// Optional display symbol, e.g. "₿".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Asset {
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        precision: u32,
        price_precision: u32,
        is_currency: bool,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            precision,
            price_precision,
            is_currency,
            symbol: None,
        }
    }

    /// Create an asset with a display symbol attached.
    pub fn with_symbol(
        ticker: impl Into<String>,
        name: impl Into<String>,
        precision: u32,
        price_precision: u32,
        is_currency: bool,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            precision,
            price_precision,
            is_currency,
            symbol: Some(symbol.into()),
        }
    }

    /// Look up an asset by ticker in a slice of assets.
    ///
    /// Returns `None` for an empty or unknown ticker; callers treat the
    /// absence as "precision unknown" rather than an error.
    #[must_use]
    pub fn find<'a>(assets: &'a [Asset], ticker: &str) -> Option<&'a Asset> {
        assets.iter().find(|a| a.ticker == ticker)
    }
}
