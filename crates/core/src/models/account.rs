use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::journal::Journal;
use super::settings::AccountSettings;

/// The main data container: a named trading account with its settings,
/// managed assets, and journals. Everything in here is what gets serialized
/// and saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub name: String,
    pub settings: AccountSettings,
    pub assets: Vec<Asset>,
    pub journals: Vec<Journal>,
}

impl Account {
    /// Create an empty account with default settings and no starter data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: AccountSettings::default(),
            assets: Vec::new(),
            journals: Vec::new(),
        }
    }

    /// Create an account seeded with the default starter data: a BTC asset
    /// and an empty trading journal plus an expense journal for fees.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: AccountSettings::default(),
            assets: vec![Asset::with_symbol("BTC", "Bitcoin", 8, 2, true, "₿")],
            journals: vec![Journal::trading("Trading"), Journal::expense("Misc fees")],
        }
    }

    /// Look up an asset by ticker. Returns `None` for an empty or unknown
    /// ticker.
    #[must_use]
    pub fn find_asset(&self, ticker: &str) -> Option<&Asset> {
        Asset::find(&self.assets, ticker)
    }

    /// Mutable access to a journal by index.
    pub fn journal_mut(&mut self, index: usize) -> Option<&mut Journal> {
        self.journals.get_mut(index)
    }
}
