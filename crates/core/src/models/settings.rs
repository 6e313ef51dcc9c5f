use serde::{Deserialize, Serialize};

use super::asset::Asset;

/// Account-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    /// The accounting currency of the account — offered as the default
    /// quote currency when entering transactions.
    pub accounting_currency: Asset,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            accounting_currency: Asset::with_symbol(
                "USD",
                "United States Dollar",
                2,
                4,
                true,
                "$",
            ),
        }
    }
}
