use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// User-facing classification of a transaction, encoded in storage by the
/// signs of `baseAmount` and `quoteAmount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Base in, quote out: baseAmount > 0, quoteAmount < 0.
    Buy,
    /// Base out, quote in: baseAmount < 0, quoteAmount > 0.
    Sell,
    /// Both sides non-negative.
    Income,
    /// Both sides non-positive.
    Expense,
}

impl TransactionType {
    /// Classify a stored signed amount pair.
    ///
    /// First match wins:
    ///
    /// | baseAmount | quoteAmount | type |
    /// |---|---|---|
    /// | > 0 | < 0 | buy |
    /// | < 0 | > 0 | sell |
    /// | > 0 | ≥ 0 | income |
    /// | < 0 | ≤ 0 | expense |
    ///
    /// A zero base amount matches no row; the caller-supplied `fallback`
    /// resolves the ambiguity (a deliberate default, not an error).
    #[must_use]
    pub fn classify(
        base_amount: Decimal,
        quote_amount: Decimal,
        fallback: TransactionType,
    ) -> TransactionType {
        if base_amount > Decimal::ZERO && quote_amount < Decimal::ZERO {
            TransactionType::Buy
        } else if base_amount < Decimal::ZERO && quote_amount > Decimal::ZERO {
            TransactionType::Sell
        } else if base_amount > Decimal::ZERO {
            TransactionType::Income
        } else if base_amount < Decimal::ZERO {
            TransactionType::Expense
        } else {
            fallback
        }
    }

    /// Assign storage signs to non-negative magnitudes.
    ///
    /// Inverse of [`TransactionType::classify`]: for nonzero magnitudes,
    /// classifying the result recovers `self` regardless of fallback.
    #[must_use]
    pub fn signed_amounts(
        self,
        base_magnitude: Decimal,
        quote_magnitude: Decimal,
    ) -> (Decimal, Decimal) {
        match self {
            TransactionType::Buy => (base_magnitude, -quote_magnitude),
            TransactionType::Sell => (-base_magnitude, quote_magnitude),
            TransactionType::Income => (base_magnitude, quote_magnitude),
            TransactionType::Expense => (-base_magnitude, -quote_magnitude),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Buy => write!(f, "buy"),
            TransactionType::Sell => write!(f, "sell"),
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// Which side of a transaction the (single) fee is charged in. A user
/// choice, independent of the transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeCurrency {
    Base,
    Quote,
}

impl std::fmt::Display for FeeCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeeCurrency::Base => write!(f, "base"),
            FeeCurrency::Quote => write!(f, "quote"),
        }
    }
}

/// A value stored in a user-defined extra column.
///
/// Serialized untagged, mirroring the original string/number/boolean union.
/// Variant order matters for deserialization: booleans and integers are
/// tried before decimals, decimals before free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    Text(String),
}

/// A transaction (trade, income or expense).
///
/// **Sign invariant**: the pair (sign(baseAmount), sign(quoteAmount))
/// encodes the transaction's type — see [`TransactionType::classify`].
/// A buy of 1 BTC at 50000 USD is stored as baseAmount +1, quoteAmount
/// −50000.
///
/// **Fee convention**: at most one of `fee_base`/`fee_quote` is nonzero;
/// both are always non-negative.
///
/// Transactions are owned by their journal's transaction list and addressed
/// positionally within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Date of the transaction, e.g. "2021-01-01" or "2021-01-01T09:30"
    /// depending on the journal's date column format.
    pub date: String,

    /// Ticker of the base asset.
    pub base: String,

    /// Signed amount of base changed.
    pub base_amount: Decimal,

    /// Ticker of the quote asset.
    pub quote: String,

    /// Signed amount of quote changed, i.e. the total.
    pub quote_amount: Decimal,

    /// Fee in the base asset.
    pub fee_base: Decimal,

    /// Fee in the quote asset.
    pub fee_quote: Decimal,

    /// User-written notes.
    pub notes: String,

    /// Values of extra columns, keyed by extra column index.
    #[serde(default)]
    pub extra: BTreeMap<usize, ExtraValue>,
}

impl Transaction {
    /// Create a transaction with no fees, notes, or extra values.
    pub fn new(
        date: impl Into<String>,
        base: impl Into<String>,
        base_amount: Decimal,
        quote: impl Into<String>,
        quote_amount: Decimal,
    ) -> Self {
        Self {
            date: date.into(),
            base: base.into(),
            base_amount,
            quote: quote.into(),
            quote_amount,
            fee_base: Decimal::ZERO,
            fee_quote: Decimal::ZERO,
            notes: String::new(),
            extra: BTreeMap::new(),
        }
    }

    /// The type this transaction's stored signs encode.
    #[must_use]
    pub fn transaction_type(&self, fallback: TransactionType) -> TransactionType {
        TransactionType::classify(self.base_amount, self.quote_amount, fallback)
    }
}
