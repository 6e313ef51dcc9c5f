use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::column::{
    AssetColumn, ColumnRef, DateColumn, DateTimeFormat, DecimalColumn,
    DecimalColumnDescription, ExtraColumn, TextColumn,
};
use super::transaction::{Transaction, TransactionType};

/// Type of journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalType {
    /// Trades between two assets (buys and sells).
    Trading,
    /// Incoming amounts (salary, interest, airdrops).
    Income,
    /// Outgoing amounts (fees, purchases).
    Expense,
}

impl JournalType {
    /// The transaction type a journal of this type defaults to — used as
    /// the classification fallback when a stored transaction's signs are
    /// ambiguous (both amounts zero).
    #[must_use]
    pub fn default_transaction_type(self) -> TransactionType {
        match self {
            JournalType::Trading => TransactionType::Buy,
            JournalType::Income => TransactionType::Income,
            JournalType::Expense => TransactionType::Expense,
        }
    }
}

impl std::fmt::Display for JournalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JournalType::Trading => write!(f, "trading"),
            JournalType::Income => write!(f, "income"),
            JournalType::Expense => write!(f, "expense"),
        }
    }
}

/// One of the nine fixed semantic column roles every journal has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedColumnRole {
    Date,
    Base,
    BaseAmount,
    Quote,
    QuoteAmount,
    Price,
    FeeBase,
    FeeQuote,
    Notes,
}

impl FixedColumnRole {
    /// All nine fixed roles, in default display order.
    pub const ALL: [FixedColumnRole; 9] = [
        FixedColumnRole::Date,
        FixedColumnRole::Base,
        FixedColumnRole::BaseAmount,
        FixedColumnRole::Quote,
        FixedColumnRole::QuoteAmount,
        FixedColumnRole::Price,
        FixedColumnRole::FeeBase,
        FixedColumnRole::FeeQuote,
        FixedColumnRole::Notes,
    ];

    /// The persisted tag of this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FixedColumnRole::Date => "date",
            FixedColumnRole::Base => "base",
            FixedColumnRole::BaseAmount => "baseAmount",
            FixedColumnRole::Quote => "quote",
            FixedColumnRole::QuoteAmount => "quoteAmount",
            FixedColumnRole::Price => "price",
            FixedColumnRole::FeeBase => "feeBase",
            FixedColumnRole::FeeQuote => "feeQuote",
            FixedColumnRole::Notes => "notes",
        }
    }

    /// Strict parse of a persisted tag. Wrong case and near-miss strings
    /// are rejected.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == tag)
    }

    /// Human-readable label for the role.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            FixedColumnRole::Date => "Date",
            FixedColumnRole::Base => "Base",
            FixedColumnRole::BaseAmount => "Base amount",
            FixedColumnRole::Quote => "Quote",
            FixedColumnRole::QuoteAmount => "Quote amount",
            FixedColumnRole::Price => "Price",
            FixedColumnRole::FeeBase => "Base fee",
            FixedColumnRole::FeeQuote => "Quote fee",
            FixedColumnRole::Notes => "Notes",
        }
    }
}

impl std::fmt::Display for FixedColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference to a column of a journal: one of the nine fixed roles, or an
/// index into the journal's user-defined extra columns.
///
/// The two addressing schemes are explicit variants, so consumers branch
/// with a `match` instead of inspecting the runtime type of a value.
/// Persisted as the original representation: fixed roles as their camelCase
/// string tag, extra roles as a non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JournalColumnRole {
    Fixed(FixedColumnRole),
    Extra(usize),
}

impl JournalColumnRole {
    /// Human-readable label: the fixed role's label, or `Extra (n)` with a
    /// 1-based position for extra roles.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            JournalColumnRole::Fixed(role) => role.display_name().to_string(),
            JournalColumnRole::Extra(index) => format!("Extra ({})", index + 1),
        }
    }
}

impl std::fmt::Display for JournalColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JournalColumnRole::Fixed(role) => write!(f, "{}", role.as_str()),
            JournalColumnRole::Extra(index) => write!(f, "{index}"),
        }
    }
}

impl From<FixedColumnRole> for JournalColumnRole {
    fn from(role: FixedColumnRole) -> Self {
        JournalColumnRole::Fixed(role)
    }
}

impl Serialize for JournalColumnRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JournalColumnRole::Fixed(role) => serializer.serialize_str(role.as_str()),
            JournalColumnRole::Extra(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

impl<'de> Deserialize<'de> for JournalColumnRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RoleVisitor;

        impl de::Visitor<'_> for RoleVisitor {
            type Value = JournalColumnRole;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a fixed column role tag or a non-negative extra column index")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                FixedColumnRole::parse(v)
                    .map(JournalColumnRole::Fixed)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(JournalColumnRole::Extra(v as usize))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                usize::try_from(v)
                    .map(JournalColumnRole::Extra)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }

        deserializer.deserialize_any(RoleVisitor)
    }
}

/// The columns of a journal: nine fixed roles plus any number of extra
/// columns.
///
/// The fixed roles are struct fields with concrete column types, so "the
/// nine fixed roles always exist and never change variant" holds by
/// construction. Only `extra`, `hide`/`name` flags, and precision overrides
/// are user-mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalColumnSet {
    pub date: DateColumn,
    pub base: AssetColumn,
    pub base_amount: DecimalColumn,
    pub quote: AssetColumn,
    pub quote_amount: DecimalColumn,
    pub price: DecimalColumn,
    pub fee_base: DecimalColumn,
    pub fee_quote: DecimalColumn,
    pub notes: TextColumn,
    #[serde(default)]
    pub extra: Vec<ExtraColumn>,
}

impl JournalColumnSet {
    /// Column set for a trading journal: everything visible except the
    /// quote asset and the base-side fee.
    #[must_use]
    pub fn trading(format: DateTimeFormat) -> Self {
        Self {
            date: DateColumn::new("Date", format),
            base: AssetColumn::new("Asset"),
            base_amount: DecimalColumn::new("Amount", DecimalColumnDescription::Base),
            quote: AssetColumn { name: "Quote".into(), hide: true },
            quote_amount: DecimalColumn::new("Total", DecimalColumnDescription::Quote),
            price: DecimalColumn::new("Price", DecimalColumnDescription::Price),
            fee_base: DecimalColumn::new("Fee (Base)", DecimalColumnDescription::Base).hidden(),
            fee_quote: DecimalColumn::new("Fee", DecimalColumnDescription::Quote),
            notes: TextColumn::new("Notes"),
            extra: Vec::new(),
        }
    }

    /// Column set for an income journal: like trading, with the quote-side
    /// fee also hidden.
    #[must_use]
    pub fn income(format: DateTimeFormat) -> Self {
        let mut columns = Self::trading(format);
        columns.fee_quote.hide = true;
        columns
    }

    /// Column set for an expense journal.
    #[must_use]
    pub fn expense(format: DateTimeFormat) -> Self {
        Self::income(format)
    }

    /// Look up the column addressed by `role`.
    ///
    /// Returns `None` only for an out-of-range extra index; fixed roles are
    /// total at the type level.
    #[must_use]
    pub fn column(&self, role: JournalColumnRole) -> Option<ColumnRef<'_>> {
        match role {
            JournalColumnRole::Fixed(FixedColumnRole::Date) => Some(ColumnRef::Date(&self.date)),
            JournalColumnRole::Fixed(FixedColumnRole::Base) => Some(ColumnRef::Asset(&self.base)),
            JournalColumnRole::Fixed(FixedColumnRole::BaseAmount) => {
                Some(ColumnRef::Decimal(&self.base_amount))
            }
            JournalColumnRole::Fixed(FixedColumnRole::Quote) => Some(ColumnRef::Asset(&self.quote)),
            JournalColumnRole::Fixed(FixedColumnRole::QuoteAmount) => {
                Some(ColumnRef::Decimal(&self.quote_amount))
            }
            JournalColumnRole::Fixed(FixedColumnRole::Price) => {
                Some(ColumnRef::Decimal(&self.price))
            }
            JournalColumnRole::Fixed(FixedColumnRole::FeeBase) => {
                Some(ColumnRef::Decimal(&self.fee_base))
            }
            JournalColumnRole::Fixed(FixedColumnRole::FeeQuote) => {
                Some(ColumnRef::Decimal(&self.fee_quote))
            }
            JournalColumnRole::Fixed(FixedColumnRole::Notes) => Some(ColumnRef::Text(&self.notes)),
            JournalColumnRole::Extra(index) => self.extra.get(index).map(ExtraColumn::as_ref),
        }
    }

    /// Every role that currently addresses a column: the nine fixed roles
    /// followed by one extra role per extra column.
    #[must_use]
    pub fn roles(&self) -> Vec<JournalColumnRole> {
        FixedColumnRole::ALL
            .into_iter()
            .map(JournalColumnRole::Fixed)
            .chain((0..self.extra.len()).map(JournalColumnRole::Extra))
            .collect()
    }

    /// Rename the column addressed by `role`. Returns false for an
    /// out-of-range extra index.
    pub fn rename(&mut self, role: JournalColumnRole, name: impl Into<String>) -> bool {
        match self.name_hide_mut(role) {
            Some((column_name, _)) => {
                *column_name = name.into();
                true
            }
            None => false,
        }
    }

    /// Show or hide the column addressed by `role`. Returns false for an
    /// out-of-range extra index.
    pub fn set_hidden(&mut self, role: JournalColumnRole, hide: bool) -> bool {
        match self.name_hide_mut(role) {
            Some((_, column_hide)) => {
                *column_hide = hide;
                true
            }
            None => false,
        }
    }

    /// Mutable access to the decimal column addressed by `role`, if the
    /// role addresses one.
    pub fn decimal_mut(&mut self, role: JournalColumnRole) -> Option<&mut DecimalColumn> {
        match role {
            JournalColumnRole::Fixed(FixedColumnRole::BaseAmount) => Some(&mut self.base_amount),
            JournalColumnRole::Fixed(FixedColumnRole::QuoteAmount) => Some(&mut self.quote_amount),
            JournalColumnRole::Fixed(FixedColumnRole::Price) => Some(&mut self.price),
            JournalColumnRole::Fixed(FixedColumnRole::FeeBase) => Some(&mut self.fee_base),
            JournalColumnRole::Fixed(FixedColumnRole::FeeQuote) => Some(&mut self.fee_quote),
            JournalColumnRole::Fixed(_) => None,
            JournalColumnRole::Extra(index) => match self.extra.get_mut(index) {
                Some(ExtraColumn::Decimal(column)) => Some(column),
                _ => None,
            },
        }
    }

    fn name_hide_mut(&mut self, role: JournalColumnRole) -> Option<(&mut String, &mut bool)> {
        match role {
            JournalColumnRole::Fixed(FixedColumnRole::Date) => {
                Some((&mut self.date.name, &mut self.date.hide))
            }
            JournalColumnRole::Fixed(FixedColumnRole::Base) => {
                Some((&mut self.base.name, &mut self.base.hide))
            }
            JournalColumnRole::Fixed(FixedColumnRole::BaseAmount) => {
                Some((&mut self.base_amount.name, &mut self.base_amount.hide))
            }
            JournalColumnRole::Fixed(FixedColumnRole::Quote) => {
                Some((&mut self.quote.name, &mut self.quote.hide))
            }
            JournalColumnRole::Fixed(FixedColumnRole::QuoteAmount) => {
                Some((&mut self.quote_amount.name, &mut self.quote_amount.hide))
            }
            JournalColumnRole::Fixed(FixedColumnRole::Price) => {
                Some((&mut self.price.name, &mut self.price.hide))
            }
            JournalColumnRole::Fixed(FixedColumnRole::FeeBase) => {
                Some((&mut self.fee_base.name, &mut self.fee_base.hide))
            }
            JournalColumnRole::Fixed(FixedColumnRole::FeeQuote) => {
                Some((&mut self.fee_quote.name, &mut self.fee_quote.hide))
            }
            JournalColumnRole::Fixed(FixedColumnRole::Notes) => {
                Some((&mut self.notes.name, &mut self.notes.hide))
            }
            JournalColumnRole::Extra(index) => {
                let column = self.extra.get_mut(index)?;
                Some(match column {
                    ExtraColumn::Text(c) => (&mut c.name, &mut c.hide),
                    ExtraColumn::Integer(c) => (&mut c.name, &mut c.hide),
                    ExtraColumn::Decimal(c) => (&mut c.name, &mut c.hide),
                    ExtraColumn::Boolean(c) => (&mut c.name, &mut c.hide),
                })
            }
        }
    }
}

/// A journal of transactions with a configurable column schema.
///
/// `column_order` controls display order and must always be a permutation
/// of exactly the roles that currently exist (the nine fixed roles plus one
/// role per extra column) — the column-management operations maintain this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub name: String,
    #[serde(rename = "type")]
    pub journal_type: JournalType,
    pub columns: JournalColumnSet,
    pub column_order: Vec<JournalColumnRole>,
    pub transactions: Vec<Transaction>,
}

impl Journal {
    /// Create an empty journal from the template for `journal_type`.
    pub fn new(name: impl Into<String>, journal_type: JournalType, format: DateTimeFormat) -> Self {
        let columns = match journal_type {
            JournalType::Trading => JournalColumnSet::trading(format),
            JournalType::Income => JournalColumnSet::income(format),
            JournalType::Expense => JournalColumnSet::expense(format),
        };
        let column_order = columns.roles();
        Self {
            name: name.into(),
            journal_type,
            columns,
            column_order,
            transactions: Vec::new(),
        }
    }

    /// Create an empty trading journal with date-only timestamps.
    pub fn trading(name: impl Into<String>) -> Self {
        Self::new(name, JournalType::Trading, DateTimeFormat::Date)
    }

    /// Create an empty income journal with date-only timestamps.
    pub fn income(name: impl Into<String>) -> Self {
        Self::new(name, JournalType::Income, DateTimeFormat::Date)
    }

    /// Create an empty expense journal with date-only timestamps.
    pub fn expense(name: impl Into<String>) -> Self {
        Self::new(name, JournalType::Expense, DateTimeFormat::Date)
    }

    /// Look up the column addressed by `role`.
    #[must_use]
    pub fn column(&self, role: JournalColumnRole) -> Option<ColumnRef<'_>> {
        self.columns.column(role)
    }
}
