use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display format of a date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeFormat {
    /// Date only, e.g. "2021-01-01".
    Date,
    /// Date and time, e.g. "2021-01-01T09:30".
    DateTime,
}

impl std::fmt::Display for DateTimeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateTimeFormat::Date => write!(f, "date"),
            DateTimeFormat::DateTime => write!(f, "datetime"),
        }
    }
}

/// Which side of a transaction a decimal column represents.
///
/// Determines which ticker the precision resolver consults: `Base` and
/// `Price` columns resolve against the transaction's base ticker, `Quote`
/// columns against the quote ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalColumnDescription {
    Base,
    Quote,
    Price,
}

impl std::fmt::Display for DecimalColumnDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecimalColumnDescription::Base => write!(f, "base"),
            DecimalColumnDescription::Quote => write!(f, "quote"),
            DecimalColumnDescription::Price => write!(f, "price"),
        }
    }
}

/// A date column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateColumn {
    /// Name of the column shown in the journal header.
    pub name: String,
    /// Hide the column if true.
    pub hide: bool,
    /// Whether values include a time component.
    pub format: DateTimeFormat,
}

/// A column referencing an asset by ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetColumn {
    pub name: String,
    pub hide: bool,
}

/// A free-text column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextColumn {
    pub name: String,
    pub hide: bool,
}

/// A whole-number column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerColumn {
    pub name: String,
    pub hide: bool,
}

/// A decimal-amount column.
///
/// `description` is fixed by the column's structural position in a column
/// set (baseAmount → `Base`, quoteAmount → `Quote`, price → `Price`) and is
/// never user-editable; storage loading revalidates the five fixed decimal
/// positions. Extra decimal columns pick a description at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecimalColumn {
    pub name: String,
    pub hide: bool,
    /// Per-ticker precision overrides. A missing ticker falls back to the
    /// asset's own precision (or price precision, for price columns).
    #[serde(default)]
    pub precision: BTreeMap<String, u32>,
    pub description: DecimalColumnDescription,
}

/// A yes/no column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanColumn {
    pub name: String,
    pub hide: bool,
}

impl DateColumn {
    pub fn new(name: impl Into<String>, format: DateTimeFormat) -> Self {
        Self { name: name.into(), hide: false, format }
    }
}

impl AssetColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), hide: false }
    }
}

impl TextColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), hide: false }
    }
}

impl IntegerColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), hide: false }
    }
}

impl DecimalColumn {
    pub fn new(name: impl Into<String>, description: DecimalColumnDescription) -> Self {
        Self {
            name: name.into(),
            hide: false,
            precision: BTreeMap::new(),
            description,
        }
    }

    /// Mark the column hidden, consuming and returning it. Used by the
    /// journal templates.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hide = true;
        self
    }
}

impl BooleanColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), hide: false }
    }
}

/// A user-defined extra column. Only these four variants are legal inside a
/// column set's `extra` list — date and asset columns cannot be extra
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExtraColumn {
    Text(TextColumn),
    Integer(IntegerColumn),
    Decimal(DecimalColumn),
    Boolean(BooleanColumn),
}

impl ExtraColumn {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ExtraColumn::Text(c) => &c.name,
            ExtraColumn::Integer(c) => &c.name,
            ExtraColumn::Decimal(c) => &c.name,
            ExtraColumn::Boolean(c) => &c.name,
        }
    }

    #[must_use]
    pub fn hide(&self) -> bool {
        match self {
            ExtraColumn::Text(c) => c.hide,
            ExtraColumn::Integer(c) => c.hide,
            ExtraColumn::Decimal(c) => c.hide,
            ExtraColumn::Boolean(c) => c.hide,
        }
    }

    /// Borrow this extra column as a polymorphic column reference.
    #[must_use]
    pub fn as_ref(&self) -> ColumnRef<'_> {
        match self {
            ExtraColumn::Text(c) => ColumnRef::Text(c),
            ExtraColumn::Integer(c) => ColumnRef::Integer(c),
            ExtraColumn::Decimal(c) => ColumnRef::Decimal(c),
            ExtraColumn::Boolean(c) => ColumnRef::Boolean(c),
        }
    }
}

/// A borrowed view of any column in a column set.
///
/// Role-addressed lookups return this so that the nine structurally-typed
/// fixed columns and the tagged extra columns share one type. The variant
/// predicates below are the single source of truth for "what kind of column
/// is this" — consumers branch with an exhaustive `match` or one of these.
#[derive(Debug, Clone, Copy)]
pub enum ColumnRef<'a> {
    Date(&'a DateColumn),
    Asset(&'a AssetColumn),
    Text(&'a TextColumn),
    Integer(&'a IntegerColumn),
    Decimal(&'a DecimalColumn),
    Boolean(&'a BooleanColumn),
}

impl<'a> ColumnRef<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        match *self {
            ColumnRef::Date(c) => &c.name,
            ColumnRef::Asset(c) => &c.name,
            ColumnRef::Text(c) => &c.name,
            ColumnRef::Integer(c) => &c.name,
            ColumnRef::Decimal(c) => &c.name,
            ColumnRef::Boolean(c) => &c.name,
        }
    }

    #[must_use]
    pub fn hide(&self) -> bool {
        match *self {
            ColumnRef::Date(c) => c.hide,
            ColumnRef::Asset(c) => c.hide,
            ColumnRef::Text(c) => c.hide,
            ColumnRef::Integer(c) => c.hide,
            ColumnRef::Decimal(c) => c.hide,
            ColumnRef::Boolean(c) => c.hide,
        }
    }

    // ── Variant predicates ──────────────────────────────────────────

    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, ColumnRef::Date(_))
    }

    #[must_use]
    pub fn is_asset(&self) -> bool {
        matches!(self, ColumnRef::Asset(_))
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, ColumnRef::Text(_))
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, ColumnRef::Integer(_))
    }

    #[must_use]
    pub fn is_decimal(&self) -> bool {
        matches!(self, ColumnRef::Decimal(_))
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, ColumnRef::Boolean(_))
    }

    /// true for a decimal column describing the base side of a transaction.
    #[must_use]
    pub fn is_base_amount(&self) -> bool {
        matches!(
            self,
            ColumnRef::Decimal(c) if c.description == DecimalColumnDescription::Base
        )
    }

    /// true for a decimal column describing the quote side of a transaction.
    #[must_use]
    pub fn is_quote_amount(&self) -> bool {
        matches!(
            self,
            ColumnRef::Decimal(c) if c.description == DecimalColumnDescription::Quote
        )
    }

    /// true for a decimal column describing a price.
    #[must_use]
    pub fn is_price(&self) -> bool {
        matches!(
            self,
            ColumnRef::Decimal(c) if c.description == DecimalColumnDescription::Price
        )
    }

    /// true exactly for the variants legal inside a column set's `extra`
    /// list: text, integer, decimal, and boolean.
    #[must_use]
    pub fn is_extra(&self) -> bool {
        !matches!(self, ColumnRef::Date(_) | ColumnRef::Asset(_))
    }

    /// The decimal column behind this reference, if it is one.
    #[must_use]
    pub fn as_decimal(&self) -> Option<&'a DecimalColumn> {
        match *self {
            ColumnRef::Decimal(c) => Some(c),
            _ => None,
        }
    }
}
