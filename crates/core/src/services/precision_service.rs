use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::asset::Asset;
use crate::models::column::{DecimalColumn, DecimalColumnDescription};

/// Resolves how many fractional digits a decimal column permits and
/// truncates entered amounts accordingly.
///
/// Pure computation — no I/O. All amount arithmetic stays in `Decimal`;
/// binary floating point is never used for stored values, so repeated edits
/// cannot drift by representation error.
pub struct PrecisionService;

impl PrecisionService {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the precision of a decimal column for a transaction between
    /// `base_ticker` and `quote_ticker`.
    ///
    /// The column's `description` picks the relevant ticker: base and price
    /// columns resolve against the base ticker (prices are quoted in the
    /// base asset's precision habits), quote columns against the quote
    /// ticker. An explicit per-ticker override on the column wins;
    /// otherwise the referenced asset's own `precision` (or
    /// `price_precision` for price columns) applies.
    ///
    /// Returns `None` when the ticker is empty or not in `assets`: the
    /// precision is unknown and callers must apply no truncation, accepting
    /// free-form decimal text instead.
    #[must_use]
    pub fn resolve_precision(
        &self,
        column: &DecimalColumn,
        base_ticker: &str,
        quote_ticker: &str,
        assets: &[Asset],
    ) -> Option<u32> {
        let ticker = match column.description {
            DecimalColumnDescription::Base | DecimalColumnDescription::Price => base_ticker,
            DecimalColumnDescription::Quote => quote_ticker,
        };

        if let Some(precision) = column.precision.get(ticker) {
            return Some(*precision);
        }

        let asset = Asset::find(assets, ticker)?;
        Some(match column.description {
            DecimalColumnDescription::Base | DecimalColumnDescription::Quote => asset.precision,
            DecimalColumnDescription::Price => asset.price_precision,
        })
    }

    /// Truncate `value` to `precision` fractional digits, rounding toward
    /// zero — digits beyond the precision are discarded, never rounded up,
    /// so amounts cannot silently gain value. An unknown (`None`) precision
    /// leaves the value untouched.
    #[must_use]
    pub fn truncate(&self, value: Decimal, precision: Option<u32>) -> Decimal {
        match precision {
            Some(digits) => value.round_dp_with_strategy(digits, RoundingStrategy::ToZero),
            None => value,
        }
    }

    /// Derive the total (quote amount) from an amount and a price.
    #[must_use]
    pub fn total(&self, amount: Decimal, price: Decimal) -> Decimal {
        amount * price
    }

    /// Derive the price from a total and an amount. `None` when the amount
    /// is zero.
    #[must_use]
    pub fn price_of(&self, total: Decimal, amount: Decimal) -> Option<Decimal> {
        if amount.is_zero() {
            None
        } else {
            Some(total / amount)
        }
    }
}

impl Default for PrecisionService {
    fn default() -> Self {
        Self::new()
    }
}
