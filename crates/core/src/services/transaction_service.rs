use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::column::{DateTimeFormat, ExtraColumn};
use crate::models::journal::Journal;
use crate::models::transaction::{ExtraValue, FeeCurrency, Transaction, TransactionType};

/// Form state for adding or editing a transaction: unsigned magnitudes plus
/// an explicit type, the way the user sees a transaction.
///
/// Storage keeps signed amounts instead; [`TransactionService::draft`] and
/// [`TransactionService::submit`] convert between the two so that a
/// load→save round trip without edits is a no-op on signs.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: String,
    pub base: String,
    pub quote: String,
    /// Unsigned base magnitude (the "amount").
    pub base_amount: Decimal,
    /// Unsigned quote magnitude (the "total").
    pub quote_amount: Decimal,
    /// Quote per unit of base, derived from the magnitudes on load.
    pub price: Decimal,
    /// The single fee, in whichever side `fee_currency` names.
    pub fee: Decimal,
    pub fee_currency: FeeCurrency,
    pub notes: String,
    pub transaction_type: TransactionType,
}

/// Converts between stored signed transactions and user-facing drafts, and
/// validates transactions against their journal's schema.
///
/// Pure business logic — no I/O.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Load a stored transaction into a draft for editing.
    ///
    /// The type is recovered from the stored signs ([`TransactionType::
    /// classify`]); `fallback` resolves the all-zero case. The price is
    /// derived as total/amount (zero when the amount is zero). The active
    /// fee side is the nonzero one; with no fee at all the draft defaults
    /// to a quote-side fee.
    #[must_use]
    pub fn draft(&self, transaction: &Transaction, fallback: TransactionType) -> TransactionDraft {
        let transaction_type = transaction.transaction_type(fallback);
        let base_amount = transaction.base_amount.abs();
        let quote_amount = transaction.quote_amount.abs();
        let price = if base_amount.is_zero() {
            Decimal::ZERO
        } else {
            quote_amount / base_amount
        };
        let (fee, fee_currency) = if !transaction.fee_base.is_zero() {
            (transaction.fee_base, FeeCurrency::Base)
        } else {
            (transaction.fee_quote, FeeCurrency::Quote)
        };

        TransactionDraft {
            date: transaction.date.clone(),
            base: transaction.base.clone(),
            quote: transaction.quote.clone(),
            base_amount,
            quote_amount,
            price,
            fee,
            fee_currency,
            notes: transaction.notes.clone(),
            transaction_type,
        }
    }

    /// Turn a draft back into a stored transaction.
    ///
    /// Storage signs are re-derived from the draft's type; the fee lands on
    /// the side named by `fee_currency` and the other side is forced to
    /// zero. Rejects negative magnitudes and fees.
    pub fn submit(&self, draft: &TransactionDraft) -> Result<Transaction, CoreError> {
        if draft.base_amount < Decimal::ZERO || draft.quote_amount < Decimal::ZERO {
            return Err(CoreError::ValidationError(
                "Draft amounts are magnitudes and must not be negative".into(),
            ));
        }
        if draft.fee < Decimal::ZERO {
            return Err(CoreError::ValidationError(
                "Fee must not be negative".into(),
            ));
        }

        let (base_amount, quote_amount) = draft
            .transaction_type
            .signed_amounts(draft.base_amount, draft.quote_amount);
        let (fee_base, fee_quote) = match draft.fee_currency {
            FeeCurrency::Base => (draft.fee, Decimal::ZERO),
            FeeCurrency::Quote => (Decimal::ZERO, draft.fee),
        };

        Ok(Transaction {
            date: draft.date.clone(),
            base: draft.base.clone(),
            base_amount,
            quote: draft.quote.clone(),
            quote_amount,
            fee_base,
            fee_quote,
            notes: draft.notes.clone(),
            extra: Default::default(),
        })
    }

    /// Validate a transaction against its journal's schema.
    ///
    /// Rules:
    /// - The date must parse in the journal's date column format.
    /// - Fees must be non-negative, and at most one side may be nonzero.
    /// - Extra values must address existing extra columns and match their
    ///   column's kind.
    pub fn validate(&self, journal: &Journal, transaction: &Transaction) -> Result<(), CoreError> {
        if !date_matches_format(&transaction.date, journal.columns.date.format) {
            return Err(CoreError::ValidationError(format!(
                "Date '{}' does not match the journal's {} format",
                transaction.date, journal.columns.date.format
            )));
        }

        if transaction.fee_base < Decimal::ZERO || transaction.fee_quote < Decimal::ZERO {
            return Err(CoreError::ValidationError(
                "Fees must not be negative".into(),
            ));
        }
        if !transaction.fee_base.is_zero() && !transaction.fee_quote.is_zero() {
            return Err(CoreError::ValidationError(
                "At most one of the base and quote fees may be nonzero".into(),
            ));
        }

        for (&index, value) in &transaction.extra {
            let column = journal.columns.extra.get(index).ok_or_else(|| {
                CoreError::ValidationError(format!(
                    "Extra value at index {index} has no matching extra column"
                ))
            })?;
            if !extra_value_matches(column, value) {
                return Err(CoreError::ValidationError(format!(
                    "Extra value at index {index} does not match the '{}' column's kind",
                    column.name()
                )));
            }
        }

        Ok(())
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}

fn date_matches_format(date: &str, format: DateTimeFormat) -> bool {
    match format {
        DateTimeFormat::Date => NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok(),
        DateTimeFormat::DateTime => {
            NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M").is_ok()
                || NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S").is_ok()
        }
    }
}

fn extra_value_matches(column: &ExtraColumn, value: &ExtraValue) -> bool {
    // Integers are acceptable in decimal columns (a whole-number amount).
    matches!(
        (column, value),
        (ExtraColumn::Text(_), ExtraValue::Text(_))
            | (ExtraColumn::Integer(_), ExtraValue::Integer(_))
            | (ExtraColumn::Decimal(_), ExtraValue::Decimal(_))
            | (ExtraColumn::Decimal(_), ExtraValue::Integer(_))
            | (ExtraColumn::Boolean(_), ExtraValue::Boolean(_))
    )
}
