use std::collections::HashSet;

use crate::errors::CoreError;
use crate::models::column::{DecimalColumnDescription, ExtraColumn};
use crate::models::journal::{FixedColumnRole, Journal, JournalColumnRole};
use crate::models::transaction::Transaction;

use super::transaction_service::TransactionService;

/// Manages a journal's transactions, extra columns, and column order.
///
/// Pure business logic — no I/O. Every operation keeps the journal's
/// invariant that `column_order` is a permutation of exactly the roles that
/// currently exist.
pub struct JournalService;

impl JournalService {
    pub fn new() -> Self {
        Self
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Append a transaction after validating it against the journal's
    /// schema.
    pub fn add_transaction(
        &self,
        transaction_service: &TransactionService,
        journal: &mut Journal,
        transaction: Transaction,
    ) -> Result<(), CoreError> {
        transaction_service.validate(journal, &transaction)?;
        journal.transactions.push(transaction);
        Ok(())
    }

    /// Replace the transaction at `index` after validating the replacement.
    pub fn update_transaction(
        &self,
        transaction_service: &TransactionService,
        journal: &mut Journal,
        index: usize,
        transaction: Transaction,
    ) -> Result<(), CoreError> {
        if index >= journal.transactions.len() {
            return Err(CoreError::TransactionNotFound(index));
        }
        transaction_service.validate(journal, &transaction)?;
        journal.transactions[index] = transaction;
        Ok(())
    }

    /// Remove and return the transaction at `index`.
    pub fn remove_transaction(
        &self,
        journal: &mut Journal,
        index: usize,
    ) -> Result<Transaction, CoreError> {
        if index >= journal.transactions.len() {
            return Err(CoreError::TransactionNotFound(index));
        }
        Ok(journal.transactions.remove(index))
    }

    // ── Extra columns ───────────────────────────────────────────────

    /// Append an extra column and register its role at the end of the
    /// column order. Returns the new column's role.
    pub fn add_extra_column(
        &self,
        journal: &mut Journal,
        column: ExtraColumn,
    ) -> JournalColumnRole {
        journal.columns.extra.push(column);
        let role = JournalColumnRole::Extra(journal.columns.extra.len() - 1);
        journal.column_order.push(role);
        role
    }

    /// Remove the extra column at `index`.
    ///
    /// Reconciles everything that addresses extra columns by position: the
    /// removed role is dropped from the column order, higher extra roles
    /// shift down by one, and every transaction's extra values follow the
    /// same renumbering (the removed column's values are discarded).
    pub fn remove_extra_column(
        &self,
        journal: &mut Journal,
        index: usize,
    ) -> Result<ExtraColumn, CoreError> {
        if index >= journal.columns.extra.len() {
            return Err(CoreError::ColumnNotFound(
                JournalColumnRole::Extra(index).display_name(),
            ));
        }
        let removed = journal.columns.extra.remove(index);

        journal
            .column_order
            .retain(|role| *role != JournalColumnRole::Extra(index));
        for role in &mut journal.column_order {
            if let JournalColumnRole::Extra(i) = role {
                if *i > index {
                    *i -= 1;
                }
            }
        }

        for transaction in &mut journal.transactions {
            let shifted = std::mem::take(&mut transaction.extra)
                .into_iter()
                .filter(|(i, _)| *i != index)
                .map(|(i, value)| if i > index { (i - 1, value) } else { (i, value) })
                .collect();
            transaction.extra = shifted;
        }

        Ok(removed)
    }

    // ── Column settings ─────────────────────────────────────────────

    /// Rename the column addressed by `role`.
    pub fn rename_column(
        &self,
        journal: &mut Journal,
        role: JournalColumnRole,
        name: impl Into<String>,
    ) -> Result<(), CoreError> {
        if journal.columns.rename(role, name) {
            Ok(())
        } else {
            Err(CoreError::ColumnNotFound(role.display_name()))
        }
    }

    /// Show or hide the column addressed by `role`.
    pub fn set_column_hidden(
        &self,
        journal: &mut Journal,
        role: JournalColumnRole,
        hide: bool,
    ) -> Result<(), CoreError> {
        if journal.columns.set_hidden(role, hide) {
            Ok(())
        } else {
            Err(CoreError::ColumnNotFound(role.display_name()))
        }
    }

    /// Set or clear a per-ticker precision override on the decimal column
    /// addressed by `role`. `None` removes the override, restoring the
    /// asset's own precision.
    pub fn set_precision_override(
        &self,
        journal: &mut Journal,
        role: JournalColumnRole,
        ticker: &str,
        precision: Option<u32>,
    ) -> Result<(), CoreError> {
        let column = journal
            .columns
            .decimal_mut(role)
            .ok_or_else(|| CoreError::ColumnNotFound(role.display_name()))?;
        match precision {
            Some(digits) => {
                column.precision.insert(ticker.to_string(), digits);
            }
            None => {
                column.precision.remove(ticker);
            }
        }
        Ok(())
    }

    // ── Column order ────────────────────────────────────────────────

    /// Replace the journal's column order.
    ///
    /// The proposed order must be a permutation of exactly the roles that
    /// currently exist — no missing role, no dangling role, no duplicate.
    pub fn set_column_order(
        &self,
        journal: &mut Journal,
        order: Vec<JournalColumnRole>,
    ) -> Result<(), CoreError> {
        validate_order(&order, &journal.columns.roles())?;
        journal.column_order = order;
        Ok(())
    }

    /// Check the permutation invariant on a journal as it stands. Used
    /// when loading persisted data.
    pub fn validate_column_order(&self, journal: &Journal) -> Result<(), CoreError> {
        validate_order(&journal.column_order, &journal.columns.roles())
    }

    /// Check the structural invariants of a loaded journal: the column
    /// order is a permutation of the current roles, and each fixed decimal
    /// column carries the description its position dictates.
    pub fn validate_journal(&self, journal: &Journal) -> Result<(), CoreError> {
        self.validate_column_order(journal)?;

        let expected = [
            (FixedColumnRole::BaseAmount, &journal.columns.base_amount, DecimalColumnDescription::Base),
            (FixedColumnRole::QuoteAmount, &journal.columns.quote_amount, DecimalColumnDescription::Quote),
            (FixedColumnRole::Price, &journal.columns.price, DecimalColumnDescription::Price),
            (FixedColumnRole::FeeBase, &journal.columns.fee_base, DecimalColumnDescription::Base),
            (FixedColumnRole::FeeQuote, &journal.columns.fee_quote, DecimalColumnDescription::Quote),
        ];
        for (role, column, description) in expected {
            if column.description != description {
                return Err(CoreError::ValidationError(format!(
                    "Column '{}' must describe '{}', found '{}'",
                    role.as_str(),
                    description,
                    column.description
                )));
            }
        }

        Ok(())
    }
}

impl Default for JournalService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_order(
    order: &[JournalColumnRole],
    existing: &[JournalColumnRole],
) -> Result<(), CoreError> {
    let proposed: HashSet<JournalColumnRole> = order.iter().copied().collect();
    if proposed.len() != order.len() {
        return Err(CoreError::ValidationError(
            "Column order contains a duplicate role".into(),
        ));
    }
    for role in existing {
        if !proposed.contains(role) {
            return Err(CoreError::ValidationError(format!(
                "Column order is missing the '{}' column",
                role.display_name()
            )));
        }
    }
    if order.len() != existing.len() {
        return Err(CoreError::ValidationError(
            "Column order references a column that does not exist".into(),
        ));
    }
    Ok(())
}
