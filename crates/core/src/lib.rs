pub mod errors;
pub mod models;
pub mod services;
pub mod storage;
pub mod validate;

use rust_decimal::Decimal;

use models::account::Account;
use models::asset::Asset;
use models::column::{ColumnRef, DateTimeFormat, ExtraColumn};
use models::journal::{Journal, JournalColumnRole, JournalType};
use models::transaction::Transaction;
use services::journal_service::JournalService;
use services::precision_service::PrecisionService;
use services::transaction_service::{TransactionDraft, TransactionService};
use storage::manager::StorageManager;

use errors::CoreError;

/// Main entry point for the Trade Ledger core library.
/// Holds the account state and all services needed to operate on it.
#[must_use]
pub struct TradeLedger {
    account: Account,
    journal_service: JournalService,
    precision_service: PrecisionService,
    transaction_service: TransactionService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for TradeLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeLedger")
            .field("account", &self.account.name)
            .field("assets", &self.account.assets.len())
            .field("journals", &self.account.journals.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl TradeLedger {
    /// Create a brand new account seeded with the starter data (a BTC
    /// asset and empty Trading / Misc fees journals).
    pub fn create_new(name: impl Into<String>) -> Self {
        Self::build(Account::with_defaults(name))
    }

    /// Wrap an existing account.
    pub fn from_account(account: Account) -> Self {
        Self::build(account)
    }

    /// Load an account from serialized bytes.
    /// Use this for WASM / Tauri where the frontend handles file I/O.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        let account = StorageManager::load_from_bytes(data)?;
        Ok(Self::build(account))
    }

    /// Save the current account to serialized bytes.
    /// Returns raw bytes that the frontend can write to a file.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.account)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from a file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let account = StorageManager::load_from_file(path)?;
        Ok(Self::build(account))
    }

    /// Save to a file on disk (native only, not WASM).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.account, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Account & Assets ────────────────────────────────────────────

    /// The whole account, read-only.
    #[must_use]
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn set_account_name(&mut self, name: impl Into<String>) {
        self.account.name = name.into();
        self.dirty = true;
    }

    /// All assets managed by the account.
    #[must_use]
    pub fn get_assets(&self) -> &[Asset] {
        &self.account.assets
    }

    /// Look up an asset by ticker.
    #[must_use]
    pub fn find_asset(&self, ticker: &str) -> Option<&Asset> {
        self.account.find_asset(ticker)
    }

    /// Add an asset. The ticker must not already be in use.
    pub fn add_asset(&mut self, asset: Asset) -> Result<(), CoreError> {
        if self.account.find_asset(&asset.ticker).is_some() {
            return Err(CoreError::ValidationError(format!(
                "An asset with ticker '{}' already exists",
                asset.ticker
            )));
        }
        self.account.assets.push(asset);
        self.dirty = true;
        Ok(())
    }

    /// Remove an asset by ticker.
    /// Refused while any transaction still references the ticker.
    pub fn remove_asset(&mut self, ticker: &str) -> Result<Asset, CoreError> {
        let index = self
            .account
            .assets
            .iter()
            .position(|a| a.ticker == ticker)
            .ok_or_else(|| CoreError::AssetNotFound(ticker.to_string()))?;

        let referenced = self.account.journals.iter().any(|journal| {
            journal
                .transactions
                .iter()
                .any(|t| t.base == ticker || t.quote == ticker)
        });
        if referenced {
            return Err(CoreError::ValidationError(format!(
                "Asset '{ticker}' is referenced by existing transactions"
            )));
        }

        let removed = self.account.assets.remove(index);
        self.dirty = true;
        Ok(removed)
    }

    // ── Journals ────────────────────────────────────────────────────

    /// Create an empty journal from the template for `journal_type` and
    /// append it to the account. Returns its index.
    pub fn add_journal(
        &mut self,
        name: impl Into<String>,
        journal_type: JournalType,
        format: DateTimeFormat,
    ) -> usize {
        self.account
            .journals
            .push(Journal::new(name, journal_type, format));
        self.dirty = true;
        self.account.journals.len() - 1
    }

    pub fn rename_journal(&mut self, journal: usize, name: impl Into<String>) -> Result<(), CoreError> {
        self.account
            .journal_mut(journal)
            .ok_or(CoreError::JournalNotFound(journal))?
            .name = name.into();
        self.dirty = true;
        Ok(())
    }

    /// Remove a journal and all its transactions.
    pub fn remove_journal(&mut self, journal: usize) -> Result<Journal, CoreError> {
        if journal >= self.account.journals.len() {
            return Err(CoreError::JournalNotFound(journal));
        }
        let removed = self.account.journals.remove(journal);
        self.dirty = true;
        Ok(removed)
    }

    /// All journals, in account order.
    #[must_use]
    pub fn get_journals(&self) -> &[Journal] {
        &self.account.journals
    }

    /// A single journal by index.
    pub fn journal(&self, journal: usize) -> Result<&Journal, CoreError> {
        self.account
            .journals
            .get(journal)
            .ok_or(CoreError::JournalNotFound(journal))
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Append a transaction to a journal after validating it against the
    /// journal's schema.
    pub fn add_transaction(
        &mut self,
        journal: usize,
        transaction: Transaction,
    ) -> Result<(), CoreError> {
        if journal >= self.account.journals.len() {
            return Err(CoreError::JournalNotFound(journal));
        }
        self.journal_service.add_transaction(
            &self.transaction_service,
            &mut self.account.journals[journal],
            transaction,
        )?;
        self.dirty = true;
        Ok(())
    }

    /// Replace the transaction at `index` after validating the replacement.
    pub fn update_transaction(
        &mut self,
        journal: usize,
        index: usize,
        transaction: Transaction,
    ) -> Result<(), CoreError> {
        if journal >= self.account.journals.len() {
            return Err(CoreError::JournalNotFound(journal));
        }
        self.journal_service.update_transaction(
            &self.transaction_service,
            &mut self.account.journals[journal],
            index,
            transaction,
        )?;
        self.dirty = true;
        Ok(())
    }

    /// Remove and return the transaction at `index`.
    pub fn remove_transaction(
        &mut self,
        journal: usize,
        index: usize,
    ) -> Result<Transaction, CoreError> {
        if journal >= self.account.journals.len() {
            return Err(CoreError::JournalNotFound(journal));
        }
        let removed = self
            .journal_service
            .remove_transaction(&mut self.account.journals[journal], index)?;
        self.dirty = true;
        Ok(removed)
    }

    /// A single transaction by journal and index.
    pub fn get_transaction(&self, journal: usize, index: usize) -> Result<&Transaction, CoreError> {
        self.journal(journal)?
            .transactions
            .get(index)
            .ok_or(CoreError::TransactionNotFound(index))
    }

    /// Load a stored transaction into an editable draft.
    ///
    /// The transaction type is recovered from the stored signs; the
    /// journal's own type supplies the fallback for the all-zero case
    /// (trading → buy, income → income, expense → expense).
    pub fn draft_for_edit(
        &self,
        journal: usize,
        index: usize,
    ) -> Result<TransactionDraft, CoreError> {
        let journal = self.journal(journal)?;
        let transaction = journal
            .transactions
            .get(index)
            .ok_or(CoreError::TransactionNotFound(index))?;
        let fallback = journal.journal_type.default_transaction_type();
        Ok(self.transaction_service.draft(transaction, fallback))
    }

    /// Submit a draft as a new transaction: storage signs are re-derived
    /// from the draft's type and the inactive fee side is forced to zero.
    pub fn add_transaction_from_draft(
        &mut self,
        journal: usize,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError> {
        let transaction = self.transaction_service.submit(draft)?;
        self.add_transaction(journal, transaction)
    }

    /// Submit a draft as a replacement for the transaction at `index`.
    /// Extra column values of the stored transaction are preserved — the
    /// draft does not carry them.
    pub fn update_transaction_from_draft(
        &mut self,
        journal: usize,
        index: usize,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError> {
        let mut transaction = self.transaction_service.submit(draft)?;
        transaction.extra = self.get_transaction(journal, index)?.extra.clone();
        self.update_transaction(journal, index, transaction)
    }

    // ── Columns ─────────────────────────────────────────────────────

    /// Look up the column a role addresses within a journal.
    /// `Ok(None)` means the role's extra index is out of range.
    pub fn get_column(
        &self,
        journal: usize,
        role: JournalColumnRole,
    ) -> Result<Option<ColumnRef<'_>>, CoreError> {
        Ok(self.journal(journal)?.column(role))
    }

    /// The journal's display order of column roles.
    pub fn get_column_order(&self, journal: usize) -> Result<&[JournalColumnRole], CoreError> {
        Ok(&self.journal(journal)?.column_order)
    }

    /// Append a user-defined extra column. Its role is appended to the
    /// column order. Returns the new role.
    pub fn add_extra_column(
        &mut self,
        journal: usize,
        column: ExtraColumn,
    ) -> Result<JournalColumnRole, CoreError> {
        let journal = self
            .account
            .journal_mut(journal)
            .ok_or(CoreError::JournalNotFound(journal))?;
        let role = self.journal_service.add_extra_column(journal, column);
        self.dirty = true;
        Ok(role)
    }

    /// Remove the extra column at `index`. The column order and every
    /// transaction's extra values are renumbered to match.
    pub fn remove_extra_column(
        &mut self,
        journal: usize,
        index: usize,
    ) -> Result<ExtraColumn, CoreError> {
        let journal = self
            .account
            .journal_mut(journal)
            .ok_or(CoreError::JournalNotFound(journal))?;
        let removed = self.journal_service.remove_extra_column(journal, index)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Rename the column addressed by `role`.
    pub fn rename_column(
        &mut self,
        journal: usize,
        role: JournalColumnRole,
        name: impl Into<String>,
    ) -> Result<(), CoreError> {
        let journal = self
            .account
            .journal_mut(journal)
            .ok_or(CoreError::JournalNotFound(journal))?;
        self.journal_service.rename_column(journal, role, name)?;
        self.dirty = true;
        Ok(())
    }

    /// Show or hide the column addressed by `role`.
    pub fn set_column_hidden(
        &mut self,
        journal: usize,
        role: JournalColumnRole,
        hide: bool,
    ) -> Result<(), CoreError> {
        let journal = self
            .account
            .journal_mut(journal)
            .ok_or(CoreError::JournalNotFound(journal))?;
        self.journal_service.set_column_hidden(journal, role, hide)?;
        self.dirty = true;
        Ok(())
    }

    /// Set or clear a per-ticker precision override on a decimal column.
    pub fn set_precision_override(
        &mut self,
        journal: usize,
        role: JournalColumnRole,
        ticker: &str,
        precision: Option<u32>,
    ) -> Result<(), CoreError> {
        let journal = self
            .account
            .journal_mut(journal)
            .ok_or(CoreError::JournalNotFound(journal))?;
        self.journal_service
            .set_precision_override(journal, role, ticker, precision)?;
        self.dirty = true;
        Ok(())
    }

    /// Replace a journal's column order. The proposed order must be a
    /// permutation of exactly the roles that currently exist.
    pub fn set_column_order(
        &mut self,
        journal: usize,
        order: Vec<JournalColumnRole>,
    ) -> Result<(), CoreError> {
        let journal = self
            .account
            .journal_mut(journal)
            .ok_or(CoreError::JournalNotFound(journal))?;
        self.journal_service.set_column_order(journal, order)?;
        self.dirty = true;
        Ok(())
    }

    // ── Precision ───────────────────────────────────────────────────

    /// Resolve the number of fractional digits permitted in the decimal
    /// column addressed by `role`, for a transaction between `base_ticker`
    /// and `quote_ticker`.
    ///
    /// `Ok(None)` means the precision is unknown (the relevant ticker is
    /// empty or not in the account's assets); the input surface should
    /// accept free-form decimal text without truncation. A role that does
    /// not address a decimal column is an error.
    pub fn resolve_precision(
        &self,
        journal: usize,
        role: JournalColumnRole,
        base_ticker: &str,
        quote_ticker: &str,
    ) -> Result<Option<u32>, CoreError> {
        let column = self
            .journal(journal)?
            .column(role)
            .and_then(|c| c.as_decimal())
            .ok_or_else(|| CoreError::ColumnNotFound(role.display_name()))?;
        Ok(self.precision_service.resolve_precision(
            column,
            base_ticker,
            quote_ticker,
            &self.account.assets,
        ))
    }

    /// Truncate an entered amount toward zero to a resolved precision.
    /// An unknown (`None`) precision leaves the value untouched.
    #[must_use]
    pub fn truncate_amount(&self, value: Decimal, precision: Option<u32>) -> Decimal {
        self.precision_service.truncate(value, precision)
    }

    // ── Dirty State ─────────────────────────────────────────────────

    /// Returns `true` if the account has been modified since the last save
    /// or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(account: Account) -> Self {
        Self {
            account,
            journal_service: JournalService::new(),
            precision_service: PrecisionService::new(),
            transaction_service: TransactionService::new(),
            dirty: false,
        }
    }
}
