use crate::errors::CoreError;
use crate::models::account::Account;
use crate::services::journal_service::JournalService;

use super::format;

/// High-level storage operations: save/load an account to/from JSON bytes
/// or files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize an account to versioned JSON bytes (portable,
    /// platform-independent). Use this for WASM / Tauri where the frontend
    /// handles file I/O.
    pub fn save_to_bytes(account: &Account) -> Result<Vec<u8>, CoreError> {
        format::write_envelope(account)
    }

    /// Deserialize an account from raw bytes.
    ///
    /// Beyond the typed parse, the structural invariants the types cannot
    /// express are revalidated per journal: the column order must be a
    /// permutation of the existing roles, and the fixed decimal columns
    /// must carry the descriptions their positions dictate.
    pub fn load_from_bytes(data: &[u8]) -> Result<Account, CoreError> {
        let account = format::read_envelope(data)?;

        let journal_service = JournalService::new();
        for journal in &account.journals {
            journal_service.validate_journal(journal)?;
        }

        Ok(account)
    }

    /// Save an account to a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(account: &Account, path: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(account)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load an account from a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Account, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
