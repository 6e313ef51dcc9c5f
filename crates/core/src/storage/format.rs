use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::account::Account;
use crate::validate;

/// Current persisted format version.
pub const CURRENT_VERSION: u32 = 1;

/// The persisted envelope: a version stamp around the account.
///
/// The field names of everything inside `account` are part of the storage
/// contract consumed by collaborators (`baseAmount`, `pricePrecision`,
/// `columnOrder`, …); the models pin them with serde renames.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEnvelope {
    pub version: u32,
    pub account: Account,
}

/// Serialize an account into versioned JSON bytes.
pub fn write_envelope(account: &Account) -> Result<Vec<u8>, CoreError> {
    let envelope = FileEnvelope {
        version: CURRENT_VERSION,
        account: account.clone(),
    };
    serde_json::to_vec_pretty(&envelope)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize account: {e}")))
}

/// Parse versioned JSON bytes back into an account.
///
/// Untrusted input is checked in stages: the envelope shape and version
/// first, then the closed-set tags the typed parse depends on (journal
/// types, column order roles) for targeted errors, then the full typed
/// parse.
pub fn read_envelope(data: &[u8]) -> Result<Account, CoreError> {
    let raw: Value = serde_json::from_slice(data)
        .map_err(|e| CoreError::InvalidFileFormat(format!("Not valid JSON: {e}")))?;

    let envelope = raw
        .as_object()
        .ok_or_else(|| CoreError::InvalidFileFormat("Expected a top-level object".into()))?;

    let version = envelope
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| CoreError::InvalidFileFormat("Missing or invalid version field".into()))?;
    let version = u32::try_from(version)
        .map_err(|_| CoreError::InvalidFileFormat(format!("Version out of range: {version}")))?;
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let account = envelope
        .get("account")
        .ok_or_else(|| CoreError::InvalidFileFormat("Missing account field".into()))?;

    check_journal_tags(account)?;

    let envelope: FileEnvelope = serde_json::from_value(raw)?;
    Ok(envelope.account)
}

/// Reject malformed closed-set tags in the raw journal objects before the
/// typed parse, so the error names what is wrong instead of where serde
/// gave up.
fn check_journal_tags(account: &Value) -> Result<(), CoreError> {
    let journals = match account.get("journals").and_then(Value::as_array) {
        Some(journals) => journals,
        None => return Ok(()), // shape errors are left to the typed parse
    };

    for (index, journal) in journals.iter().enumerate() {
        if let Some(journal_type) = journal.get("type") {
            if !validate::is_journal_type(journal_type) {
                return Err(CoreError::ValidationError(format!(
                    "Journal {index} has an invalid type: {journal_type}"
                )));
            }
        }
        if let Some(order) = journal.get("columnOrder").and_then(Value::as_array) {
            for role in order {
                if !validate::is_journal_column_role(role) {
                    return Err(CoreError::ValidationError(format!(
                        "Journal {index} has an invalid column role in its order: {role}"
                    )));
                }
            }
        }
        if let Some(columns) = journal.get("columns").and_then(Value::as_object) {
            if let Some(extras) = columns.get("extra").and_then(Value::as_array) {
                for column in extras {
                    if let Some(tag) = column.get("type") {
                        if !validate::is_extra_column_type(tag) {
                            return Err(CoreError::ValidationError(format!(
                                "Journal {index} has an extra column with an invalid type: {tag}"
                            )));
                        }
                    }
                }
            }
            for key in ["baseAmount", "quoteAmount", "price", "feeBase", "feeQuote"] {
                if let Some(description) = columns.get(key).and_then(|c| c.get("description")) {
                    if !validate::is_decimal_column_description(description) {
                        return Err(CoreError::ValidationError(format!(
                            "Journal {index} column '{key}' has an invalid description: {description}"
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}
