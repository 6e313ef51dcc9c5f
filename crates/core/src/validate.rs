//! Runtime closed-set checks over raw, untyped input.
//!
//! Inside the core, column variants and roles are enums and every consumer
//! match is exhaustive at compile time. These predicates exist for the one
//! place that cannot help: the boundary where persisted data or user input
//! arrives as untyped JSON. They never fail — malformed input is reported
//! as `false` (or `None`), and it is the caller's responsibility to reject
//! the containing operation.

use serde_json::Value;

use crate::models::journal::FixedColumnRole;

/// The valid journal type tags.
pub const JOURNAL_TYPES: [&str; 3] = ["trading", "income", "expense"];

/// The valid decimal column description tags.
pub const DECIMAL_COLUMN_DESCRIPTIONS: [&str; 3] = ["base", "quote", "price"];

/// The column type tags legal for extra columns.
pub const EXTRA_COLUMN_TYPES: [&str; 4] = ["text", "integer", "decimal", "boolean"];

/// All column type tags.
pub const JOURNAL_COLUMN_TYPES: [&str; 6] =
    ["date", "asset", "text", "integer", "decimal", "boolean"];

/// true iff `value` is exactly one of the journal type tags.
#[must_use]
pub fn is_journal_type(value: &Value) -> bool {
    matches!(value.as_str(), Some(s) if JOURNAL_TYPES.contains(&s))
}

/// true iff `value` is a valid column role: one of the nine fixed role
/// tags, or a non-negative integer. Numeric-looking strings ("1"),
/// fractional numbers, booleans, and null are all rejected.
#[must_use]
pub fn is_journal_column_role(value: &Value) -> bool {
    match value {
        Value::String(s) => FixedColumnRole::parse(s).is_some(),
        Value::Number(n) => n.is_u64(),
        _ => false,
    }
}

/// true iff `value` is exactly one of the decimal column description tags.
#[must_use]
pub fn is_decimal_column_description(value: &Value) -> bool {
    matches!(value.as_str(), Some(s) if DECIMAL_COLUMN_DESCRIPTIONS.contains(&s))
}

/// true iff `value` is a column type tag legal inside `extra`.
#[must_use]
pub fn is_extra_column_type(value: &Value) -> bool {
    matches!(value.as_str(), Some(s) if EXTRA_COLUMN_TYPES.contains(&s))
}

/// true iff `value` is any column type tag.
#[must_use]
pub fn is_journal_column_type(value: &Value) -> bool {
    matches!(value.as_str(), Some(s) if JOURNAL_COLUMN_TYPES.contains(&s))
}

/// Human-readable label for a raw, possibly malformed column role.
///
/// Used when probing persisted values before they are parsed into typed
/// roles: fixed role tags map to their labels, any numeric role formats as
/// `Extra (n + 1)` with fractional indices floored first (so a raw `-1`
/// displays as "Extra (0)"). Null and non-role values yield `None`.
#[must_use]
pub fn role_display_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => FixedColumnRole::parse(s).map(|role| role.display_name().to_string()),
        Value::Number(n) => {
            let index = n.as_f64()?.floor() as i64;
            Some(format!("Extra ({})", index + 1))
        }
        _ => None,
    }
}
