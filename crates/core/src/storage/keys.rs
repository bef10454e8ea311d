//! Partition and sort key generation.
//!
//! Every table is keyed on a string `pk` and a string `sk`. These functions
//! are pure and shared by the AWS adapters and the Lambda handlers.

// ============================================================================
// Attribute names
// ============================================================================

pub const PARTITION_KEY: &str = "pk";
pub const SORT_KEY: &str = "sk";

// ============================================================================
// Key prefixes
// ============================================================================

pub const ACCOUNT_SK_PREFIX: &str = "account#";

/// Sort key used when a lookup is given an empty one.
pub const DEFAULT_SORT_KEY: &str = "#";

// ============================================================================
// Account keys
// ============================================================================

/// Generate the partition key for an Account.
///
/// Pattern: `<user_id>`
pub fn account_pk(user_id: &str) -> String {
    user_id.to_string()
}

/// Sort key shared by every Account row.
///
/// Pattern: `account#`
pub fn account_sk() -> &'static str {
    ACCOUNT_SK_PREFIX
}

/// Returns true if a sort key belongs to an Account row.
pub fn is_account_sk(sk: &str) -> bool {
    sk == ACCOUNT_SK_PREFIX
}

// ============================================================================
// Stats keys
// ============================================================================

/// Generate the partition key for a Stats log line.
///
/// Pattern: `<user_id>`
pub fn stats_pk(user_id: &str) -> String {
    user_id.to_string()
}

/// Generate the sort key for a Stats log line.
///
/// Pattern: `<log_type>#<timestamp>`
pub fn stats_sk(log_type: &str, timestamp: i64) -> String {
    format!("{log_type}#{timestamp}")
}

/// Substitute [`DEFAULT_SORT_KEY`] for an empty sort key.
pub fn normalize_sort_key(sk: &str) -> &str {
    if sk.is_empty() {
        DEFAULT_SORT_KEY
    } else {
        sk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_keys() {
        let user_id = "550e8400-e29b-41d4-a716-446655440001";
        assert_eq!(account_pk(user_id), user_id);
        assert_eq!(account_sk(), "account#");
        assert!(is_account_sk("account#"));
        assert!(!is_account_sk("retention#1712250000"));
    }

    #[test]
    fn test_stats_sk() {
        assert_eq!(stats_sk("retention", 1_712_250_000), "retention#1712250000");
    }

    #[test]
    fn test_normalize_sort_key() {
        assert_eq!(normalize_sort_key(""), "#");
        assert_eq!(normalize_sort_key("account#"), "account#");
    }
}
