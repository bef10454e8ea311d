//! Resource names shared by the handlers and the provisioning tool.

/// Table holding stats log lines.
pub const LOG_TABLE: &str = "portfolio-log";

/// Table holding account rows unless `ACCOUNT_TABLE_NAME` overrides it.
pub const DEFAULT_ACCOUNT_TABLE: &str = "portfolio";

/// Stage used when `STAGE` is unset.
pub const DEFAULT_STAGE: &str = "dev";

/// Name of the SNS topic account notifications are published to.
///
/// Pattern: `topic-<stage>-account`
pub fn account_topic_name(stage: &str) -> String {
    format!("topic-{stage}-account")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_topic_name() {
        assert_eq!(account_topic_name("prod"), "topic-prod-account");
        assert_eq!(account_topic_name(DEFAULT_STAGE), "topic-dev-account");
    }
}
