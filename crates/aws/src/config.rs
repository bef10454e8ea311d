use std::env;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use portfolio_core::naming::{account_topic_name, DEFAULT_ACCOUNT_TABLE, DEFAULT_STAGE, LOG_TABLE};

/// Environment variable the Lambda runtime sets on every function.
const EXECUTION_ENV: &str = "AWS_EXECUTION_ENV";
const FUNCTION_NAME: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Deployment stage used in resource names (default: "dev")
    pub stage: String,
    /// Table holding user accounts (default: "portfolio")
    pub account_table: String,
    /// Table receiving stats logs (default: "portfolio-log")
    pub log_table: String,
    /// Custom endpoint URL, for local emulators.
    pub endpoint_url: Option<String>,
    /// AWS region. Falls back to the SDK provider chain when unset.
    pub region: Option<String>,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Environment variables:
    /// - `STAGE` - Deployment stage (default: "dev")
    /// - `ACCOUNT_TABLE_NAME` - Account table (default: "portfolio")
    /// - `LOG_TABLE_NAME` - Stats log table (default: "portfolio-log")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint (optional)
    /// - `AWS_REGION` - Region (optional)
    pub fn from_env() -> Self {
        Self {
            stage: env::var("STAGE").unwrap_or_else(|_| DEFAULT_STAGE.to_string()),
            account_table: env::var("ACCOUNT_TABLE_NAME")
                .unwrap_or_else(|_| DEFAULT_ACCOUNT_TABLE.to_string()),
            log_table: env::var("LOG_TABLE_NAME").unwrap_or_else(|_| LOG_TABLE.to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok().filter(|v| !v.is_empty()),
            region: env::var("AWS_REGION").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Name of the SNS topic account changes are published to.
    pub fn account_topic(&self) -> String {
        account_topic_name(&self.stage)
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match (&self.endpoint_url, &self.region) {
            (Some(url), _) => format!("Local endpoint ({})", url),
            (None, Some(region)) => format!("AWS (region: {})", region),
            (None, None) => "AWS (default region)".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Returns true when running inside the Lambda runtime.
pub fn is_aws_lambda() -> bool {
    let execution_env = env::var(EXECUTION_ENV).unwrap_or_default();
    execution_env.starts_with("AWS_Lambda") || env::var(FUNCTION_NAME).is_ok()
}

/// Loads a `.env` file when running outside Lambda.
pub fn load_dotenv() {
    if is_aws_lambda() {
        return;
    }

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env loaded"),
    }
}

/// Loads the AWS configuration shared by every service client.
pub async fn load_sdk_config(settings: &Settings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint) = &settings.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

/// Service clients built from a single [`SdkConfig`].
#[derive(Debug, Clone)]
pub struct AwsClients {
    pub dynamodb: aws_sdk_dynamodb::Client,
    pub sqs: aws_sdk_sqs::Client,
    pub sns: aws_sdk_sns::Client,
    pub secrets: aws_sdk_secretsmanager::Client,
}

impl AwsClients {
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self {
            dynamodb: aws_sdk_dynamodb::Client::new(config),
            sqs: aws_sdk_sqs::Client::new(config),
            sns: aws_sdk_sns::Client::new(config),
            secrets: aws_sdk_secretsmanager::Client::new(config),
        }
    }

    /// Loads the shared configuration and builds every client from it.
    pub async fn from_settings(settings: &Settings) -> Self {
        let config = load_sdk_config(settings).await;
        Self::from_conf(&config)
    }
}
