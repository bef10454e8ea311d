//! Secrets Manager lookups.

use std::fmt::Debug;

use aws_sdk_secretsmanager::error::SdkError;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::Client;
use serde::de::DeserializeOwned;

use crate::error::{AwsError, Result};

/// Version stage of the current secret value.
pub const CURRENT_VERSION_STAGE: &str = "AWSCURRENT";

/// Fetches the current string value of a secret.
pub async fn get_string(client: &Client, secret_id: &str) -> Result<String> {
    let output = client
        .get_secret_value()
        .secret_id(secret_id)
        .version_stage(CURRENT_VERSION_STAGE)
        .send()
        .await
        .map_err(|e| map_get_secret_value_error(e, secret_id))?;

    tracing::debug!(secret_id, "fetched secret");

    output.secret_string.ok_or_else(|| {
        AwsError::InvalidInput(format!("secret {secret_id} has no string value"))
    })
}

/// Fetches a secret and deserializes its JSON string value.
pub async fn get_json<T: DeserializeOwned>(client: &Client, secret_id: &str) -> Result<T> {
    let raw = get_string(client, secret_id).await?;
    parse_json(&raw)
}

/// Deserializes a JSON secret value.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    Ok(serde_json::from_str(raw)?)
}

fn map_get_secret_value_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetSecretValueError, R>,
    secret_id: &str,
) -> AwsError {
    const OP: &str = "GetSecretValue";
    match err.into_service_error() {
        GetSecretValueError::ResourceNotFoundException(_) => AwsError::NotFound {
            entity: "Secret",
            id: secret_id.to_string(),
        },
        GetSecretValueError::DecryptionFailure(_) => {
            AwsError::service(OP, format!("Could not decrypt secret {secret_id}"))
        }
        GetSecretValueError::InternalServiceError(_) => {
            AwsError::service(OP, "Secrets Manager internal service error")
        }
        err => AwsError::service(OP, format!("{:?}", err)),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct DatabaseSecret {
        username: String,
        port: u16,
    }

    #[test]
    fn test_parse_json() {
        let secret: DatabaseSecret =
            parse_json(r#"{"username":"portfolio","port":5432}"#).unwrap();

        assert_eq!(
            secret,
            DatabaseSecret {
                username: "portfolio".to_string(),
                port: 5432,
            }
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_json::<DatabaseSecret>("not json");
        assert!(matches!(result, Err(AwsError::Serialization(_))));
    }
}
