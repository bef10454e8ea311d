//! Secrets Manager commands.

use portfolio_aws::secrets;

use crate::error::Result;
use crate::prelude::*;

/// Secrets Manager commands.
#[derive(Debug, clap::Parser)]
pub struct SecretCommand {
    #[command(subcommand)]
    pub action: SecretAction,
}

/// Available secret actions.
#[derive(Debug, clap::Subcommand)]
pub enum SecretAction {
    /// Print the current value of a secret.
    Get {
        /// Secret name or ARN.
        secret_id: String,

        /// Parse the value as JSON and pretty print it.
        #[arg(long)]
        json: bool,
    },
}

/// Main entry point for secret command.
pub async fn run(command: SecretCommand, global: crate::Global) -> Result<()> {
    match command.action {
        SecretAction::Get { secret_id, json } => run_get(secret_id, json, &global).await,
    }
}

async fn run_get(secret_id: String, json: bool, global: &crate::Global) -> Result<()> {
    let (_, clients) = crate::connect(global).await;

    if json {
        let value: serde_json::Value = secrets::get_json(&clients.secrets, &secret_id).await?;
        let pretty = serde_json::to_string_pretty(&value)
            .map_err(|e| portfolio_aws::AwsError::Serialization(e.to_string()))?;
        aprintln!("{}", pretty);
    } else {
        aprintln!("{}", secrets::get_string(&clients.secrets, &secret_id).await?);
    }
    Ok(())
}
