//! DynamoDB table management commands.

use aws_sdk_dynamodb::types::StreamViewType;
use portfolio_aws::dynamodb::{list_tables, Table, TableSchema};

use crate::error::Result;
use crate::prelude::*;

/// DynamoDB table management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Create the account and log tables.
    Deploy(DeployCommand),

    /// List every table.
    List,
}

/// Create the account and log tables.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Create the account and log tables.

Both tables are keyed on `pk`/`sk` strings with on-demand billing. The account
table streams new and old images so account changes reach the account topic.
Tables that already exist are left untouched.

Environment variables:
  ACCOUNT_TABLE_NAME  - Account table (defaults to portfolio)
  LOG_TABLE_NAME      - Log table (defaults to portfolio-log)
  AWS_ENDPOINT_URL    - Use a local endpoint (e.g., http://localhost:8000)
  AWS_REGION          - AWS region
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Account table name. Overrides ACCOUNT_TABLE_NAME.
    #[arg(long)]
    pub account_table: Option<String>,

    /// Log table name. Overrides LOG_TABLE_NAME.
    #[arg(long)]
    pub log_table: Option<String>,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(cmd) => run_deploy(cmd, &global).await,
        DynamodbAction::List => run_list(&global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let (settings, clients) = crate::connect(global).await;

    let plan = [
        (
            cmd.account_table.unwrap_or(settings.account_table),
            TableSchema::default().with_stream(StreamViewType::NewAndOldImages),
        ),
        (
            cmd.log_table.unwrap_or(settings.log_table),
            TableSchema::default(),
        ),
    ];

    let mut missing = Vec::new();
    for (name, schema) in plan {
        let table = Table::new(clients.dynamodb.clone(), name);
        if table.exists().await? {
            if !global.is_silent() {
                aprintln!("  {}", p_g(&format!("= {} (exists)", table.name())));
            }
        } else {
            if !global.is_silent() {
                aprintln!("  {}", p_y(&format!("+ {}", table.name())));
            }
            missing.push((table, schema));
        }
    }

    if missing.is_empty() {
        if !global.is_silent() {
            aprintln!();
            aprintln!("{}", p_g("Tables are up to date."));
        }
        return Ok(());
    }

    confirm("Create the missing tables?", true, cmd.force)?;

    for (table, schema) in missing {
        if !global.is_silent() {
            aprintln!("{} {}", p_b("Creating"), table.name());
        }

        let description = table.create_table(Some(schema)).await?;

        if !global.is_silent() {
            if let Some(arn) = description.latest_stream_arn() {
                aprintln!("  {} {}", p_c("Stream:"), arn);
            }
        }
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Tables deployed successfully."));
    }
    Ok(())
}

async fn run_list(global: &crate::Global) -> Result<()> {
    let (_, clients) = crate::connect(global).await;

    for name in list_tables(&clients.dynamodb).await? {
        aprintln!("{}", name);
    }
    Ok(())
}
