//! SQS queue management commands.

use portfolio_aws::sqs::{Queue, QueueAttributes};

use crate::error::Result;
use crate::prelude::*;

/// SQS queue management commands.
#[derive(Debug, clap::Parser)]
pub struct SqsCommand {
    #[command(subcommand)]
    pub action: SqsAction,
}

/// Available SQS actions.
#[derive(Debug, clap::Subcommand)]
pub enum SqsAction {
    /// Create a queue. Names ending in `.fifo` create a FIFO queue.
    Create(CreateCommand),

    /// Print the URL and ARN of a queue.
    Url {
        /// Queue name.
        name: String,
    },
}

/// Create a queue.
#[derive(Debug, clap::Parser)]
pub struct CreateCommand {
    /// Queue name.
    pub name: String,

    /// Delivery delay in seconds.
    #[arg(long, default_value = "0")]
    pub delay_seconds: u32,

    /// Message retention in seconds.
    #[arg(long, default_value = "86400")]
    pub retention: u32,

    /// Visibility timeout in seconds.
    #[arg(long, default_value = "0")]
    pub visibility_timeout: u32,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

impl CreateCommand {
    fn attributes(&self) -> QueueAttributes {
        QueueAttributes {
            delay_seconds: self.delay_seconds,
            message_retention_period: self.retention,
            visibility_timeout: self.visibility_timeout,
        }
    }
}

/// Main entry point for sqs command.
pub async fn run(command: SqsCommand, global: crate::Global) -> Result<()> {
    match command.action {
        SqsAction::Create(cmd) => run_create(cmd, &global).await,
        SqsAction::Url { name } => run_url(name, &global).await,
    }
}

async fn run_create(cmd: CreateCommand, global: &crate::Global) -> Result<()> {
    let (_, clients) = crate::connect(global).await;
    let queue = Queue::new(clients.sqs, &cmd.name);

    if !global.is_silent() {
        let kind = if queue.is_fifo() { "FIFO" } else { "standard" };
        aprintln!("  {}", p_y(&format!("+ {} ({kind})", queue.name())));
        aprintln!();
    }

    confirm("Create this queue?", true, cmd.force)?;

    let url = queue.create(Some(cmd.attributes())).await?;
    let arn = queue.arn().await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_c("URL:"), url);
        aprintln!("{} {}", p_c("ARN:"), arn);
        aprintln!("{}", p_g("Queue created successfully."));
    }
    Ok(())
}

async fn run_url(name: String, global: &crate::Global) -> Result<()> {
    let (_, clients) = crate::connect(global).await;
    let queue = Queue::new(clients.sqs, name);

    aprintln!("{} {}", p_c("URL:"), queue.url().await?);
    aprintln!("{} {}", p_c("ARN:"), queue.arn().await?);
    Ok(())
}
