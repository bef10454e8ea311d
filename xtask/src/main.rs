//! See <https://github.com/matklad/cargo-xtask/>
//!
//! This binary provisions the AWS resources the portfolio services run on:
//! tables, queues, topics and subscriptions. It also reads secrets.
//!
//! The binary is integrated into the `cargo` command line by using an
//! alias in `.cargo/config`.

use clap::Parser;
use portfolio_aws::{AwsClients, Settings};

mod dynamodb;
mod error;
mod prelude;
mod secret;
mod sns;
mod sqs;

use prelude::*;

/// Provisioning tasks for the portfolio services
#[derive(Debug, Parser)]
#[command(name = "xtask")]
#[command(about = "Provisioning tasks for the portfolio services", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Manage DynamoDB tables
    Dynamodb(dynamodb::DynamodbCommand),

    /// Manage SQS queues
    Sqs(sqs::SqsCommand),

    /// Manage SNS topics and subscriptions
    Sns(sns::SnsCommand),

    /// Read Secrets Manager secrets
    Secret(secret::SecretCommand),
}

/// Loads settings and builds the AWS clients, printing the target.
pub async fn connect(global: &Global) -> (Settings, AwsClients) {
    portfolio_aws::config::load_dotenv();
    let settings = Settings::from_env();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), settings.target_display());
        if global.is_verbose() {
            aprintln!("{} {}", p_b("Stage:"), settings.stage);
        }
        aprintln!();
    }

    let clients = AwsClients::from_settings(&settings).await;
    (settings, clients)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dynamodb(cmd) => dynamodb::run(cmd, cli.global).await?,
        Commands::Sqs(cmd) => sqs::run(cmd, cli.global).await?,
        Commands::Sns(cmd) => sns::run(cmd, cli.global).await?,
        Commands::Secret(cmd) => secret::run(cmd, cli.global).await?,
    }

    Ok(())
}
