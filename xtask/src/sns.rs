//! SNS topic and subscription commands.

use portfolio_aws::sns::{create_topic, unsubscribe, SubscribeProtocol, TopicRegistry};

use crate::error::Result;
use crate::prelude::*;

/// SNS topic and subscription commands.
#[derive(Debug, clap::Parser)]
pub struct SnsCommand {
    #[command(subcommand)]
    pub action: SnsAction,
}

/// Available SNS actions.
#[derive(Debug, clap::Subcommand)]
pub enum SnsAction {
    /// Create a topic. Defaults to the account topic of the current stage.
    Create {
        /// Topic name.
        name: Option<String>,

        /// Skip confirmation prompts.
        #[arg(long)]
        force: bool,
    },

    /// Subscribe an endpoint to a topic.
    Subscribe(SubscribeCommand),

    /// Remove a subscription.
    Unsubscribe {
        /// Subscription ARN.
        subscription_arn: String,

        /// Skip confirmation prompts.
        #[arg(long)]
        force: bool,
    },
}

/// Subscribe an endpoint to a topic.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Subscribe an endpoint to a topic.

Protocols: http, https, email, email-json, sms, sqs, application, lambda,
firehose. For `sqs` the endpoint is the queue ARN (see `xtask sqs url`).")]
pub struct SubscribeCommand {
    /// Endpoint protocol.
    #[arg(long)]
    pub protocol: SubscribeProtocol,

    /// Endpoint to deliver to (URL, e-mail address, ARN...).
    #[arg(long)]
    pub endpoint: String,

    /// Topic name. Defaults to the account topic of the current stage.
    #[arg(long)]
    pub topic: Option<String>,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for sns command.
pub async fn run(command: SnsCommand, global: crate::Global) -> Result<()> {
    match command.action {
        SnsAction::Create { name, force } => run_create(name, force, &global).await,
        SnsAction::Subscribe(cmd) => run_subscribe(cmd, &global).await,
        SnsAction::Unsubscribe {
            subscription_arn,
            force,
        } => run_unsubscribe(subscription_arn, force, &global).await,
    }
}

async fn run_create(name: Option<String>, force: bool, global: &crate::Global) -> Result<()> {
    let (settings, clients) = crate::connect(global).await;
    let name = name.unwrap_or_else(|| settings.account_topic());

    if !global.is_silent() {
        aprintln!("  {}", p_y(&format!("+ {name}")));
        aprintln!();
    }

    confirm("Create this topic?", true, force)?;

    let arn = create_topic(&clients.sns, &name).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_c("ARN:"), arn);
        aprintln!("{}", p_g("Topic created successfully."));
    }
    Ok(())
}

async fn run_subscribe(cmd: SubscribeCommand, global: &crate::Global) -> Result<()> {
    let (settings, clients) = crate::connect(global).await;
    let topic = cmd.topic.unwrap_or_else(|| settings.account_topic());

    let registry = TopicRegistry::load(clients.sns).await?;
    if global.is_verbose() {
        aprintln!("{} {}", p_b("Topics:"), registry.names().join(", "));
    }
    let notification = registry.topic(&topic)?;

    if !global.is_silent() {
        aprintln!(
            "  {}",
            p_y(&format!("+ {} -> {} ({})", topic, cmd.endpoint, cmd.protocol))
        );
        aprintln!();
    }

    confirm("Create this subscription?", true, cmd.force)?;

    let subscription_arn = notification.subscribe(cmd.protocol, &cmd.endpoint).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_c("Subscription:"), subscription_arn);
        aprintln!("{}", p_g("Subscribed successfully."));
    }
    Ok(())
}

async fn run_unsubscribe(
    subscription_arn: String,
    force: bool,
    global: &crate::Global,
) -> Result<()> {
    let (_, clients) = crate::connect(global).await;

    if !global.is_silent() {
        aprintln!("  {}", p_r(&format!("- {subscription_arn}")));
        aprintln!();
    }

    confirm("Remove this subscription?", false, force)?;

    unsubscribe(&clients.sns, &subscription_arn).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Unsubscribed successfully."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_subscribe() {
        let cmd = SubscribeCommand::try_parse_from([
            "subscribe",
            "--protocol",
            "sqs",
            "--endpoint",
            "arn:aws:sqs:us-east-1:123456789012:portfolio-stats",
        ])
        .unwrap();

        assert_eq!(cmd.protocol, SubscribeProtocol::Sqs);
        assert!(cmd.topic.is_none());
    }

    #[test]
    fn test_reject_unknown_protocol() {
        let result = SubscribeCommand::try_parse_from([
            "subscribe",
            "--protocol",
            "ftp",
            "--endpoint",
            "ftp://example.com",
        ]);

        assert!(result.is_err());
    }
}
