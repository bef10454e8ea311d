use aws_lambda_events::event::sqs::SqsEvent;
use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use portfolio_aws::config::load_dotenv;
use portfolio_aws::dynamodb::Table;
use portfolio_aws::repository::DynamoDbStatsRepository;
use portfolio_aws::{AwsClients, Settings};
use portfolio_functions::handlers::handle_stats_queue;
use portfolio_functions::telemetry;

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    load_dotenv();

    let settings = Settings::from_env();
    let clients = AwsClients::from_settings(&settings).await;
    let stats = DynamoDbStatsRepository::new(Table::new(clients.dynamodb, &settings.log_table));

    tracing::info!(table = %settings.log_table, "stats queue handler ready");

    let stats = &stats;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<SqsEvent>| async move {
        let summary = handle_stats_queue(event.payload, stats, Utc::now().timestamp()).await?;
        Ok::<_, Error>(summary)
    }))
    .await
}
