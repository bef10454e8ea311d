use aws_lambda_events::event::dynamodb::Event;
use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use portfolio_aws::config::load_dotenv;
use portfolio_aws::repository::SnsAccountPublisher;
use portfolio_aws::{AwsClients, Settings};
use portfolio_functions::handlers::handle_account_stream;
use portfolio_functions::telemetry;

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    load_dotenv();

    let settings = Settings::from_env();
    let clients = AwsClients::from_settings(&settings).await;
    let publisher = SnsAccountPublisher::for_stage(clients.sns, &settings.stage).await?;

    tracing::info!(topic = %publisher.topic(), "account stream handler ready");

    let publisher = &publisher;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Event>| async move {
        let summary =
            handle_account_stream(event.payload, publisher, Utc::now().timestamp()).await?;
        Ok::<_, Error>(summary)
    }))
    .await
}
