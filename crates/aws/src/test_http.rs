//! Canned HTTP responses for driving the SDK clients in unit tests.
//!
//! [`CannedHttp`] plugs into an SDK config as its HTTP client. Every request
//! the client sends is recorded and answered by a closure with a status code
//! and a wire-format body, so the SDK serializers and deserializers still run.

use std::fmt;
use std::sync::{Arc, Mutex};

use aws_smithy_runtime_api::client::http::{
    HttpClient, HttpConnector, HttpConnectorFuture, HttpConnectorSettings, SharedHttpConnector,
};
use aws_smithy_runtime_api::client::orchestrator::{HttpRequest, HttpResponse};
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_runtime_api::http::StatusCode;
use aws_smithy_types::body::SdkBody;

const ENDPOINT: &str = "http://127.0.0.1:1";

/// A request as the tests see it: the operation name and the raw body.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub operation: String,
    pub body: String,
}

impl SentRequest {
    fn from_http(request: &HttpRequest) -> Self {
        let body = request
            .body()
            .bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default();

        // JSON protocols name the operation in X-Amz-Target, query protocols
        // in the Action form field.
        let operation = match request.headers().get("x-amz-target") {
            Some(target) => target.rsplit('.').next().unwrap_or(target).to_string(),
            None => form_field(&body, "Action").unwrap_or_default().to_string(),
        };

        Self { operation, body }
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or_default()
    }

    pub fn form_field(&self, name: &str) -> Option<&str> {
        form_field(&self.body, name)
    }
}

fn form_field<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    body.split('&')
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

type Responder = dyn Fn(&SentRequest) -> (u16, String) + Send + Sync;

#[derive(Clone)]
pub struct CannedHttp {
    respond: Arc<Responder>,
    sent: Arc<Mutex<Vec<SentRequest>>>,
}

impl CannedHttp {
    pub fn new(respond: impl Fn(&SentRequest) -> (u16, String) + Send + Sync + 'static) -> Self {
        Self {
            respond: Arc::new(respond),
            sent: Arc::default(),
        }
    }

    /// Every request sent so far, oldest first.
    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, operation: &str) -> Vec<SentRequest> {
        self.sent()
            .into_iter()
            .filter(|request| request.operation == operation)
            .collect()
    }

    pub fn dynamodb(&self) -> aws_sdk_dynamodb::Client {
        use aws_sdk_dynamodb::config::retry::RetryConfig;
        use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};

        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url(ENDPOINT)
            .retry_config(RetryConfig::disabled())
            .http_client(self.clone())
            .build();
        aws_sdk_dynamodb::Client::from_conf(config)
    }

    pub fn sqs(&self) -> aws_sdk_sqs::Client {
        use aws_sdk_sqs::config::retry::RetryConfig;
        use aws_sdk_sqs::config::{BehaviorVersion, Credentials, Region};

        let config = aws_sdk_sqs::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url(ENDPOINT)
            .retry_config(RetryConfig::disabled())
            .http_client(self.clone())
            .build();
        aws_sdk_sqs::Client::from_conf(config)
    }

    pub fn sns(&self) -> aws_sdk_sns::Client {
        use aws_sdk_sns::config::retry::RetryConfig;
        use aws_sdk_sns::config::{BehaviorVersion, Credentials, Region};

        let config = aws_sdk_sns::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url(ENDPOINT)
            .retry_config(RetryConfig::disabled())
            .http_client(self.clone())
            .build();
        aws_sdk_sns::Client::from_conf(config)
    }
}

impl fmt::Debug for CannedHttp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CannedHttp")
            .field("sent", &self.sent.lock().map(|sent| sent.len()).unwrap_or(0))
            .finish()
    }
}

impl HttpConnector for CannedHttp {
    fn call(&self, request: HttpRequest) -> HttpConnectorFuture {
        let sent = SentRequest::from_http(&request);
        let (status, body) = (self.respond)(&sent);
        self.sent.lock().unwrap().push(sent);

        let content_type = if body.starts_with('<') {
            "text/xml"
        } else {
            "application/x-amz-json-1.0"
        };
        let status = StatusCode::try_from(status).expect("valid status code");
        let mut response = HttpResponse::new(status, SdkBody::from(body));
        response.headers_mut().insert("content-type", content_type);

        HttpConnectorFuture::ready(Ok(response))
    }
}

impl HttpClient for CannedHttp {
    fn http_connector(
        &self,
        _settings: &HttpConnectorSettings,
        _components: &RuntimeComponents,
    ) -> SharedHttpConnector {
        SharedHttpConnector::new(self.clone())
    }
}

/// A 200 response with a JSON body.
pub fn ok_json(body: serde_json::Value) -> (u16, String) {
    (200, body.to_string())
}

/// A DynamoDB service error in the awsJson wire shape.
pub fn dynamodb_error(status: u16, code: &str) -> (u16, String) {
    let body = serde_json::json!({
        "__type": format!("com.amazonaws.dynamodb.v20120810#{code}"),
        "message": code,
    });
    (status, body.to_string())
}
