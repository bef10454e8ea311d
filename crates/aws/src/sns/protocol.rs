use std::fmt;
use std::str::FromStr;

use crate::error::AwsError;

/// Endpoint protocols a topic subscription accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeProtocol {
    Http,
    Https,
    Email,
    EmailJson,
    Sms,
    Sqs,
    Application,
    Lambda,
    Firehose,
}

impl SubscribeProtocol {
    pub const ALL: [SubscribeProtocol; 9] = [
        SubscribeProtocol::Http,
        SubscribeProtocol::Https,
        SubscribeProtocol::Email,
        SubscribeProtocol::EmailJson,
        SubscribeProtocol::Sms,
        SubscribeProtocol::Sqs,
        SubscribeProtocol::Application,
        SubscribeProtocol::Lambda,
        SubscribeProtocol::Firehose,
    ];

    /// The protocol name SNS expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscribeProtocol::Http => "http",
            SubscribeProtocol::Https => "https",
            SubscribeProtocol::Email => "email",
            SubscribeProtocol::EmailJson => "email-json",
            SubscribeProtocol::Sms => "sms",
            SubscribeProtocol::Sqs => "sqs",
            SubscribeProtocol::Application => "application",
            SubscribeProtocol::Lambda => "lambda",
            SubscribeProtocol::Firehose => "firehose",
        }
    }
}

impl fmt::Display for SubscribeProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscribeProtocol {
    type Err = AwsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|protocol| protocol.as_str() == s)
            .ok_or_else(|| AwsError::InvalidProtocol(s.to_string()))
    }
}
