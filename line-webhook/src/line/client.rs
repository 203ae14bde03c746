use super::webhook::{self, Event, ParseError};
use super::MessagingApi;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// The production endpoint of the Messaging API.
pub const LINE_API_BASE: &str = "https://api.line.me";

#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    #[error("missing channel secret")]
    MissingChannelSecret,
    #[error("missing channel access token")]
    MissingChannelToken,
    #[error("failed to build the http client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("line api request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("line api error {status}: {message}")]
    Api { status: u16, message: String },
}

/// A message object as sent to the Messaging API.
#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OutgoingMessage<'a> {
    Text { text: &'a str },
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<OutgoingMessage<'a>>,
}

#[derive(Serialize, Debug)]
struct BroadcastRequest<'a> {
    messages: Vec<OutgoingMessage<'a>>,
}

/// Error body returned by the Messaging API, e.g. `{"message":"Invalid reply token"}`
#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    message: String,
}

/// A client for a single LINE channel.
pub struct LineClient {
    channel_secret: String,
    channel_token: String,
    endpoint: String,
    http: reqwest::Client,
}

impl LineClient {
    /// Creates a client talking to the production Messaging API.
    pub fn new(channel_secret: &str, channel_token: &str) -> Result<Self, ClientInitError> {
        Self::with_endpoint(channel_secret, channel_token, LINE_API_BASE)
    }

    /// Creates a client for a custom API base URL, e.g. a local mock server.
    /// Both credentials must be non-empty.
    pub fn with_endpoint(channel_secret: &str, channel_token: &str, endpoint: &str) -> Result<Self, ClientInitError> {
        if channel_secret.is_empty() {
            return Err(ClientInitError::MissingChannelSecret);
        }
        if channel_token.is_empty() {
            return Err(ClientInitError::MissingChannelToken);
        }

        Ok(Self {
            channel_secret: channel_secret.to_owned(),
            channel_token: channel_token.to_owned(),
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            http: reqwest::Client::builder().build()?,
        })
    }

    /// POSTs `body` to the API path and maps non-2xx responses into errors.
    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), DeliveryError> {
        let url = [self.endpoint.as_str(), path].concat();
        debug!("POST {url}");

        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.channel_token)
            .json(body)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }

        Err(api_error(status.as_u16(), res.text().await))
    }
}

/// LINE returns a JSON error body, but proxies in between may not.
fn api_error(status: u16, body: Result<String, impl Display>) -> DeliveryError {
    let body = match body {
        Ok(v) => v,
        Err(e) => {
            debug!("Failed to read the error body: {e}");
            format!("unreadable response body: {e}")
        }
    };

    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(v) => v.message,
        Err(_) => body,
    };

    DeliveryError::Api { status, message }
}

#[async_trait]
impl MessagingApi for LineClient {
    fn parse_request(&self, signature: &str, body: &[u8]) -> Result<Vec<Event>, ParseError> {
        webhook::parse_request(&self.channel_secret, signature, body)
    }

    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), DeliveryError> {
        let req = ReplyRequest {
            reply_token,
            messages: vec![OutgoingMessage::Text { text }],
        };
        self.post("/v2/bot/message/reply", &req).await
    }

    async fn broadcast_text(&self, text: &str) -> Result<(), DeliveryError> {
        let req = BroadcastRequest {
            messages: vec![OutgoingMessage::Text { text }],
        };
        self.post("/v2/bot/message/broadcast", &req).await
    }
}
