//! A minimal LINE Messaging API client: webhook signature checks,
//! the webhook event model, replies and broadcasts.

use async_trait::async_trait;

mod client;
pub mod signature;
pub mod webhook;

pub use client::{ClientInitError, DeliveryError, LineClient, LINE_API_BASE};
pub use webhook::{Event, EventType, Message, ParseError, Source};

/// The operations the lambdas need from the messaging platform.
/// Implemented by [`LineClient`] and by test doubles.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Verifies the webhook signature and parses the body into events.
    fn parse_request(&self, signature: &str, body: &[u8]) -> Result<Vec<Event>, ParseError>;

    /// Replies to an event with a single text message.
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), DeliveryError>;

    /// Sends a text message to every user who added the bot as a friend.
    async fn broadcast_text(&self, text: &str) -> Result<(), DeliveryError>;
}
