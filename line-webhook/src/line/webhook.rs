//! The webhook event model of the LINE Messaging API.
//! See https://developers.line.biz/en/reference/messaging-api/#webhook-event-objects
//!
//! Only the parts the lambdas act on are modelled in detail. Unknown event types,
//! sources and message kinds are kept as explicit catch-all variants so that
//! new LINE features do not break parsing of the whole batch.

use super::signature;
use crate::json;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed webhook payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// The body of a webhook request.
#[derive(Deserialize, Debug)]
pub struct WebhookPayload {
    /// User ID of the bot that should receive the events
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "json::objects")]
    pub events: Vec<Event>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Single-use token for replying to this event
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default, deserialize_with = "json::object")]
    pub source: Source,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
    /// `active` or `standby`
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub webhook_event_id: Option<String>,
    /// Only present in `message` events
    #[serde(default, deserialize_with = "json::optional_object")]
    pub message: Option<Message>,
}

/// The `type` of a webhook event. Types added to the API after this list
/// keep their name in [`EventType::Unknown`].
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String")]
pub enum EventType {
    Message,
    Unsend,
    Follow,
    Unfollow,
    Join,
    Leave,
    MemberJoined,
    MemberLeft,
    Postback,
    VideoPlayComplete,
    Beacon,
    AccountLink,
    Things,
    Unknown(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Message => "message",
            EventType::Unsend => "unsend",
            EventType::Follow => "follow",
            EventType::Unfollow => "unfollow",
            EventType::Join => "join",
            EventType::Leave => "leave",
            EventType::MemberJoined => "memberJoined",
            EventType::MemberLeft => "memberLeft",
            EventType::Postback => "postback",
            EventType::VideoPlayComplete => "videoPlayComplete",
            EventType::Beacon => "beacon",
            EventType::AccountLink => "accountLink",
            EventType::Things => "things",
            EventType::Unknown(v) => v,
        }
    }
}

impl From<String> for EventType {
    fn from(v: String) -> Self {
        match v.as_str() {
            "message" => EventType::Message,
            "unsend" => EventType::Unsend,
            "follow" => EventType::Follow,
            "unfollow" => EventType::Unfollow,
            "join" => EventType::Join,
            "leave" => EventType::Leave,
            "memberJoined" => EventType::MemberJoined,
            "memberLeft" => EventType::MemberLeft,
            "postback" => EventType::Postback,
            "videoPlayComplete" => EventType::VideoPlayComplete,
            "beacon" => EventType::Beacon,
            "accountLink" => EventType::AccountLink,
            "things" => EventType::Things,
            _ => EventType::Unknown(v),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the event came from. A user ID is only guaranteed for one-on-one chats.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    #[serde(rename_all = "camelCase")]
    User {
        #[serde(default)]
        user_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Group {
        #[serde(default)]
        group_id: String,
        #[serde(default)]
        user_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Room {
        #[serde(default)]
        room_id: String,
        #[serde(default)]
        user_id: Option<String>,
    },
    #[default]
    #[serde(other)]
    Unknown,
}

impl Source {
    /// Returns the user ID or an empty string.
    pub fn user_id(&self) -> &str {
        match self {
            Source::User { user_id } => user_id,
            Source::Group { user_id, .. } | Source::Room { user_id, .. } => user_id.as_deref().unwrap_or_default(),
            Source::Unknown => "",
        }
    }

    /// Returns the room ID or an empty string.
    pub fn room_id(&self) -> &str {
        match self {
            Source::Room { room_id, .. } => room_id,
            _ => "",
        }
    }

    /// Returns the group ID or an empty string.
    pub fn group_id(&self) -> &str {
        match self {
            Source::Group { group_id, .. } => group_id,
            _ => "",
        }
    }
}

/// The message of a `message` event.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    #[serde(rename_all = "camelCase")]
    Text {
        #[serde(default)]
        id: String,
        #[serde(default)]
        text: String,
        #[serde(default)]
        quote_token: Option<String>,
    },
    Image {
        #[serde(default)]
        id: String,
    },
    Video {
        #[serde(default)]
        id: String,
    },
    Audio {
        #[serde(default)]
        id: String,
    },
    #[serde(rename_all = "camelCase")]
    File {
        #[serde(default)]
        id: String,
        #[serde(default)]
        file_name: String,
        #[serde(default)]
        file_size: u64,
    },
    Location {
        #[serde(default)]
        id: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        address: Option<String>,
        #[serde(default)]
        latitude: f64,
        #[serde(default)]
        longitude: f64,
    },
    #[serde(rename_all = "camelCase")]
    Sticker {
        #[serde(default)]
        id: String,
        #[serde(default)]
        package_id: String,
        #[serde(default)]
        sticker_id: String,
    },
    #[serde(other)]
    Unsupported,
}

/// Verifies the signature of `body` and parses it into a list of events.
pub fn parse_request(channel_secret: &str, signature: &str, body: &[u8]) -> Result<Vec<Event>, ParseError> {
    if !signature::verify(channel_secret, signature, body) {
        return Err(ParseError::InvalidSignature);
    }

    let payload: WebhookPayload = json::from_slice(body)?;

    Ok(payload.events)
}
