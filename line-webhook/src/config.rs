use std::env::var;

pub const CHANNEL_SECRET: &str = "CHANNEL_SECRET";
pub const CHANNEL_TOKEN: &str = "CHANNEL_TOKEN";
pub const PUSH_MESSAGE_LAMBDA_ARN: &str = "PUSH_MESSAGE_LAMBDA_ARN";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Credentials of the LINE channel the bot belongs to.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Used as the HMAC key for webhook signatures
    pub secret: String,
    /// Long-lived channel access token for the Messaging API
    pub token: String,
}

impl ChannelConfig {
    /// Reads the channel credentials from the environment variables.
    /// Missing values become empty strings and are rejected later by the client.
    pub fn from_env_unchecked() -> Self {
        Self::from_lookup_unchecked(|name| var(name).ok())
    }

    pub fn from_lookup_unchecked(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            secret: lookup(CHANNEL_SECRET).unwrap_or_default(),
            token: lookup(CHANNEL_TOKEN).unwrap_or_default(),
        }
    }
}

/// Configuration of the webhook event handler. All values are required.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub channel: ChannelConfig,
    /// ARN of the push-message lambda, e.g. arn:aws:lambda:ap-northeast-1:123456789012:function:push-message
    pub push_message_function: String,
}

impl WebhookConfig {
    /// Creates a new instance from the environment variables.
    /// Returns the name of the first missing variable as an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| var(name).ok())
    }

    /// Same as `from_env`, but reads the values through `lookup`.
    /// Only presence is checked, an empty value is accepted.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let secret = required(CHANNEL_SECRET)?;
        let token = required(CHANNEL_TOKEN)?;
        let push_message_function = required(PUSH_MESSAGE_LAMBDA_ARN)?;

        Ok(Self {
            channel: ChannelConfig { secret, token },
            push_message_function,
        })
    }
}
