use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use line_webhook::config::WebhookConfig;
use line_webhook::gateway::{self, empty_response, text_response};
use line_webhook::line::{ClientInitError, Event, EventType, Message, MessagingApi, ParseError};
use tracing::{debug, error, info};

/// Handles a single webhook invocation.
/// * lookup: returns the value of an environment variable
/// * connect: creates a messaging client from the channel secret and token
///
/// Always returns a response. Delivery errors of individual replies are logged, but do not
/// change the status because LINE would redeliver the whole batch on a non-200 response.
pub(crate) async fn process<C, F>(
    request: &ApiGatewayProxyRequest,
    request_id: &str,
    lookup: impl Fn(&str) -> Option<String>,
    connect: F,
) -> ApiGatewayProxyResponse
where
    C: MessagingApi,
    F: FnOnce(&str, &str) -> Result<C, ClientInitError>,
{
    let config = match WebhookConfig::from_lookup(lookup) {
        Ok(v) => v,
        Err(e) => return text_response(500, e.to_string()),
    };

    info!("Processing Lambda request, id: {request_id}");
    // not used yet, see the push-message lambda
    debug!("Push message function: {}", config.push_message_function);

    let body = match gateway::raw_body(request) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Invalid request body");
            return text_response(500, e.to_string());
        }
    };
    let signature = gateway::signature(request);

    let client = match connect(&config.channel.secret, &config.channel.token) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Initial line bot failed");
            return text_response(500, e.to_string());
        }
    };

    let events = match client.parse_request(signature, &body) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Parse request events failed");
            return match e {
                ParseError::InvalidSignature => empty_response(400),
                ParseError::Payload(_) => empty_response(500),
            };
        }
    };

    info!("This invoke deals with {} messages", events.len());

    for event in &events {
        handle_event(&client, event).await;
    }

    text_response(200, "ok")
}

/// Echoes text messages back to the sender. Everything else is ignored.
async fn handle_event<C: MessagingApi>(client: &C, event: &Event) {
    info!(
        event_type = %event.event_type,
        user_id = event.source.user_id(),
        room_id = event.source.room_id(),
        group_id = event.source.group_id(),
        "event handling"
    );

    match (&event.event_type, &event.message) {
        (EventType::Message, Some(Message::Text { text, .. })) => {
            let reply_token = event.reply_token.as_deref().unwrap_or_default();
            if let Err(e) = client.reply_text(reply_token, text).await {
                error!(error = %e, "Reply message failed");
            }
        }
        (EventType::Message, _) => debug!("Non-text message ignored"),
        (event_type, _) => debug!("Event ignored: {event_type}"),
    }
}
