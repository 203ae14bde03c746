use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use line_webhook::config::ChannelConfig;
use line_webhook::gateway::{self, text_response};
use line_webhook::json;
use line_webhook::line::{ClientInitError, MessagingApi};
use serde::Deserialize;
use tracing::{error, info};

/// The expected request body, e.g. `{"message":"hello"}`
#[derive(Deserialize, Debug)]
pub(crate) struct PushRequest {
    pub message: String,
}

/// Handles a single push invocation.
/// * load_config: reads the channel credentials, called only after the body is validated
/// * connect: creates a messaging client from the channel secret and token
pub(crate) async fn process<C, F>(
    request: &ApiGatewayProxyRequest,
    request_id: &str,
    load_config: impl FnOnce() -> ChannelConfig,
    connect: F,
) -> ApiGatewayProxyResponse
where
    C: MessagingApi,
    F: FnOnce(&str, &str) -> Result<C, ClientInitError>,
{
    info!("Processing Lambda request, id: {request_id}");

    let push_request = match parse_body(request) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "Error parsing request body");
            return text_response(400, "Bad Request");
        }
    };

    let config = load_config();
    let client = match connect(&config.secret, &config.token) {
        Ok(v) => v,
        Err(e) => {
            error!("Error initializing LINE bot client: {e}");
            return text_response(500, "Internal Server Error");
        }
    };

    // broadcasts count towards the monthly message quota of the channel
    if let Err(e) = client.broadcast_text(&push_request.message).await {
        error!(error = %e, "Error broadcasting message");
        return text_response(500, "Failed to send message");
    }

    text_response(200, "ok")
}

fn parse_body(request: &ApiGatewayProxyRequest) -> Result<PushRequest, Box<dyn std::error::Error + Send + Sync>> {
    let body = gateway::raw_body(request)?;
    Ok(json::from_slice(&body)?)
}
