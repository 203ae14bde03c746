/// Broadcasts the message from the request body to every subscriber of the LINE bot.
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use line_webhook::config::ChannelConfig;
use line_webhook::gateway;
use line_webhook::line::LineClient;
use line_webhook::logging::init_tracing;

mod handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    lambda_runtime::run(service_fn(my_handler)).await
}

async fn my_handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let (request, ctx) = event.into_parts();
    let request_id = gateway::request_id(&request).unwrap_or(ctx.request_id.as_str());

    Ok(handler::process(&request, request_id, ChannelConfig::from_env_unchecked, LineClient::new).await)
}
