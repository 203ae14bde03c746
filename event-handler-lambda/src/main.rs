/// Receives LINE webhook events via API Gateway and echoes text messages back to the sender.
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use line_webhook::gateway;
use line_webhook::line::LineClient;
use line_webhook::logging::init_tracing;
use std::env::var;

mod handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    lambda_runtime::run(service_fn(my_handler)).await
}

async fn my_handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let (request, ctx) = event.into_parts();

    // the API Gateway ID is the one that shows up in the access logs
    let request_id = gateway::request_id(&request).unwrap_or(ctx.request_id.as_str());

    Ok(handler::process(&request, request_id, |name| var(name).ok(), LineClient::new).await)
}
