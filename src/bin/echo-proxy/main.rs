#![deny(clippy::all, clippy::nursery)]
#![deny(nonstandard_style, rust_2018_idioms)]

use apigw_proxy_logging::{log_function_handler, LoggingOptions, ProxyRequest};
use aws_lambda_events::{
    encodings::Body,
    event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse},
};
use futures::{future::BoxFuture, FutureExt};
use http::{header::CONTENT_TYPE, HeaderMap, HeaderValue};
use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use serde_json::{json, Value};
use std::env;
use tracing::{debug, Level};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let level = match env::var("LOG_LEVEL") {
        Ok(level) => level.parse()?,
        Err(_) => Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time() // CloudWatch adds timestamps
        .try_init()?;

    let options = LoggingOptions::builder()
        .with_env()?
        .post_action(record_metrics)
        .build()?;

    debug!("Logging options: {:?}", options);

    let options = &options;
    let func = service_fn(move |event: LambdaEvent<ApiGatewayProxyRequest>| async move {
        log_function_handler(event, handle, options).await
    });
    lambda_runtime::run(func).await
}

fn record_metrics(
    req: &ApiGatewayProxyRequest,
    resp: &ApiGatewayProxyResponse,
    elapsed_ms: f64,
) -> Result<(), Error> {
    debug!(
        target: "metrics",
        method = req.http_method(),
        path = req.path(),
        status_code = resp.status_code,
        elapsed_ms,
        "Request completed"
    );
    Ok(())
}

fn handle<'a>(
    req: &'a ApiGatewayProxyRequest,
    ctx: &'a Context,
) -> BoxFuture<'a, Result<ApiGatewayProxyResponse, Error>> {
    handler(req, ctx).boxed()
}

// Echo the request, or answer with the status code from /status/{code}
async fn handler(
    req: &ApiGatewayProxyRequest,
    ctx: &Context,
) -> Result<ApiGatewayProxyResponse, Error> {
    if let Some(code) = req.path().strip_prefix("/status/") {
        let status_code = match code.parse::<i64>() {
            Ok(code) if (100..=599).contains(&code) => code,
            _ => 400,
        };
        let body = json!({ "status": status_code });
        return Ok(json_response(status_code, body));
    }

    let body = json!({
        "method": req.http_method(),
        "path": req.path(),
        "requestId": ctx.request_id,
    });
    Ok(json_response(200, body))
}

fn json_response(status_code: i64, body: Value) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    ApiGatewayProxyResponse {
        status_code,
        headers,
        body: Some(Body::Text(body.to_string())),
        ..Default::default()
    }
}
