use crate::{
    context::InvocationContext,
    options::LoggingOptions,
    proxy::{ProxyRequest, ProxyResponse},
};
use futures::future::BoxFuture;
use lambda_runtime::{Context, LambdaEvent};
use serde::Serialize;
use std::fmt;
use tokio::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};

/// Wraps a proxy handler invocation with request and response logging.
///
/// Logs the method and path of the request, runs `handler`, and logs the
/// outcome together with the elapsed handler time: at error level for status
/// codes >= 400 and at info level otherwise. The invocation context, the claims
/// and the full response are logged too when enabled in `options`. The post
/// action, if any, runs last.
///
/// The response is returned unchanged. A handler error is logged once at error
/// level and returned as is.
pub async fn log_function_handler<Req, Resp, E, F>(
    event: LambdaEvent<Req>,
    handler: F,
    options: &LoggingOptions<Req, Resp>,
) -> Result<Resp, E>
where
    Req: ProxyRequest,
    Resp: ProxyResponse,
    E: fmt::Display,
    F: for<'a> FnOnce(&'a Req, &'a Context) -> BoxFuture<'a, Result<Resp, E>>,
{
    let span = info_span!("proxy_request", request_id = %event.context.request_id);
    invoke(event, handler, options).instrument(span).await
}

async fn invoke<Req, Resp, E, F>(
    event: LambdaEvent<Req>,
    handler: F,
    options: &LoggingOptions<Req, Resp>,
) -> Result<Resp, E>
where
    Req: ProxyRequest,
    Resp: ProxyResponse,
    E: fmt::Display,
    F: for<'a> FnOnce(&'a Req, &'a Context) -> BoxFuture<'a, Result<Resp, E>>,
{
    let LambdaEvent {
        payload: request,
        context,
    } = event;
    let method = request.http_method();
    let path = request.path();

    info!(method, path, "Request - {} - {}", method, path);

    if options.log_invocation_context {
        let invocation = InvocationContext::new(&context);
        let (request_json, context_json) = (Json(&request), Json(&invocation));
        match request.claims().map(Json) {
            Some(claims) => info!(
                request = %request_json,
                context = %context_json,
                claims = %claims,
                "ProxyRequest: {}. Context: {}. Claims: {}",
                request_json,
                context_json,
                claims
            ),
            None => info!(
                request = %request_json,
                context = %context_json,
                "ProxyRequest: {}. Context: {}",
                request_json,
                context_json
            ),
        }
    }

    let start = Instant::now();
    let result = handler(&request, &context).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let elapsed = options.elapsed_format.render(elapsed_ms);

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            error!(
                method,
                path,
                elapsed_ms,
                error = %err,
                "Request - {} - {} failed after {} ms: {}",
                method,
                path,
                elapsed,
                err
            );
            return Err(err);
        }
    };

    let status_code = response.status_code();
    if response.is_error() {
        error!(
            method,
            path,
            status_code,
            elapsed_ms,
            "Response - {} - {} responded {} in {} ms",
            method,
            path,
            status_code,
            elapsed
        );
    } else {
        info!(
            method,
            path,
            status_code,
            elapsed_ms,
            "Response - {} - {} responded {} in {} ms",
            method,
            path,
            status_code,
            elapsed
        );
    }

    if options.log_response {
        let response_json = Json(&response);
        info!(response = %response_json, "ProxyResponse: {}", response_json);
    }

    if let Some(action) = &options.post_action {
        if let Err(err) = action(&request, &response, elapsed_ms) {
            warn!(error = %err, "Post action failed");
        }
    }

    Ok(response)
}

// Renders a value as JSON in a log field without failing the call.
struct Json<'a, T>(&'a T);

impl<T: Serialize> fmt::Display for Json<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self.0) {
            Ok(json) => f.write_str(&json),
            Err(err) => write!(f, "<not serializable: {}>", err),
        }
    }
}
