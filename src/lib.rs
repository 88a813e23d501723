//! Structured request/response logging for API Gateway proxy Lambda functions.
//!
//! Wrap a handler with [`log_function_handler`] to get an entry for the inbound
//! request, an entry for the outcome (error severity for 4xx/5xx responses) with
//! the elapsed handler time, and optionally the invocation context, the claims
//! and the full response.
//!
//! ```no_run
//! use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
//! use apigw_proxy_logging::{log_function_handler, LoggingOptions};
//! use futures::FutureExt;
//! use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
//!
//! async fn handler(
//!     _: &ApiGatewayProxyRequest,
//!     _: &Context,
//! ) -> Result<ApiGatewayProxyResponse, Error> {
//!     Ok(ApiGatewayProxyResponse {
//!         status_code: 204,
//!         ..Default::default()
//!     })
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let options = LoggingOptions::default();
//!     let options = &options;
//!     let func = service_fn(move |event: LambdaEvent<ApiGatewayProxyRequest>| async move {
//!         log_function_handler(event, |req, ctx| handler(req, ctx).boxed(), options).await
//!     });
//!     lambda_runtime::run(func).await
//! }
//! ```

#![deny(nonstandard_style, rust_2018_idioms)]

mod context;
mod logger;
mod options;
mod proxy;

#[cfg(test)]
mod test_support;

pub use context::InvocationContext;
pub use logger::log_function_handler;
pub use options::{ElapsedFormat, LoggingOptions, LoggingOptionsBuilder, PostAction};
pub use proxy::{ProxyRequest, ProxyResponse};
