use lambda_runtime::Context;
use serde::Serialize;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Serializable view of the Lambda invocation context.
#[derive(Serialize, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext<'a> {
    pub request_id: &'a str,
    pub invoked_function_arn: &'a str,
    pub function_name: &'a str,
    pub function_version: &'a str,
    pub memory_limit_mb: i32,
    pub remaining_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_context: Option<Value>,
}

impl<'a> InvocationContext<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            request_id: &ctx.request_id,
            invoked_function_arn: &ctx.invoked_function_arn,
            function_name: &ctx.env_config.function_name,
            function_version: &ctx.env_config.version,
            memory_limit_mb: ctx.env_config.memory,
            remaining_time_ms: remaining_millis(ctx.deadline, SystemTime::now()),
            client_context: ctx
                .client_context
                .as_ref()
                .and_then(|cc| serde_json::to_value(cc).ok()),
        }
    }
}

// The deadline is an epoch timestamp in milliseconds.
fn remaining_millis(deadline: u64, now: SystemTime) -> u64 {
    let now = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    deadline.saturating_sub(now)
}
