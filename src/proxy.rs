use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use serde::Serialize;
use serde_json::Value;

/// The parts of an inbound proxy request that get logged.
pub trait ProxyRequest: Serialize {
    fn http_method(&self) -> &str;

    /// Resource path; empty when the event carries none.
    fn path(&self) -> &str;

    /// Authorization claims attached by the authorizer, if any.
    fn claims(&self) -> Option<&Value>;
}

/// The parts of a proxy response that get logged.
pub trait ProxyResponse: Serialize {
    fn status_code(&self) -> i64;

    fn is_error(&self) -> bool {
        self.status_code() >= 400
    }
}

impl ProxyRequest for ApiGatewayProxyRequest {
    fn http_method(&self) -> &str {
        self.http_method.as_str()
    }

    fn path(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }

    fn claims(&self) -> Option<&Value> {
        self.request_context.authorizer.get("claims")
    }
}

impl ProxyResponse for ApiGatewayProxyResponse {
    fn status_code(&self) -> i64 {
        self.status_code
    }
}
