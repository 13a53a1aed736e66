use std::future::Future;

use serde_json::json;

use crate::handlers::envelope::{internal_error_response, ApiGatewayResponse};
use crate::logging::log_error;

/// Runs one invocation on its own task so that a panic anywhere in the
/// pipeline still produces a 500 envelope.
pub async fn run_guarded<F>(operation: &str, invocation: F) -> ApiGatewayResponse
where
    F: Future<Output = ApiGatewayResponse> + Send + 'static,
{
    match tokio::spawn(invocation).await {
        Ok(response) => response,
        Err(error) => {
            log_error(
                "invocation_guard",
                "invocation_aborted",
                json!({
                    "operation": operation,
                    "panicked": error.is_panic(),
                    "error": error.to_string(),
                }),
            );
            internal_error_response()
        }
    }
}
