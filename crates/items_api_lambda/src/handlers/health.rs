use items_api_core::contract::HELLO_MESSAGE;
use serde_json::json;

use crate::handlers::envelope::{message_response, ApiGatewayProxyEvent, ApiGatewayResponse};
use crate::logging::log_info;

pub fn hello(event: &ApiGatewayProxyEvent) -> ApiGatewayResponse {
    log_info(
        "health_handler",
        "hello_invoked",
        json!({ "path": event.path.clone() }),
    );
    message_response(200, HELLO_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_is_always_ok() {
        let response = hello(&ApiGatewayProxyEvent::default());

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "{\"message\":\"Hello from Lambda!\"}");
    }
}
