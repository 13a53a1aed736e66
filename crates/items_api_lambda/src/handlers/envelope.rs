use std::collections::BTreeMap;

use items_api_core::contract::{MessageResponse, INTERNAL_ERROR_MESSAGE};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The subset of the API Gateway REST proxy event the handlers read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiGatewayProxyEvent {
    pub http_method: Option<String>,
    pub resource: Option<String>,
    pub path: Option<String>,
    pub path_parameters: Option<BTreeMap<String, Value>>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayProxyEvent {
    pub fn from_value(event: Value) -> Result<Self, String> {
        if !event.is_object() {
            return Err("Request payload must be a JSON object".to_string());
        }
        serde_json::from_value(event).map_err(|error| format!("Malformed proxy event: {error}"))
    }

    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .and_then(Value::as_str)
    }

    pub fn set_path_parameter(&mut self, name: &str, value: impl Into<String>) {
        self.path_parameters
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), Value::String(value.into()));
    }

    /// Decodes the request body. An absent or malformed body decodes to an
    /// empty object so that field validation reports it as a client error.
    pub fn json_body(&self) -> Value {
        match &self.body {
            None | Some(Value::Null) => json!({}),
            Some(Value::String(text)) => serde_json::from_str(text).unwrap_or_else(|_| json!({})),
            Some(other) => other.clone(),
        }
    }
}

pub fn json_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers: json_headers(),
            body,
        },
        Err(_) => internal_error_response(),
    }
}

pub fn message_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    json_response(status_code, MessageResponse::new(message))
}

pub fn internal_error_response() -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 500,
        headers: json_headers(),
        body: json!({ "message": INTERNAL_ERROR_MESSAGE }).to_string(),
    }
}

fn json_headers() -> Value {
    json!({"Content-Type": "application/json"})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_proxy_event_fields() {
        let event = ApiGatewayProxyEvent::from_value(json!({
            "httpMethod": "PUT",
            "resource": "/items/{id}",
            "path": "/items/abc",
            "pathParameters": {"id": "abc"},
            "body": "{\"title\":\"B\"}",
            "isBase64Encoded": false,
            "requestContext": {"stage": "dev"}
        }))
        .expect("event should decode");

        assert_eq!(event.http_method.as_deref(), Some("PUT"));
        assert_eq!(event.path_parameter("id"), Some("abc"));
        assert_eq!(event.json_body(), json!({"title": "B"}));
    }

    #[test]
    fn null_path_parameters_have_no_id() {
        let event = ApiGatewayProxyEvent::from_value(json!({
            "pathParameters": null,
            "body": null
        }))
        .expect("event should decode");

        assert_eq!(event.path_parameter("id"), None);
        assert_eq!(event.json_body(), json!({}));
    }

    #[test]
    fn non_string_path_parameter_reads_as_absent() {
        let event = ApiGatewayProxyEvent::from_value(json!({
            "pathParameters": {"id": 7, "other": null}
        }))
        .expect("event should decode");

        assert_eq!(event.path_parameter("id"), None);
        assert_eq!(event.path_parameter("other"), None);
    }

    #[test]
    fn malformed_body_decodes_to_empty_object() {
        let event = ApiGatewayProxyEvent {
            body: Some(Value::String("{not json".to_string())),
            ..ApiGatewayProxyEvent::default()
        };

        assert_eq!(event.json_body(), json!({}));
    }

    #[test]
    fn direct_object_body_is_used_as_is() {
        let event = ApiGatewayProxyEvent {
            body: Some(json!({"title": "A"})),
            ..ApiGatewayProxyEvent::default()
        };

        assert_eq!(event.json_body(), json!({"title": "A"}));
    }

    #[test]
    fn rejects_non_object_payload() {
        let error = ApiGatewayProxyEvent::from_value(json!([1, 2])).expect_err("array should fail");
        assert_eq!(error, "Request payload must be a JSON object");
    }

    #[test]
    fn internal_error_body_is_generic() {
        let response = internal_error_response();

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "{\"message\":\"Internal Server Error\"}");
        assert_eq!(response.headers["Content-Type"], "application/json");
    }
}
