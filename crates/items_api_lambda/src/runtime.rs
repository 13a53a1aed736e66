use aws_config::BehaviorVersion;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};

use crate::adapters::dynamodb::DynamoDbItemStore;
use crate::adapters::item_store::ItemStore;
use crate::config::ItemsConfig;
use crate::handlers::envelope::{
    internal_error_response, ApiGatewayProxyEvent, ApiGatewayResponse,
};
use crate::handlers::guard::run_guarded;
use crate::handlers::items::InvocationContext;
use crate::handlers::router::{dispatch, route_event, Operation};
use crate::logging::{log_error, log_info};

const ROUTER_LABEL: &str = "router";

/// Starts the Lambda event loop. `pinned` fixes the operation for
/// single-purpose functions; `None` routes each event by method and resource.
pub async fn serve(pinned: Option<Operation>) -> Result<(), Error> {
    let config = ItemsConfig::from_env()?;
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = DynamoDbItemStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name,
    );

    log_info(
        "runtime",
        "cold_start",
        json!({
            "operation": operation_label(pinned),
            "table_name": store.table_name(),
        }),
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let store = store.clone();
        async move {
            Ok::<ApiGatewayResponse, Error>(
                handle_invocation(pinned, event.payload, store).await,
            )
        }
    }))
    .await
}

pub async fn handle_invocation<S>(
    pinned: Option<Operation>,
    payload: Value,
    store: S,
) -> ApiGatewayResponse
where
    S: ItemStore + 'static,
{
    let label = operation_label(pinned);
    let event = match ApiGatewayProxyEvent::from_value(payload) {
        Ok(value) => value,
        Err(message) => {
            log_error(
                "runtime",
                "invalid_event",
                json!({ "operation": label, "error": message }),
            );
            return internal_error_response();
        }
    };
    let context = InvocationContext::now();

    run_guarded(label, async move {
        match pinned {
            Some(operation) => dispatch(operation, &event, &store, &context).await,
            None => route_event(event, &store, &context).await,
        }
    })
    .await
}

fn operation_label(pinned: Option<Operation>) -> &'static str {
    pinned.map(Operation::as_str).unwrap_or(ROUTER_LABEL)
}
