use serde_json::json;

use crate::adapters::item_store::ItemStore;
use crate::handlers::envelope::{message_response, ApiGatewayProxyEvent, ApiGatewayResponse};
use crate::handlers::health::hello;
use crate::handlers::items::{
    create_item, delete_item, get_item, list_items, update_item, InvocationContext,
};
use crate::logging::log_info;

pub const ROOT_RESOURCE: &str = "/";
pub const ITEMS_RESOURCE: &str = "/items";
pub const ITEM_RESOURCE: &str = "/items/{id}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Hello,
    CreateItem,
    ListItems,
    GetItem,
    UpdateItem,
    DeleteItem,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::CreateItem => "create_item",
            Self::ListItems => "list_items",
            Self::GetItem => "get_item",
            Self::UpdateItem => "update_item",
            Self::DeleteItem => "delete_item",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    NotFound,
    MethodNotAllowed,
}

pub fn resolve_route(method: &str, resource: &str) -> Result<Operation, RouteError> {
    let method = method.to_ascii_uppercase();
    match (resource, method.as_str()) {
        (ROOT_RESOURCE, "GET") => Ok(Operation::Hello),
        (ITEMS_RESOURCE, "POST") => Ok(Operation::CreateItem),
        (ITEMS_RESOURCE, "GET") => Ok(Operation::ListItems),
        (ITEM_RESOURCE, "GET") => Ok(Operation::GetItem),
        (ITEM_RESOURCE, "PUT") => Ok(Operation::UpdateItem),
        (ITEM_RESOURCE, "DELETE") => Ok(Operation::DeleteItem),
        (ROOT_RESOURCE | ITEMS_RESOURCE | ITEM_RESOURCE, _) => Err(RouteError::MethodNotAllowed),
        _ => Err(RouteError::NotFound),
    }
}

/// Maps a concrete request path onto its resource template, returning the
/// `{id}` segment when the path addresses a single item.
pub fn resource_for_path(path: &str) -> (String, Option<String>) {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return (ROOT_RESOURCE.to_string(), None);
    }

    match trimmed.strip_prefix("/items/") {
        Some(id) if !id.is_empty() && !id.contains('/') => {
            (ITEM_RESOURCE.to_string(), Some(id.to_string()))
        }
        _ => (trimmed.to_string(), None),
    }
}

pub async fn dispatch(
    operation: Operation,
    event: &ApiGatewayProxyEvent,
    store: &impl ItemStore,
    context: &InvocationContext,
) -> ApiGatewayResponse {
    match operation {
        Operation::Hello => hello(event),
        Operation::CreateItem => create_item(event, store, context).await,
        Operation::ListItems => list_items(store).await,
        Operation::GetItem => get_item(event, store).await,
        Operation::UpdateItem => update_item(event, store, context).await,
        Operation::DeleteItem => delete_item(event, store).await,
    }
}

/// Resolves the operation from the event's method and resource, then
/// dispatches it. Used when one function serves every route.
pub async fn route_event(
    mut event: ApiGatewayProxyEvent,
    store: &impl ItemStore,
    context: &InvocationContext,
) -> ApiGatewayResponse {
    let method = event.http_method.clone().unwrap_or_default();
    let resource = match (event.resource.clone(), event.path.clone()) {
        (Some(resource), _) => resource,
        (None, Some(path)) => {
            let (resource, id) = resource_for_path(&path);
            let has_id = event.path_parameter("id").is_some();
            if let Some(id) = id.filter(|_| !has_id) {
                event.set_path_parameter("id", id);
            }
            resource
        }
        (None, None) => String::new(),
    };

    match resolve_route(&method, &resource) {
        Ok(operation) => dispatch(operation, &event, store, context).await,
        Err(error) => {
            log_info(
                "router",
                "route_rejected",
                json!({
                    "method": method,
                    "resource": resource,
                    "reason": format!("{error:?}"),
                }),
            );
            match error {
                RouteError::NotFound => message_response(404, "Route not found"),
                RouteError::MethodNotAllowed => message_response(405, "Method not allowed"),
            }
        }
    }
}
