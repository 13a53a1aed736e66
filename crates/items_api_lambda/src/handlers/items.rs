use chrono::{SecondsFormat, Utc};
use items_api_core::contract::{
    parse_title_input, require_item_id, DeletedItemResponse, Item, ItemListResponse,
    ItemResponse, ValidationError, ITEM_CREATED_MESSAGE, ITEM_DELETED_MESSAGE,
    ITEM_NOT_FOUND_MESSAGE, ITEM_RETRIEVED_MESSAGE, ITEM_UPDATED_MESSAGE,
};
use serde_json::json;
use uuid::Uuid;

use crate::adapters::item_store::{ItemStore, StoreError};
use crate::handlers::envelope::{
    internal_error_response, json_response, message_response, ApiGatewayProxyEvent,
    ApiGatewayResponse,
};
use crate::logging::{log_error, log_info};

const COMPONENT: &str = "item_handler";
const ID_PARAMETER: &str = "id";

/// Per-invocation inputs that are not part of the request itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub event_time: String,
}

impl InvocationContext {
    pub fn now() -> Self {
        Self {
            event_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemHandlerError {
    Validation(ValidationError),
    NotFound,
    Store(StoreError),
}

impl From<ValidationError> for ItemHandlerError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl From<StoreError> for ItemHandlerError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}

pub async fn create_item(
    event: &ApiGatewayProxyEvent,
    store: &impl ItemStore,
    context: &InvocationContext,
) -> ApiGatewayResponse {
    respond("create_item", create(event, store, context).await)
}

pub async fn get_item(
    event: &ApiGatewayProxyEvent,
    store: &impl ItemStore,
) -> ApiGatewayResponse {
    respond("get_item", get(event, store).await)
}

pub async fn list_items(store: &impl ItemStore) -> ApiGatewayResponse {
    respond("list_items", list(store).await)
}

pub async fn update_item(
    event: &ApiGatewayProxyEvent,
    store: &impl ItemStore,
    context: &InvocationContext,
) -> ApiGatewayResponse {
    respond("update_item", update(event, store, context).await)
}

pub async fn delete_item(
    event: &ApiGatewayProxyEvent,
    store: &impl ItemStore,
) -> ApiGatewayResponse {
    respond("delete_item", delete(event, store).await)
}

async fn create(
    event: &ApiGatewayProxyEvent,
    store: &impl ItemStore,
    context: &InvocationContext,
) -> Result<ApiGatewayResponse, ItemHandlerError> {
    let input = parse_title_input(&event.json_body())?;
    let item = Item::new(
        Uuid::new_v4().to_string(),
        input.title,
        context.event_time.clone(),
    );

    store.put(&item).await?;

    log_info(COMPONENT, "item_created", json!({ "id": item.id.clone() }));
    Ok(json_response(
        201,
        ItemResponse {
            message: ITEM_CREATED_MESSAGE.to_string(),
            item,
        },
    ))
}

async fn get(
    event: &ApiGatewayProxyEvent,
    store: &impl ItemStore,
) -> Result<ApiGatewayResponse, ItemHandlerError> {
    let id = require_item_id(event.path_parameter(ID_PARAMETER))?;
    let item = store.get(id).await?.ok_or(ItemHandlerError::NotFound)?;

    Ok(json_response(
        200,
        ItemResponse {
            message: ITEM_RETRIEVED_MESSAGE.to_string(),
            item,
        },
    ))
}

async fn list(store: &impl ItemStore) -> Result<ApiGatewayResponse, ItemHandlerError> {
    let items = store.scan().await?;
    Ok(json_response(200, ItemListResponse::from_items(items)))
}

async fn update(
    event: &ApiGatewayProxyEvent,
    store: &impl ItemStore,
    context: &InvocationContext,
) -> Result<ApiGatewayResponse, ItemHandlerError> {
    let id = require_item_id(event.path_parameter(ID_PARAMETER))?;
    let input = parse_title_input(&event.json_body())?;

    let item = store
        .update_title(id, &input.title, &context.event_time)
        .await?
        .ok_or(ItemHandlerError::NotFound)?;

    log_info(COMPONENT, "item_updated", json!({ "id": id }));
    Ok(json_response(
        200,
        ItemResponse {
            message: ITEM_UPDATED_MESSAGE.to_string(),
            item,
        },
    ))
}

async fn delete(
    event: &ApiGatewayProxyEvent,
    store: &impl ItemStore,
) -> Result<ApiGatewayResponse, ItemHandlerError> {
    let id = require_item_id(event.path_parameter(ID_PARAMETER))?;

    if !store.delete(id).await? {
        return Err(ItemHandlerError::NotFound);
    }

    log_info(COMPONENT, "item_deleted", json!({ "id": id }));
    Ok(json_response(
        200,
        DeletedItemResponse {
            message: ITEM_DELETED_MESSAGE.to_string(),
            id: id.to_string(),
        },
    ))
}

fn respond(
    operation: &str,
    result: Result<ApiGatewayResponse, ItemHandlerError>,
) -> ApiGatewayResponse {
    match result {
        Ok(response) => response,
        Err(ItemHandlerError::Validation(error)) => message_response(400, error.message()),
        Err(ItemHandlerError::NotFound) => message_response(404, ITEM_NOT_FOUND_MESSAGE),
        Err(ItemHandlerError::Store(error)) => {
            log_error(
                COMPONENT,
                &format!("{operation}_failed"),
                json!({ "error": error.message() }),
            );
            internal_error_response()
        }
    }
}
