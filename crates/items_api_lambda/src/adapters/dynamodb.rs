use std::collections::HashMap;

use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use items_api_core::contract::Item;
use items_api_core::item_attributes::{
    item_exists_condition, update_title_attribute_names, update_title_expression, ItemAttribute,
    PARTITION_KEY,
};

use crate::adapters::item_store::{ItemStore, StoreError};

type Attributes = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub struct DynamoDbItemStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbItemStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl ItemStore for DynamoDbItemStore {
    async fn get(&self, id: &str) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY.as_str(), key_value(id))
            .consistent_read(true)
            .send()
            .await
            .map_err(|error| {
                StoreError::new(format!("failed to get item from dynamodb: {error}"))
            })?;

        output.item().map(item_from_attributes).transpose()
    }

    async fn put(&self, item: &Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map(|_| ())
            .map_err(|error| StoreError::new(format!("failed to put item to dynamodb: {error}")))
    }

    async fn update_title(
        &self,
        id: &str,
        title: &str,
        updated_at: &str,
    ) -> Result<Option<Item>, StoreError> {
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY.as_str(), key_value(id))
            .update_expression(update_title_expression())
            .condition_expression(item_exists_condition())
            .expression_attribute_values(
                ItemAttribute::Title.value_placeholder(),
                AttributeValue::S(title.to_string()),
            )
            .expression_attribute_values(
                ItemAttribute::UpdatedAt.value_placeholder(),
                AttributeValue::S(updated_at.to_string()),
            )
            .return_values(ReturnValue::AllNew);
        for (placeholder, attribute) in update_title_attribute_names() {
            request = request.expression_attribute_names(placeholder, attribute);
        }

        match request.send().await {
            Ok(output) => match output.attributes() {
                Some(attributes) => item_from_attributes(attributes).map(Some),
                None => Err(StoreError::new(
                    "dynamodb update returned no attributes for an existing item",
                )),
            },
            Err(error) => match error.into_service_error() {
                UpdateItemError::ConditionalCheckFailedException(_) => Ok(None),
                other => Err(StoreError::new(format!(
                    "failed to update item in dynamodb: {other}"
                ))),
            },
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY.as_str(), key_value(id))
            .condition_expression(item_exists_condition())
            .expression_attribute_names(PARTITION_KEY.name_placeholder(), PARTITION_KEY.as_str())
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(error) => match error.into_service_error() {
                DeleteItemError::ConditionalCheckFailedException(_) => Ok(false),
                other => Err(StoreError::new(format!(
                    "failed to delete item from dynamodb: {other}"
                ))),
            },
        }
    }

    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut exclusive_start_key: Option<Attributes> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await
                .map_err(|error| {
                    StoreError::new(format!("failed to scan dynamodb table: {error}"))
                })?;

            for attributes in output.items() {
                items.push(item_from_attributes(attributes)?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key.clone()),
                _ => break,
            }
        }

        Ok(items)
    }
}

fn key_value(id: &str) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

pub fn item_to_attributes(item: &Item) -> Attributes {
    let mut attributes = HashMap::from([
        (
            ItemAttribute::Id.as_str().to_string(),
            AttributeValue::S(item.id.clone()),
        ),
        (
            ItemAttribute::Title.as_str().to_string(),
            AttributeValue::S(item.title.clone()),
        ),
        (
            ItemAttribute::CreatedAt.as_str().to_string(),
            AttributeValue::S(item.created_at.clone()),
        ),
    ]);
    if let Some(updated_at) = &item.updated_at {
        attributes.insert(
            ItemAttribute::UpdatedAt.as_str().to_string(),
            AttributeValue::S(updated_at.clone()),
        );
    }
    attributes
}

pub fn item_from_attributes(attributes: &Attributes) -> Result<Item, StoreError> {
    Ok(Item {
        id: required_string(attributes, ItemAttribute::Id)?,
        title: required_string(attributes, ItemAttribute::Title)?,
        created_at: required_string(attributes, ItemAttribute::CreatedAt)?,
        updated_at: optional_string(attributes, ItemAttribute::UpdatedAt)?,
    })
}

fn required_string(
    attributes: &Attributes,
    attribute: ItemAttribute,
) -> Result<String, StoreError> {
    optional_string(attributes, attribute)?.ok_or_else(|| {
        StoreError::new(format!(
            "stored item is missing attribute '{}'",
            attribute.as_str()
        ))
    })
}

fn optional_string(
    attributes: &Attributes,
    attribute: ItemAttribute,
) -> Result<Option<String>, StoreError> {
    match attributes.get(attribute.as_str()) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(value)) => Ok(Some(value.clone())),
        Some(_) => Err(StoreError::new(format!(
            "stored item attribute '{}' must be a string",
            attribute.as_str()
        ))),
    }
}
