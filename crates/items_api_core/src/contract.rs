use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ITEM_CREATED_MESSAGE: &str = "Item created successfully";
pub const ITEM_RETRIEVED_MESSAGE: &str = "Item retrieved successfully";
pub const ITEMS_RETRIEVED_MESSAGE: &str = "Items retrieved successfully";
pub const ITEM_UPDATED_MESSAGE: &str = "Item updated successfully";
pub const ITEM_DELETED_MESSAGE: &str = "Item deleted successfully";
pub const ITEM_NOT_FOUND_MESSAGE: &str = "Item not found";
pub const MISSING_ID_MESSAGE: &str = "Missing \"id\" in path parameters";
pub const MISSING_TITLE_MESSAGE: &str = "Missing \"title\" in request body";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
pub const HELLO_MESSAGE: &str = "Hello from Lambda!";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            created_at: created_at.into(),
            updated_at: None,
        }
    }
}

/// Validated body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleInput {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemResponse {
    pub message: String,
    pub item: Item,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemListResponse {
    pub message: String,
    pub items: Vec<Item>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedItemResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ItemListResponse {
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            message: ITEMS_RETRIEVED_MESSAGE.to_string(),
            count: items.len(),
            items,
        }
    }
}

pub fn require_item_id(raw: Option<&str>) -> Result<&str, ValidationError> {
    match raw {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ValidationError::new(MISSING_ID_MESSAGE)),
    }
}

/// Extracts a usable title from a decoded request body.
///
/// Non-object payloads, non-string titles and empty titles are all rejected
/// with the same message. An accepted title is kept verbatim.
pub fn parse_title_input(payload: &Value) -> Result<TitleInput, ValidationError> {
    let title = payload
        .get("title")
        .and_then(Value::as_str)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ValidationError::new(MISSING_TITLE_MESSAGE))?;

    Ok(TitleInput {
        title: title.to_string(),
    })
}
