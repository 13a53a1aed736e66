use std::future::Future;

use items_api_core::contract::Item;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StoreError {}

/// Key-value access to the item table, addressed by `id`.
///
/// Every method is a single round trip with per-call atomicity. The
/// conditional mutations report a missing record through their return value
/// instead of an error.
pub trait ItemStore: Send + Sync {
    fn get(&self, id: &str) -> impl Future<Output = Result<Option<Item>, StoreError>> + Send;

    fn put(&self, item: &Item) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Sets `title` and `updatedAt` only if the record exists. Returns the
    /// full record after the write, or `None` when nothing was written.
    fn update_title(
        &self,
        id: &str,
        title: &str,
        updated_at: &str,
    ) -> impl Future<Output = Result<Option<Item>, StoreError>> + Send;

    /// Removes the record only if it exists. Returns `false` when it did not.
    fn delete(&self, id: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;

    fn scan(&self) -> impl Future<Output = Result<Vec<Item>, StoreError>> + Send;
}

impl<T: ItemStore> ItemStore for std::sync::Arc<T> {
    fn get(&self, id: &str) -> impl Future<Output = Result<Option<Item>, StoreError>> + Send {
        (**self).get(id)
    }

    fn put(&self, item: &Item) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).put(item)
    }

    fn update_title(
        &self,
        id: &str,
        title: &str,
        updated_at: &str,
    ) -> impl Future<Output = Result<Option<Item>, StoreError>> + Send {
        (**self).update_title(id, title, updated_at)
    }

    fn delete(&self, id: &str) -> impl Future<Output = Result<bool, StoreError>> + Send {
        (**self).delete(id)
    }

    fn scan(&self) -> impl Future<Output = Result<Vec<Item>, StoreError>> + Send {
        (**self).scan()
    }
}
