use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use items_api_core::contract::Item;

use crate::adapters::item_store::{ItemStore, StoreError};

/// Process-local item table, used for local runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    records: Mutex<BTreeMap<String, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let records = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.records()?.is_empty())
    }

    fn records(&self) -> Result<MutexGuard<'_, BTreeMap<String, Item>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::new("in-memory item table lock poisoned"))
    }
}

impl ItemStore for InMemoryItemStore {
    async fn get(&self, id: &str) -> Result<Option<Item>, StoreError> {
        Ok(self.records()?.get(id).cloned())
    }

    async fn put(&self, item: &Item) -> Result<(), StoreError> {
        self.records()?.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update_title(
        &self,
        id: &str,
        title: &str,
        updated_at: &str,
    ) -> Result<Option<Item>, StoreError> {
        let mut records = self.records()?;
        let Some(record) = records.get_mut(id) else {
            return Ok(None);
        };
        record.title = title.to_string();
        record.updated_at = Some(updated_at.to_string());
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records()?.remove(id).is_some())
    }

    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.records()?.values().cloned().collect())
    }
}
