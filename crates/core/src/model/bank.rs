use std::collections::HashMap;
use thiserror::Error;

use crate::model::ids::ItemId;
use crate::model::item::Item;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("invalid question bank document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

/// Read-only, ordered question bank.
///
/// Duplicate ids are not rejected; lookups resolve to the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            index.entry(item.id().clone()).or_insert(pos);
        }
        Self { items, index }
    }

    /// Parse the static JSON document (an array of items).
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidDocument` if the text is not an array of item records.
    pub fn from_json(raw: &str) -> Result<Self, BankError> {
        let items: Vec<Item> = serde_json::from_str(raw)?;
        Ok(Self::new(items))
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<Item>> for QuestionBank {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}
