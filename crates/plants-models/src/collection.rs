//! Collections: reusable, named templates of items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CollectionId, ItemId};

/// An entry in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub id: ItemId,
    pub content: String,
    pub position: u32,
}

impl CollectionItem {
    pub fn new(content: impl Into<String>, position: u32) -> Self {
        Self {
            id: ItemId::new(),
            content: content.into(),
            position,
        }
    }
}

/// A named group of items that can be inserted into a list in one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: CollectionId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<CollectionItem>,
}

impl Collection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: CollectionId::new(),
            title: title.into(),
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    pub fn next_position(&self) -> Option<u32> {
        crate::next_position(self.items.iter().map(|item| item.position))
    }

    /// Case-insensitive full-title comparison.
    pub fn title_matches(&self, text: &str) -> bool {
        self.title.to_lowercase() == text.to_lowercase()
    }

    /// Case-insensitive substring comparison, used for type-ahead.
    pub fn title_contains(&self, text: &str) -> bool {
        self.title.to_lowercase().contains(&text.to_lowercase())
    }

    pub fn item(&self, id: &ItemId) -> Option<&CollectionItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn sort_items(&mut self) {
        self.items.sort_by_key(|item| item.position);
    }
}
