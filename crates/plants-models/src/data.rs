//! Whole-dataset snapshots and list-view summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::list::List;

/// Every list and collection, as exported and imported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

/// Title and item count of a list or collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub item_count: usize,
}

impl From<&List> for Summary {
    fn from(list: &List) -> Self {
        Self {
            id: list.id.to_string(),
            title: list.title.clone(),
            created_at: list.created_at,
            item_count: list.items.len(),
        }
    }
}

impl From<&Collection> for Summary {
    fn from(collection: &Collection) -> Self {
        Self {
            id: collection.id.to_string(),
            title: collection.title.clone(),
            created_at: collection.created_at,
            item_count: collection.items.len(),
        }
    }
}
