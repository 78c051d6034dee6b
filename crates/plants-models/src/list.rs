//! Time-stamped lists and their items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, ListId};

/// An entry in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: ItemId,
    pub content: String,
    /// 0-based, unique within the owning list, never renumbered.
    pub position: u32,
    /// Carried for display only; no operation mutates it.
    #[serde(default)]
    pub completed: bool,
}

impl ListItem {
    /// Creates an item with a fresh id.
    pub fn new(content: impl Into<String>, position: u32) -> Self {
        Self {
            id: ItemId::new(),
            content: content.into(),
            position,
            completed: false,
        }
    }
}

/// Content and position of an item about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub content: String,
    pub position: u32,
}

impl NewItem {
    pub fn new(content: impl Into<String>, position: u32) -> Self {
        Self {
            content: content.into(),
            position,
        }
    }
}

/// A list of items, usually one per week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

impl List {
    /// Creates an empty list stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ListId::new(),
            title: title.into(),
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    /// Position the next appended item receives, if any is left.
    pub fn next_position(&self) -> Option<u32> {
        crate::next_position(self.items.iter().map(|item| item.position))
    }

    pub fn item(&self, id: &ItemId) -> Option<&ListItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Sorts items by ascending position.
    pub fn sort_items(&mut self) {
        self.items.sort_by_key(|item| item.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list_is_empty() {
        let list = List::new("2024 W03 January 15-21");
        assert!(list.items.is_empty());
        assert_eq!(list.next_position(), Some(0));
    }

    #[test]
    fn test_next_position_follows_max() {
        let mut list = List::new("groceries");
        list.items.push(ListItem::new("Kale", 0));
        list.items.push(ListItem::new("Leek", 3));
        assert_eq!(list.next_position(), Some(4));
    }

    #[test]
    fn test_sort_items() {
        let mut list = List::new("groceries");
        list.items.push(ListItem::new("b", 1));
        list.items.push(ListItem::new("a", 0));
        list.sort_items();
        assert_eq!(list.items[0].content, "a");
    }

    #[test]
    fn test_camel_case_shape() {
        let list = List::new("x");
        let value = serde_json::to_value(&list).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_completed_defaults_to_false() {
        let json = r#"{"id": "1", "content": "Basil", "position": 0}"#;
        let item: ListItem = serde_json::from_str(json).unwrap();
        assert!(!item.completed);
    }
}
