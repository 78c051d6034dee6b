//! Request DTOs for the API.
//!
//! Required fields are `Option` so a missing field surfaces as a 400 with a
//! readable message rather than a deserialization failure.

use serde::Deserialize;

/// Either a string id or a numeric row id, as sent by clients of the
/// relational backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Text(String),
    Number(i64),
}

impl IdValue {
    pub fn into_string(self) -> String {
        match self {
            IdValue::Text(s) => s,
            IdValue::Number(n) => n.to_string(),
        }
    }
}

/// POST /lists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateListRequest {
    pub title: Option<String>,
}

/// PATCH /lists/:id and PATCH /collections/:id
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTitleRequest {
    pub title: Option<String>,
}

/// POST /lists/:id/items
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemRequest {
    pub content: Option<String>,
}

/// POST /lists/:id/apply
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyRequest {
    /// A collection title, or the literal content of a single item.
    pub text: Option<String>,
}

/// POST /collections
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCollectionRequest {
    pub title: Option<String>,
}

/// POST /collection-items
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCollectionItemRequest {
    pub content: Option<String>,
    pub collection_id: Option<IdValue>,
}

/// GET /collections query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionQuery {
    /// When present, only collections whose title contains this text.
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_list_request_optional_title() {
        let req: CreateListRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());
    }

    #[test]
    fn test_collection_item_request_accepts_numeric_id() {
        let json = r#"{"content": "Basil", "collectionId": 3}"#;
        let req: AddCollectionItemRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.collection_id.unwrap().into_string(), "3");
    }

    #[test]
    fn test_collection_item_request_accepts_string_id() {
        let json = r#"{"content": "Basil", "collectionId": "c-1"}"#;
        let req: AddCollectionItemRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.collection_id, Some(IdValue::Text("c-1".into())));
    }
}
