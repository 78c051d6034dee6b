//! The storage contract shared by every backend.

use plants_models::{
    AppData, Collection, CollectionId, CollectionItem, ItemId, List, ListId, ListItem, NewItem,
};

use crate::error::Result;

/// CRUD over the list and collection aggregates.
///
/// Ordering contract: `lists()` and `collections()` return the newest entity
/// first, and every returned aggregate has its items in ascending position.
/// Implementations never assign positions themselves; the caller passes them
/// in with [`NewItem`].
pub trait Store: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    fn lists(&self) -> Result<Vec<List>>;
    fn get_list(&self, id: &ListId) -> Result<List>;
    fn create_list(&self, title: &str) -> Result<List>;
    fn update_list_title(&self, id: &ListId, title: &str) -> Result<List>;
    /// Removes the list and its items. Missing ids are NotFound.
    fn delete_list(&self, id: &ListId) -> Result<()>;
    fn insert_list_item(&self, list_id: &ListId, item: NewItem) -> Result<ListItem>;
    fn delete_list_item(&self, list_id: &ListId, item_id: &ItemId) -> Result<()>;

    fn collections(&self) -> Result<Vec<Collection>>;
    fn get_collection(&self, id: &CollectionId) -> Result<Collection>;
    fn create_collection(&self, title: &str) -> Result<Collection>;
    fn update_collection_title(&self, id: &CollectionId, title: &str) -> Result<Collection>;
    fn insert_collection_item(
        &self,
        collection_id: &CollectionId,
        item: NewItem,
    ) -> Result<CollectionItem>;
    fn delete_collection_item(&self, collection_id: &CollectionId, item_id: &ItemId)
        -> Result<()>;

    /// Replaces every list and collection with `data`.
    fn replace_all(&self, data: AppData) -> Result<()>;

    fn snapshot(&self) -> Result<AppData> {
        Ok(AppData {
            lists: self.lists()?,
            collections: self.collections()?,
        })
    }
}

/// Applies the ordering contract to a list set.
pub(crate) fn order_lists(lists: &mut [List]) {
    lists.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    lists.iter_mut().for_each(List::sort_items);
}

pub(crate) fn order_collections(collections: &mut [Collection]) {
    collections.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    collections.iter_mut().for_each(Collection::sort_items);
}
