//! Stores that keep the whole dataset as one document.
//!
//! Every operation loads the full [`AppData`], applies the change and writes
//! back each half (lists, collections) that changed. [`DocumentStore`] holds
//! a mutex across that read-modify-write so operations from one process never
//! interleave. Only [`Store::replace_all`] touches both halves; those two
//! writes are separate, so a failure between them leaves the lists replaced
//! and the collections not.

use std::sync::Mutex;

use plants_models::{
    AppData, Collection, CollectionId, CollectionItem, ItemId, List, ListId, ListItem, NewItem,
};
use tracing::debug;

use crate::error::{PersistenceError, Result};
use crate::store::{order_collections, order_lists, Store};

/// Where a document store keeps its data.
pub trait DocumentBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn load(&self) -> Result<AppData>;
    fn save_lists(&self, lists: &[List]) -> Result<()>;
    fn save_collections(&self, collections: &[Collection]) -> Result<()>;
}

/// [`Store`] implementation over any [`DocumentBackend`].
pub struct DocumentStore<B> {
    backend: B,
    lock: Mutex<()>,
}

impl<B: DocumentBackend> DocumentStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    pub(crate) fn backend_ref(&self) -> &B {
        &self.backend
    }

    fn read<T>(&self, f: impl FnOnce(AppData) -> Result<T>) -> Result<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))?;
        f(self.backend.load()?)
    }

    fn modify<T>(&self, f: impl FnOnce(&mut AppData) -> Result<T>) -> Result<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))?;
        let before = self.backend.load()?;
        let mut data = before.clone();
        let out = f(&mut data)?;
        let lists_changed = data.lists != before.lists;
        let collections_changed = data.collections != before.collections;
        if lists_changed {
            self.backend.save_lists(&data.lists)?;
        }
        if collections_changed {
            self.backend.save_collections(&data.collections)?;
        }
        debug!(
            backend = self.backend.name(),
            lists_changed, collections_changed, "document saved"
        );
        Ok(out)
    }
}

fn list_mut<'a>(data: &'a mut AppData, id: &ListId) -> Result<&'a mut List> {
    data.lists
        .iter_mut()
        .find(|list| &list.id == id)
        .ok_or_else(|| PersistenceError::not_found("list", id))
}

fn collection_mut<'a>(data: &'a mut AppData, id: &CollectionId) -> Result<&'a mut Collection> {
    data.collections
        .iter_mut()
        .find(|collection| &collection.id == id)
        .ok_or_else(|| PersistenceError::not_found("collection", id))
}

impl<B: DocumentBackend> Store for DocumentStore<B> {
    fn backend(&self) -> &'static str {
        self.backend.name()
    }

    fn lists(&self) -> Result<Vec<List>> {
        self.read(|data| {
            let mut lists = data.lists;
            order_lists(&mut lists);
            Ok(lists)
        })
    }

    fn get_list(&self, id: &ListId) -> Result<List> {
        self.read(|data| {
            let mut list = data
                .lists
                .into_iter()
                .find(|list| &list.id == id)
                .ok_or_else(|| PersistenceError::not_found("list", id))?;
            list.sort_items();
            Ok(list)
        })
    }

    fn create_list(&self, title: &str) -> Result<List> {
        self.modify(|data| {
            let list = List::new(title);
            data.lists.push(list.clone());
            Ok(list)
        })
    }

    fn update_list_title(&self, id: &ListId, title: &str) -> Result<List> {
        self.modify(|data| {
            let list = list_mut(data, id)?;
            list.title = title.to_string();
            let mut updated = list.clone();
            updated.sort_items();
            Ok(updated)
        })
    }

    fn delete_list(&self, id: &ListId) -> Result<()> {
        self.modify(|data| {
            let before = data.lists.len();
            data.lists.retain(|list| &list.id != id);
            if data.lists.len() == before {
                return Err(PersistenceError::not_found("list", id));
            }
            Ok(())
        })
    }

    fn insert_list_item(&self, list_id: &ListId, item: NewItem) -> Result<ListItem> {
        self.modify(|data| {
            let list = list_mut(data, list_id)?;
            let item = ListItem::new(item.content, item.position);
            list.items.push(item.clone());
            Ok(item)
        })
    }

    fn delete_list_item(&self, list_id: &ListId, item_id: &ItemId) -> Result<()> {
        self.modify(|data| {
            let list = list_mut(data, list_id)?;
            let before = list.items.len();
            list.items.retain(|item| &item.id != item_id);
            if list.items.len() == before {
                return Err(PersistenceError::not_found("list item", item_id));
            }
            Ok(())
        })
    }

    fn collections(&self) -> Result<Vec<Collection>> {
        self.read(|data| {
            let mut collections = data.collections;
            order_collections(&mut collections);
            Ok(collections)
        })
    }

    fn get_collection(&self, id: &CollectionId) -> Result<Collection> {
        self.read(|data| {
            let mut collection = data
                .collections
                .into_iter()
                .find(|collection| &collection.id == id)
                .ok_or_else(|| PersistenceError::not_found("collection", id))?;
            collection.sort_items();
            Ok(collection)
        })
    }

    fn create_collection(&self, title: &str) -> Result<Collection> {
        self.modify(|data| {
            let collection = Collection::new(title);
            data.collections.push(collection.clone());
            Ok(collection)
        })
    }

    fn update_collection_title(&self, id: &CollectionId, title: &str) -> Result<Collection> {
        self.modify(|data| {
            let collection = collection_mut(data, id)?;
            collection.title = title.to_string();
            let mut updated = collection.clone();
            updated.sort_items();
            Ok(updated)
        })
    }

    fn insert_collection_item(
        &self,
        collection_id: &CollectionId,
        item: NewItem,
    ) -> Result<CollectionItem> {
        self.modify(|data| {
            let collection = collection_mut(data, collection_id)?;
            let item = CollectionItem::new(item.content, item.position);
            collection.items.push(item.clone());
            Ok(item)
        })
    }

    fn delete_collection_item(
        &self,
        collection_id: &CollectionId,
        item_id: &ItemId,
    ) -> Result<()> {
        self.modify(|data| {
            let collection = collection_mut(data, collection_id)?;
            let before = collection.items.len();
            collection.items.retain(|item| &item.id != item_id);
            if collection.items.len() == before {
                return Err(PersistenceError::not_found("collection item", item_id));
            }
            Ok(())
        })
    }

    fn replace_all(&self, data: AppData) -> Result<()> {
        self.modify(|current| {
            *current = data;
            Ok(())
        })
    }

    fn snapshot(&self) -> Result<AppData> {
        self.read(|mut data| {
            order_lists(&mut data.lists);
            order_collections(&mut data.collections);
            Ok(data)
        })
    }
}
