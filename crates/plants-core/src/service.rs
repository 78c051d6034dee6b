//! The domain service: every user action goes through here.

use std::sync::Arc;

use plants_models::{
    AppData, Collection, CollectionId, CollectionItem, ItemId, List, ListId, ListItem, NewItem,
    Summary,
};
use plants_persistence::Store;
use tracing::{debug, info, warn};

use crate::error::{Result, ServiceError};
use crate::title::current_week_title;
use crate::validate::validate_snapshot;

/// What [`PlantService::apply_collection_to_list`] did.
#[derive(Debug, Clone)]
pub struct Applied {
    /// The collection whose title matched, if any.
    pub collection: Option<Collection>,
    /// Inserted items in insertion order.
    pub items: Vec<ListItem>,
}

/// Trims `value`, rejecting it when nothing is left.
fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidArgument(format!("{field} is required")));
    }
    Ok(trimmed)
}

fn positions_exhausted(kind: &str, id: impl std::fmt::Display) -> ServiceError {
    ServiceError::InvalidArgument(format!("{kind} {id} has no free position left"))
}

/// Lists, collections and the collection-to-list shortcut.
///
/// Each operation is one read-modify-write against a single aggregate. The
/// store is injected so tests can run against [`plants_persistence::MemoryStore`].
#[derive(Clone)]
pub struct PlantService {
    store: Arc<dyn Store>,
}

impl PlantService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Name of the backend in use.
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    // ---- lists ----

    /// Creates an empty list. A missing or blank title becomes the label of
    /// the current week.
    pub fn create_list(&self, title: Option<&str>) -> Result<List> {
        let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => title.to_string(),
            None => current_week_title(),
        };
        let list = self.store.create_list(&title)?;
        info!(list_id = %list.id, title = %list.title, "created list");
        Ok(list)
    }

    /// All lists, newest first.
    pub fn get_lists(&self) -> Result<Vec<List>> {
        let lists = self.store.lists()?;
        debug!(count = lists.len(), "loaded lists");
        Ok(lists)
    }

    pub fn get_list(&self, id: &ListId) -> Result<List> {
        Ok(self.store.get_list(id)?)
    }

    /// Items of one list in position order.
    pub fn list_items(&self, id: &ListId) -> Result<Vec<ListItem>> {
        Ok(self.store.get_list(id)?.items)
    }

    /// The most recently created list, if any.
    pub fn latest_list(&self) -> Result<Option<List>> {
        Ok(self.store.lists()?.into_iter().next())
    }

    pub fn list_summaries(&self) -> Result<Vec<Summary>> {
        Ok(self.store.lists()?.iter().map(Summary::from).collect())
    }

    pub fn update_list_title(&self, id: &ListId, title: &str) -> Result<List> {
        let title = required("title", title)?;
        let list = self.store.update_list_title(id, title)?;
        info!(list_id = %id, title = %title, "renamed list");
        Ok(list)
    }

    /// Appends an item after the highest existing position.
    pub fn add_list_item(&self, list_id: &ListId, content: &str) -> Result<ListItem> {
        let content = required("content", content)?;
        let list = self.store.get_list(list_id)?;
        let position = list.next_position().ok_or_else(|| positions_exhausted("list", list_id))?;
        let item = self
            .store
            .insert_list_item(list_id, NewItem::new(content, position))?;
        debug!(list_id = %list_id, position = item.position, "added list item");
        Ok(item)
    }

    /// Removes one item; the others keep their positions.
    pub fn delete_list_item(&self, list_id: &ListId, item_id: &ItemId) -> Result<()> {
        self.store.delete_list_item(list_id, item_id)?;
        info!(list_id = %list_id, item_id = %item_id, "deleted list item");
        Ok(())
    }

    /// Removes a list and everything in it.
    pub fn delete_list(&self, id: &ListId) -> Result<()> {
        self.store.delete_list(id)?;
        info!(list_id = %id, "deleted list");
        Ok(())
    }

    /// Interprets `text` as either a collection title or a literal item.
    ///
    /// When a collection's title equals `text` ignoring case, each of its
    /// items is appended to the list in the collection's order, one insert at
    /// a time. Otherwise `text` itself is appended.
    pub fn apply_collection_to_list(&self, list_id: &ListId, text: &str) -> Result<Applied> {
        let text = required("text", text)?;
        self.store.get_list(list_id)?;

        let Some(collection) = self.find_collection_by_title(text)? else {
            return Ok(Applied {
                collection: None,
                items: vec![self.add_list_item(list_id, text)?],
            });
        };

        info!(
            list_id = %list_id,
            collection_id = %collection.id,
            items = collection.items.len(),
            "applying collection to list"
        );
        let mut inserted = Vec::with_capacity(collection.items.len());
        for item in &collection.items {
            if item.content.trim().is_empty() {
                warn!(item_id = %item.id, "skipping blank collection item");
                continue;
            }
            inserted.push(self.add_list_item(list_id, &item.content)?);
        }
        Ok(Applied {
            collection: Some(collection),
            items: inserted,
        })
    }

    // ---- collections ----

    pub fn create_collection(&self, title: &str) -> Result<Collection> {
        let title = required("title", title)?;
        let collection = self.store.create_collection(title)?;
        info!(collection_id = %collection.id, title = %title, "created collection");
        Ok(collection)
    }

    /// All collections, newest first.
    pub fn get_collections(&self) -> Result<Vec<Collection>> {
        Ok(self.store.collections()?)
    }

    pub fn get_collection(&self, id: &CollectionId) -> Result<Collection> {
        Ok(self.store.get_collection(id)?)
    }

    pub fn collection_summaries(&self) -> Result<Vec<Summary>> {
        Ok(self.store.collections()?.iter().map(Summary::from).collect())
    }

    pub fn update_collection_title(&self, id: &CollectionId, title: &str) -> Result<Collection> {
        let title = required("title", title)?;
        let collection = self.store.update_collection_title(id, title)?;
        info!(collection_id = %id, title = %title, "renamed collection");
        Ok(collection)
    }

    pub fn add_collection_item(
        &self,
        collection_id: &CollectionId,
        content: &str,
    ) -> Result<CollectionItem> {
        let content = required("content", content)?;
        let collection = self.store.get_collection(collection_id)?;
        let position = collection
            .next_position()
            .ok_or_else(|| positions_exhausted("collection", collection_id))?;
        let item = self
            .store
            .insert_collection_item(collection_id, NewItem::new(content, position))?;
        debug!(collection_id = %collection_id, position = item.position, "added collection item");
        Ok(item)
    }

    pub fn delete_collection_item(
        &self,
        collection_id: &CollectionId,
        item_id: &ItemId,
    ) -> Result<()> {
        self.store.delete_collection_item(collection_id, item_id)?;
        info!(collection_id = %collection_id, item_id = %item_id, "deleted collection item");
        Ok(())
    }

    /// Exact, case-insensitive title lookup. With duplicate titles the newest
    /// collection wins.
    pub fn find_collection_by_title(&self, text: &str) -> Result<Option<Collection>> {
        let text = text.trim();
        Ok(self
            .store
            .collections()?
            .into_iter()
            .find(|collection| collection.title_matches(text)))
    }

    /// Collections whose title contains `text`, for type-ahead.
    pub fn suggest_collections(&self, text: &str) -> Result<Vec<Collection>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .store
            .collections()?
            .into_iter()
            .filter(|collection| collection.title_contains(text))
            .collect())
    }

    // ---- whole dataset ----

    pub fn export_data(&self) -> Result<AppData> {
        Ok(self.store.snapshot()?)
    }

    /// Replaces every list and collection with `data`. Nothing is written
    /// unless the whole snapshot passes [`validate_snapshot`].
    pub fn import_data(&self, data: AppData) -> Result<()> {
        validate_snapshot(&data)?;
        let (lists, collections) = (data.lists.len(), data.collections.len());
        self.store.replace_all(data)?;
        info!(lists, collections, "imported data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plants_persistence::MemoryStore;

    fn service() -> PlantService {
        PlantService::new(Arc::new(MemoryStore::new()))
    }

    fn contents(items: &[ListItem]) -> Vec<&str> {
        items.iter().map(|i| i.content.as_str()).collect()
    }

    #[test]
    fn test_create_list_with_title() {
        let svc = service();
        let list = svc.create_list(Some("  Spring  ")).unwrap();
        assert_eq!(list.title, "Spring");
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_create_list_default_title() {
        let svc = service();
        let list = svc.create_list(None).unwrap();
        assert_eq!(list.title, current_week_title());

        let blank = svc.create_list(Some("   ")).unwrap();
        assert_eq!(blank.title, current_week_title());
    }

    #[test]
    fn test_positions_start_at_zero_without_gaps() {
        let svc = service();
        let list = svc.create_list(Some("week")).unwrap();
        for name in ["Kale", "Leek", "Chard", "Basil"] {
            svc.add_list_item(&list.id, name).unwrap();
        }

        let positions: Vec<u32> = svc
            .get_list(&list.id)
            .unwrap()
            .items
            .iter()
            .map(|i| i.position)
            .collect();
        assert_eq!(positions, [0, 1, 2, 3]);
    }

    #[test]
    fn test_positions_continue_after_delete() {
        let svc = service();
        let list = svc.create_list(Some("week")).unwrap();
        svc.add_list_item(&list.id, "Kale").unwrap();
        let leek = svc.add_list_item(&list.id, "Leek").unwrap();

        svc.delete_list_item(&list.id, &leek.id).unwrap();
        let chard = svc.add_list_item(&list.id, "Chard").unwrap();
        assert_eq!(chard.position, 1);

        let kale = svc.list_items(&list.id).unwrap()[0].clone();
        svc.delete_list_item(&list.id, &kale.id).unwrap();
        let basil = svc.add_list_item(&list.id, "Basil").unwrap();
        assert_eq!(basil.position, 2);
    }

    #[test]
    fn test_add_item_rejects_blank_content() {
        let svc = service();
        let list = svc.create_list(Some("week")).unwrap();
        let result = svc.add_list_item(&list.id, "  ");
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
        assert!(svc.list_items(&list.id).unwrap().is_empty());
    }

    #[test]
    fn test_add_item_to_missing_list() {
        let svc = service();
        let result = svc.add_list_item(&ListId::from_string("missing"), "Kale");
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn test_update_title_rejects_empty_and_keeps_old() {
        let svc = service();
        let list = svc.create_list(Some("Original")).unwrap();

        let result = svc.update_list_title(&list.id, "");
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
        assert_eq!(svc.get_list(&list.id).unwrap().title, "Original");
    }

    #[test]
    fn test_update_title_missing_list() {
        let svc = service();
        let result = svc.update_list_title(&ListId::from_string("missing"), "New");
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn test_created_at_never_changes() {
        let svc = service();
        let list = svc.create_list(Some("week")).unwrap();
        svc.update_list_title(&list.id, "renamed").unwrap();
        svc.add_list_item(&list.id, "Kale").unwrap();
        assert_eq!(svc.get_list(&list.id).unwrap().created_at, list.created_at);
    }

    #[test]
    fn test_get_missing_list() {
        let svc = service();
        let result = svc.get_list(&ListId::from_string("nope"));
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn test_delete_missing_list_is_not_found() {
        let svc = service();
        let result = svc.delete_list(&ListId::from_string("nope"));
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn test_apply_collection_inserts_items_in_order() {
        let svc = service();
        let kit = svc.create_collection("Salad Kit").unwrap();
        svc.add_collection_item(&kit.id, "Lettuce").unwrap();
        svc.add_collection_item(&kit.id, "Tomato").unwrap();
        let list = svc.create_list(Some("week")).unwrap();

        let applied = svc.apply_collection_to_list(&list.id, "Salad Kit").unwrap();

        assert_eq!(applied.collection.unwrap().id, kit.id);
        assert_eq!(contents(&applied.items), ["Lettuce", "Tomato"]);
        let items = svc.list_items(&list.id).unwrap();
        assert_eq!(contents(&items), ["Lettuce", "Tomato"]);
        assert_eq!(items[0].position, 0);
        assert_eq!(items[1].position, 1);
    }

    #[test]
    fn test_apply_collection_appends_after_existing_items() {
        let svc = service();
        let kit = svc.create_collection("Salad Kit").unwrap();
        svc.add_collection_item(&kit.id, "Lettuce").unwrap();
        let list = svc.create_list(Some("week")).unwrap();
        svc.add_list_item(&list.id, "Kale").unwrap();

        let applied = svc.apply_collection_to_list(&list.id, "salad kit").unwrap();
        assert_eq!(applied.items[0].position, 1);
    }

    #[test]
    fn test_apply_unknown_name_adds_literal_item() {
        let svc = service();
        let list = svc.create_list(Some("week")).unwrap();

        let applied = svc
            .apply_collection_to_list(&list.id, "Nonexistent Name")
            .unwrap();

        assert!(applied.collection.is_none());
        assert_eq!(contents(&applied.items), ["Nonexistent Name"]);
        assert_eq!(svc.list_items(&list.id).unwrap().len(), 1);
    }

    #[test]
    fn test_apply_matches_case_insensitive_exact_title() {
        let svc = service();
        let herbs = svc.create_collection("Herbs").unwrap();
        svc.add_collection_item(&herbs.id, "Basil").unwrap();
        svc.add_collection_item(&herbs.id, "Mint").unwrap();
        let list = svc.create_list(Some("week")).unwrap();

        let matched = svc.apply_collection_to_list(&list.id, "herbs").unwrap();
        assert_eq!(matched.collection.unwrap().title, "Herbs");
        assert_eq!(contents(&matched.items), ["Basil", "Mint"]);

        let literal = svc.apply_collection_to_list(&list.id, "herb").unwrap();
        assert!(literal.collection.is_none());
        assert_eq!(contents(&literal.items), ["herb"]);
    }

    #[test]
    fn test_apply_empty_collection_inserts_nothing() {
        let svc = service();
        svc.create_collection("Empty").unwrap();
        let list = svc.create_list(Some("week")).unwrap();

        let applied = svc.apply_collection_to_list(&list.id, "Empty").unwrap();
        assert!(applied.collection.is_some());
        assert!(applied.items.is_empty());
    }

    #[test]
    fn test_apply_to_missing_list() {
        let svc = service();
        let result = svc.apply_collection_to_list(&ListId::from_string("nope"), "Herbs");
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn test_apply_blank_text() {
        let svc = service();
        let list = svc.create_list(Some("week")).unwrap();
        let result = svc.apply_collection_to_list(&list.id, " ");
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
    }

    #[test]
    fn test_create_collection_requires_title() {
        let svc = service();
        assert!(matches!(
            svc.create_collection(""),
            Err(ServiceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_collection_item_positions() {
        let svc = service();
        let kit = svc.create_collection("Kit").unwrap();
        let a = svc.add_collection_item(&kit.id, "A").unwrap();
        let b = svc.add_collection_item(&kit.id, "B").unwrap();
        assert_eq!((a.position, b.position), (0, 1));
    }

    #[test]
    fn test_suggest_collections_by_substring() {
        let svc = service();
        svc.create_collection("Salad Kit").unwrap();
        svc.create_collection("Soup Greens").unwrap();

        let found = svc.suggest_collections("kit").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Salad Kit");
        assert!(svc.suggest_collections("").unwrap().is_empty());
    }

    #[test]
    fn test_latest_list_and_summaries() {
        let svc = service();
        assert!(svc.latest_list().unwrap().is_none());

        svc.create_list(Some("first")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = svc.create_list(Some("second")).unwrap();
        svc.add_list_item(&second.id, "Kale").unwrap();

        assert_eq!(svc.latest_list().unwrap().unwrap().id, second.id);
        let summaries = svc.list_summaries().unwrap();
        assert_eq!(summaries[0].item_count, 1);
        assert_eq!(summaries[1].item_count, 0);
    }

    #[test]
    fn test_export_then_import_into_fresh_store() {
        let svc = service();
        let list = svc.create_list(Some("week")).unwrap();
        svc.add_list_item(&list.id, "Kale").unwrap();
        svc.create_collection("Herbs").unwrap();
        let data = svc.export_data().unwrap();

        let other = service();
        other.import_data(data.clone()).unwrap();
        assert_eq!(other.export_data().unwrap(), data);
    }

    fn list_at(position: u32) -> List {
        let mut list = List::new("week");
        list.items.push(ListItem::new("Kale", position));
        list
    }

    #[test]
    fn test_add_item_after_last_position_is_rejected() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let list = list_at(u32::MAX);
        store
            .replace_all(AppData {
                lists: vec![list.clone()],
                collections: Vec::new(),
            })
            .unwrap();
        let svc = PlantService::new(store);

        let result = svc.add_list_item(&list.id, "Leek");
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
        assert_eq!(svc.list_items(&list.id).unwrap().len(), 1);

        let result = svc.apply_collection_to_list(&list.id, "Leek");
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
    }

    #[test]
    fn test_add_collection_item_after_last_position_is_rejected() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let mut kit = Collection::new("Kit");
        kit.items.push(CollectionItem::new("Basil", u32::MAX));
        store
            .replace_all(AppData {
                lists: Vec::new(),
                collections: vec![kit.clone()],
            })
            .unwrap();
        let svc = PlantService::new(store);

        let result = svc.add_collection_item(&kit.id, "Mint");
        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
    }

    #[test]
    fn test_import_rejects_last_position_and_keeps_data() {
        let svc = service();
        let existing = svc.create_list(Some("keep")).unwrap();

        let result = svc.import_data(AppData {
            lists: vec![list_at(u32::MAX)],
            collections: Vec::new(),
        });

        assert!(matches!(result, Err(ServiceError::InvalidArgument(_))));
        assert_eq!(svc.get_lists().unwrap()[0].id, existing.id);
    }
}
