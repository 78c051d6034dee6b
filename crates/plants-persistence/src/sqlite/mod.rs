//! Relational store on SQLite.
//!
//! Rows use integer autoincrement keys which surface as decimal string ids.
//! Items reference their parent with `ON DELETE CASCADE`, so deleting a list
//! removes its items. Schema versions are tracked in `PRAGMA user_version`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use plants_models::{
    AppData, Collection, CollectionId, CollectionItem, ItemId, List, ListId, ListItem, NewItem,
};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use tracing::info;

use crate::atomic::ensure_dir;
use crate::error::{PersistenceError, Result};
use crate::store::Store;

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Latest schema version this binary knows how to create.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();
    if current > latest {
        return Err(PersistenceError::InvalidData(format!(
            "database schema version {current} is newer than supported {latest}"
        )));
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;
    Ok(())
}

fn encode_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_time(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| PersistenceError::InvalidData(format!("bad timestamp {raw:?}: {e}")))
}

/// [`Store`] backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens or creates the database file at `path` and migrates it.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        let conn = Connection::open(path).map_err(|source| PersistenceError::OpenError {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_connection(conn)?;
        info!(path = %path.display(), "opened sqlite store");
        Ok(store)
    }

    /// Private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))
    }
}

fn list_row(id: &ListId) -> Result<i64> {
    id.as_row()
        .ok_or_else(|| PersistenceError::not_found("list", id))
}

fn collection_row(id: &CollectionId) -> Result<i64> {
    id.as_row()
        .ok_or_else(|| PersistenceError::not_found("collection", id))
}

fn load_lists(conn: &Connection, only: Option<i64>) -> Result<Vec<List>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, created_at FROM lists
         WHERE (?1 IS NULL OR id = ?1)
         ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt
        .query_map(params![only], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut items = load_list_items(conn, only)?;
    rows.into_iter()
        .map(|(id, title, created_at)| {
            Ok(List {
                id: ListId::from_row(id),
                title,
                created_at: decode_time(&created_at)?,
                items: items.remove(&id).unwrap_or_default(),
            })
        })
        .collect()
}

fn load_list_items(conn: &Connection, only: Option<i64>) -> Result<HashMap<i64, Vec<ListItem>>> {
    let mut stmt = conn.prepare(
        "SELECT id, list_id, content, position, completed FROM list_items
         WHERE (?1 IS NULL OR list_id = ?1)
         ORDER BY list_id, position",
    )?;
    let mut by_list: HashMap<i64, Vec<ListItem>> = HashMap::new();
    let rows = stmt.query_map(params![only], |row| {
        Ok((
            row.get::<_, i64>(1)?,
            ListItem {
                id: ItemId::from_row(row.get(0)?),
                content: row.get(2)?,
                position: row.get(3)?,
                completed: row.get(4)?,
            },
        ))
    })?;
    for row in rows {
        let (list_id, item) = row?;
        by_list.entry(list_id).or_default().push(item);
    }
    Ok(by_list)
}

fn load_collections(conn: &Connection, only: Option<i64>) -> Result<Vec<Collection>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, created_at FROM collections
         WHERE (?1 IS NULL OR id = ?1)
         ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt
        .query_map(params![only], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut items = load_collection_items(conn, only)?;
    rows.into_iter()
        .map(|(id, title, created_at)| {
            Ok(Collection {
                id: CollectionId::from_row(id),
                title,
                created_at: decode_time(&created_at)?,
                items: items.remove(&id).unwrap_or_default(),
            })
        })
        .collect()
}

fn load_collection_items(
    conn: &Connection,
    only: Option<i64>,
) -> Result<HashMap<i64, Vec<CollectionItem>>> {
    let mut stmt = conn.prepare(
        "SELECT id, collection_id, content, position FROM collection_items
         WHERE (?1 IS NULL OR collection_id = ?1)
         ORDER BY collection_id, position",
    )?;
    let mut by_collection: HashMap<i64, Vec<CollectionItem>> = HashMap::new();
    let rows = stmt.query_map(params![only], |row| {
        Ok((
            row.get::<_, i64>(1)?,
            CollectionItem {
                id: ItemId::from_row(row.get(0)?),
                content: row.get(2)?,
                position: row.get(3)?,
            },
        ))
    })?;
    for row in rows {
        let (collection_id, item) = row?;
        by_collection.entry(collection_id).or_default().push(item);
    }
    Ok(by_collection)
}

fn exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
    let found = conn
        .query_row(
            &format!("SELECT 1 FROM {table} WHERE id = ?1"),
            params![id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn insert_list(tx: &Transaction<'_>, list: &List) -> Result<()> {
    tx.execute(
        "INSERT INTO lists (title, created_at) VALUES (?1, ?2)",
        params![list.title, encode_time(&list.created_at)],
    )?;
    let list_id = tx.last_insert_rowid();
    for item in &list.items {
        tx.execute(
            "INSERT INTO list_items (list_id, content, position, completed)
             VALUES (?1, ?2, ?3, ?4)",
            params![list_id, item.content, item.position, item.completed],
        )?;
    }
    Ok(())
}

fn insert_collection(tx: &Transaction<'_>, collection: &Collection) -> Result<()> {
    tx.execute(
        "INSERT INTO collections (title, created_at) VALUES (?1, ?2)",
        params![collection.title, encode_time(&collection.created_at)],
    )?;
    let collection_id = tx.last_insert_rowid();
    for item in &collection.items {
        tx.execute(
            "INSERT INTO collection_items (collection_id, content, position)
             VALUES (?1, ?2, ?3)",
            params![collection_id, item.content, item.position],
        )?;
    }
    Ok(())
}

impl Store for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn lists(&self) -> Result<Vec<List>> {
        load_lists(&*self.conn()?, None)
    }

    fn get_list(&self, id: &ListId) -> Result<List> {
        let row = list_row(id)?;
        load_lists(&*self.conn()?, Some(row))?
            .pop()
            .ok_or_else(|| PersistenceError::not_found("list", id))
    }

    fn create_list(&self, title: &str) -> Result<List> {
        let conn = self.conn()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO lists (title, created_at) VALUES (?1, ?2)",
            params![title, encode_time(&created_at)],
        )?;
        Ok(List {
            id: ListId::from_row(conn.last_insert_rowid()),
            title: title.to_string(),
            created_at: decode_time(&encode_time(&created_at))?,
            items: Vec::new(),
        })
    }

    fn update_list_title(&self, id: &ListId, title: &str) -> Result<List> {
        let row = list_row(id)?;
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE lists SET title = ?1 WHERE id = ?2",
            params![title, row],
        )?;
        if changed == 0 {
            return Err(PersistenceError::not_found("list", id));
        }
        load_lists(&conn, Some(row))?
            .pop()
            .ok_or_else(|| PersistenceError::not_found("list", id))
    }

    fn delete_list(&self, id: &ListId) -> Result<()> {
        let row = list_row(id)?;
        let changed = self
            .conn()?
            .execute("DELETE FROM lists WHERE id = ?1", params![row])?;
        if changed == 0 {
            return Err(PersistenceError::not_found("list", id));
        }
        Ok(())
    }

    fn insert_list_item(&self, list_id: &ListId, item: NewItem) -> Result<ListItem> {
        let row = list_row(list_id)?;
        let conn = self.conn()?;
        if !exists(&conn, "lists", row)? {
            return Err(PersistenceError::not_found("list", list_id));
        }
        conn.execute(
            "INSERT INTO list_items (list_id, content, position) VALUES (?1, ?2, ?3)",
            params![row, item.content, item.position],
        )?;
        Ok(ListItem {
            id: ItemId::from_row(conn.last_insert_rowid()),
            content: item.content,
            position: item.position,
            completed: false,
        })
    }

    fn delete_list_item(&self, list_id: &ListId, item_id: &ItemId) -> Result<()> {
        let row = list_row(list_id)?;
        let conn = self.conn()?;
        if !exists(&conn, "lists", row)? {
            return Err(PersistenceError::not_found("list", list_id));
        }
        let item_row = item_id
            .as_row()
            .ok_or_else(|| PersistenceError::not_found("list item", item_id))?;
        let changed = conn.execute(
            "DELETE FROM list_items WHERE id = ?1 AND list_id = ?2",
            params![item_row, row],
        )?;
        if changed == 0 {
            return Err(PersistenceError::not_found("list item", item_id));
        }
        Ok(())
    }

    fn collections(&self) -> Result<Vec<Collection>> {
        load_collections(&*self.conn()?, None)
    }

    fn get_collection(&self, id: &CollectionId) -> Result<Collection> {
        let row = collection_row(id)?;
        load_collections(&*self.conn()?, Some(row))?
            .pop()
            .ok_or_else(|| PersistenceError::not_found("collection", id))
    }

    fn create_collection(&self, title: &str) -> Result<Collection> {
        let conn = self.conn()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO collections (title, created_at) VALUES (?1, ?2)",
            params![title, encode_time(&created_at)],
        )?;
        Ok(Collection {
            id: CollectionId::from_row(conn.last_insert_rowid()),
            title: title.to_string(),
            created_at: decode_time(&encode_time(&created_at))?,
            items: Vec::new(),
        })
    }

    fn update_collection_title(&self, id: &CollectionId, title: &str) -> Result<Collection> {
        let row = collection_row(id)?;
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE collections SET title = ?1 WHERE id = ?2",
            params![title, row],
        )?;
        if changed == 0 {
            return Err(PersistenceError::not_found("collection", id));
        }
        load_collections(&conn, Some(row))?
            .pop()
            .ok_or_else(|| PersistenceError::not_found("collection", id))
    }

    fn insert_collection_item(
        &self,
        collection_id: &CollectionId,
        item: NewItem,
    ) -> Result<CollectionItem> {
        let row = collection_row(collection_id)?;
        let conn = self.conn()?;
        if !exists(&conn, "collections", row)? {
            return Err(PersistenceError::not_found("collection", collection_id));
        }
        conn.execute(
            "INSERT INTO collection_items (collection_id, content, position) VALUES (?1, ?2, ?3)",
            params![row, item.content, item.position],
        )?;
        Ok(CollectionItem {
            id: ItemId::from_row(conn.last_insert_rowid()),
            content: item.content,
            position: item.position,
        })
    }

    fn delete_collection_item(
        &self,
        collection_id: &CollectionId,
        item_id: &ItemId,
    ) -> Result<()> {
        let row = collection_row(collection_id)?;
        let conn = self.conn()?;
        if !exists(&conn, "collections", row)? {
            return Err(PersistenceError::not_found("collection", collection_id));
        }
        let item_row = item_id
            .as_row()
            .ok_or_else(|| PersistenceError::not_found("collection item", item_id))?;
        let changed = conn.execute(
            "DELETE FROM collection_items WHERE id = ?1 AND collection_id = ?2",
            params![item_row, row],
        )?;
        if changed == 0 {
            return Err(PersistenceError::not_found("collection item", item_id));
        }
        Ok(())
    }

    fn replace_all(&self, data: AppData) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM lists", [])?;
        tx.execute("DELETE FROM collections", [])?;
        for list in &data.lists {
            insert_list(&tx, list)?;
        }
        for collection in &data.collections {
            insert_collection(&tx, collection)?;
        }
        tx.commit()?;
        info!(
            lists = data.lists.len(),
            collections = data.collections.len(),
            "replaced sqlite contents"
        );
        Ok(())
    }
}
