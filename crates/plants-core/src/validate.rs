//! Checks a whole-dataset snapshot before it replaces what is stored.
//!
//! Every backend enforces the same rules this way: ids unique per kind,
//! titles and contents non-blank, item ids and positions unique within
//! their parent, and no position at `u32::MAX` (nothing could follow it).

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use plants_models::{AppData, ItemId};

use crate::error::{Result, ServiceError};

fn invalid(message: String) -> ServiceError {
    ServiceError::InvalidArgument(message)
}

fn unique<T: Hash + Eq + Display>(seen: &mut HashSet<T>, value: T, what: &str) -> Result<()> {
    if seen.contains(&value) {
        return Err(invalid(format!("duplicate {what} {value}")));
    }
    seen.insert(value);
    Ok(())
}

fn not_blank(value: &str, what: &str, owner: impl Display) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{what} of {owner} is blank")));
    }
    Ok(())
}

fn check_items<'a>(
    owner: impl Display + Copy,
    items: impl Iterator<Item = (&'a ItemId, &'a str, u32)>,
) -> Result<()> {
    let mut ids = HashSet::new();
    let mut positions = HashSet::new();
    for (id, content, position) in items {
        unique(&mut ids, id, "item id")?;
        unique(&mut positions, position, &format!("position in {owner}:"))?;
        if position == u32::MAX {
            return Err(invalid(format!("position of item {id} is out of range")));
        }
        not_blank(content, "content", format_args!("item {id}"))?;
    }
    Ok(())
}

/// Returns `InvalidArgument` describing the first rule `data` breaks.
pub fn validate_snapshot(data: &AppData) -> Result<()> {
    let mut list_ids = HashSet::new();
    for list in &data.lists {
        unique(&mut list_ids, &list.id, "list id")?;
        not_blank(&list.title, "title", format_args!("list {}", list.id))?;
        check_items(
            &list.id,
            list.items
                .iter()
                .map(|item| (&item.id, item.content.as_str(), item.position)),
        )?;
    }

    let mut collection_ids = HashSet::new();
    for collection in &data.collections {
        unique(&mut collection_ids, &collection.id, "collection id")?;
        not_blank(
            &collection.title,
            "title",
            format_args!("collection {}", collection.id),
        )?;
        check_items(
            &collection.id,
            collection
                .items
                .iter()
                .map(|item| (&item.id, item.content.as_str(), item.position)),
        )?;
    }
    Ok(())
}
