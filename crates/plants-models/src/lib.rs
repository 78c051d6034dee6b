//! Core data models for 30Plants.
//!
//! Lists and collections are aggregate roots that exclusively own their
//! ordered items. Both serialize to the camelCase JSON shape shared by the
//! HTTP surface and the document store.

pub mod collection;
pub mod data;
pub mod ids;
pub mod list;

pub use collection::{Collection, CollectionItem};
pub use data::{AppData, Summary};
pub use ids::{CollectionId, ItemId, ListId};
pub use list::{List, ListItem, NewItem};

/// Returns the position a newly appended item receives.
///
/// Positions start at 0 and continue from the highest existing position,
/// so gaps left by deleted items are never reused. `None` once the highest
/// position is `u32::MAX`.
pub fn next_position<I>(positions: I) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    match positions.into_iter().max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}
