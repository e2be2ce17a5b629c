//! Wardrobe storage
//!
//! Items are stored per user as an ordered sequence in the `items`
//! document. Callers pass the username explicitly; session gating lives in
//! the closet facade.

pub mod add;

use eyre::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::store::KvStore;
use crate::store::document;

/// Key of the items document
pub const ITEMS_KEY: &str = "items";

/// Categories the outfit generator knows about. Any other string is a valid
/// category too.
pub mod category {
    pub const SHIRT: &str = "Shirt";
    pub const PANT: &str = "Pant";
    pub const SHOES: &str = "Shoes";
    pub const JACKET: &str = "Jacket";
    pub const ACCESSORY: &str = "Accessory";
}

/// A clothing item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub category: String,
    /// Encoded image, normally a `data:` URL
    pub image: String,
    #[serde(default)]
    pub note: String,
}

/// username -> items in insertion order
pub type ItemTable = IndexMap<String, Vec<Item>>;

pub struct WardrobeStore<'a> {
    store: &'a dyn KvStore,
}

impl<'a> WardrobeStore<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    fn read(&self) -> Result<ItemTable> {
        document::read_or_default(self.store, ITEMS_KEY)
    }

    /// Append `item` to the user's sequence. Ids are not checked for
    /// duplicates.
    pub fn save_item(&self, username: &str, item: Item) -> Result<()> {
        let mut all = self.read()?;
        log::info!("Saving item {} ({}) for {}", item.id, item.category, username);
        all.entry(username.to_string()).or_default().push(item);
        document::write(self.store, ITEMS_KEY, &all)
    }

    /// The user's items, empty if none were ever saved
    pub fn items(&self, username: &str) -> Result<Vec<Item>> {
        let mut all = self.read()?;
        let items = all.shift_remove(username).unwrap_or_default();
        log::debug!("Loaded {} items for {}", items.len(), username);
        Ok(items)
    }

    /// Remove every item with `id` from the user's sequence.
    ///
    /// Returns `false` only if the user has no recorded sequence; deleting an
    /// id that matches nothing still rewrites the sequence and returns `true`.
    pub fn delete_item(&self, username: &str, id: i64) -> Result<bool> {
        let mut all = self.read()?;
        let Some(items) = all.get_mut(username) else {
            log::info!("Delete of {} ignored: {} has no items", id, username);
            return Ok(false);
        };

        let before = items.len();
        items.retain(|it| it.id != id);
        log::info!("Deleted {} item(s) with id {} for {}", before - items.len(), id, username);

        document::write(self.store, ITEMS_KEY, &all)?;
        Ok(true)
    }

    /// Id for a new item created at `now_millis`: the creation instant,
    /// bumped past the user's largest id so ids from the add flow never
    /// collide.
    pub fn next_id(&self, username: &str, now_millis: i64) -> Result<i64> {
        let max = self.items(username)?.iter().map(|it| it.id).max();
        Ok(match max {
            Some(max) if max >= now_millis => max + 1,
            _ => now_millis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn item(id: i64, category: &str) -> Item {
        Item {
            id,
            category: category.to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn test_save_and_list_preserves_order() {
        let store = MemoryStore::new();
        let wardrobe = WardrobeStore::new(&store);

        wardrobe.save_item("alice", item(3, "Shoes")).unwrap();
        wardrobe.save_item("alice", item(1, "Shirt")).unwrap();
        wardrobe.save_item("alice", item(2, "Pant")).unwrap();

        let ids: Vec<i64> = wardrobe.items("alice").unwrap().iter().map(|it| it.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_items_are_per_user() {
        let store = MemoryStore::new();
        let wardrobe = WardrobeStore::new(&store);

        wardrobe.save_item("alice", item(1, "Shirt")).unwrap();
        wardrobe.save_item("bob", item(1, "Pant")).unwrap();

        assert_eq!(wardrobe.items("alice").unwrap()[0].category, "Shirt");
        assert_eq!(wardrobe.items("bob").unwrap()[0].category, "Pant");
        assert!(wardrobe.items("carol").unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_all_matching_ids() {
        let store = MemoryStore::new();
        let wardrobe = WardrobeStore::new(&store);

        wardrobe.save_item("alice", item(7, "Shirt")).unwrap();
        wardrobe.save_item("alice", item(8, "Pant")).unwrap();
        wardrobe.save_item("alice", item(7, "Shoes")).unwrap();

        assert!(wardrobe.delete_item("alice", 7).unwrap());

        let items = wardrobe.items("alice").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 8);
    }

    #[test]
    fn test_delete_without_sequence_fails() {
        let store = MemoryStore::new();
        let wardrobe = WardrobeStore::new(&store);
        assert!(!wardrobe.delete_item("alice", 1).unwrap());
    }

    #[test]
    fn test_delete_unknown_id_succeeds() {
        let store = MemoryStore::new();
        let wardrobe = WardrobeStore::new(&store);
        wardrobe.save_item("alice", item(1, "Shirt")).unwrap();

        assert!(wardrobe.delete_item("alice", 99).unwrap());
        assert_eq!(wardrobe.items("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_delete_last_item_keeps_empty_sequence() {
        let store = MemoryStore::new();
        let wardrobe = WardrobeStore::new(&store);
        wardrobe.save_item("alice", item(1, "Shirt")).unwrap();

        assert!(wardrobe.delete_item("alice", 1).unwrap());
        assert!(wardrobe.items("alice").unwrap().is_empty());
        // Sequence still recorded, so a second delete is still accepted
        assert!(wardrobe.delete_item("alice", 1).unwrap());
    }

    #[test]
    fn test_next_id() {
        let store = MemoryStore::new();
        let wardrobe = WardrobeStore::new(&store);
        assert_eq!(wardrobe.next_id("alice", 1000).unwrap(), 1000);

        wardrobe.save_item("alice", item(1000, "Shirt")).unwrap();
        assert_eq!(wardrobe.next_id("alice", 1000).unwrap(), 1001);
        assert_eq!(wardrobe.next_id("alice", 900).unwrap(), 1001);
        assert_eq!(wardrobe.next_id("alice", 2000).unwrap(), 2000);
    }

    #[test]
    fn test_note_defaults_to_empty() {
        let item: Item = serde_json::from_str(r#"{"id":1,"category":"Shirt","image":"x"}"#).unwrap();
        assert_eq!(item.note, "");
    }
}
