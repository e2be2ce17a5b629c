//! Random outfit generation
//!
//! An outfit draws one item per category: every required category must be
//! present in the wardrobe, optional ones are added when available.

use eyre::Result;
use indexmap::IndexMap;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::OutfitConfig;
use crate::store::KvStore;
use crate::store::document;
use crate::wardrobe::{Item, WardrobeStore};

/// Key of the last generated combo
pub const LAST_COMBO_KEY: &str = "last_combo";

/// category -> chosen item, required categories first
pub type Combo = IndexMap<String, Item>;

/// Group items by category, keeping the order categories were first seen
pub fn group_by_category(items: &[Item]) -> IndexMap<&str, Vec<&Item>> {
    let mut groups: IndexMap<&str, Vec<&Item>> = IndexMap::new();
    for item in items {
        groups.entry(item.category.as_str()).or_default().push(item);
    }
    groups
}

/// Pick one item per category, or `None` if a required category is missing
pub fn select<R: Rng + ?Sized>(items: &[Item], rules: &OutfitConfig, rng: &mut R) -> Option<Combo> {
    if items.is_empty() {
        return None;
    }

    let groups = group_by_category(items);

    if let Some(missing) = rules.required.iter().find(|c| !groups.contains_key(c.as_str())) {
        log::debug!("No outfit possible: missing {}", missing);
        return None;
    }

    let mut combo = Combo::new();
    for category in rules.required.iter().chain(&rules.optional) {
        if let Some(&item) = groups.get(category.as_str()).and_then(|g| g.choose(rng)) {
            combo.insert(category.clone(), item.clone());
        }
    }
    Some(combo)
}

pub struct OutfitSelector<'a> {
    store: &'a dyn KvStore,
    rules: &'a OutfitConfig,
}

impl<'a> OutfitSelector<'a> {
    pub fn new(store: &'a dyn KvStore, rules: &'a OutfitConfig) -> Self {
        Self { store, rules }
    }

    /// Generate an outfit from the user's wardrobe and remember it as the
    /// last combo
    pub fn generate<R: Rng + ?Sized>(&self, username: &str, rng: &mut R) -> Result<Option<Combo>> {
        let items = WardrobeStore::new(self.store).items(username)?;

        let Some(combo) = select(&items, self.rules, rng) else {
            log::info!("Outfit infeasible for {} ({} items)", username, items.len());
            return Ok(None);
        };

        document::write(self.store, LAST_COMBO_KEY, &combo)?;
        log::info!(
            "Generated outfit for {}: {}",
            username,
            combo
                .iter()
                .map(|(cat, item)| format!("{}={}", cat, item.id))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Some(combo))
    }

    /// The most recently generated combo
    pub fn last(&self) -> Result<Option<Combo>> {
        document::read(self.store, LAST_COMBO_KEY)
    }
}
