//! Closet: the public wardrobe surface
//!
//! Resolves the active session once per call and hands the username to the
//! wardrobe store and outfit selector. With no session, item and outfit
//! operations report "no access" (`false`, empty, or `None`) instead of
//! erroring.

use chrono::Utc;
use eyre::Result;
use rand::Rng;
use std::path::Path;

use crate::account::{AccountRegistry, SessionHolder};
use crate::config::{Config, OutfitConfig};
use crate::outfit::{Combo, OutfitSelector};
use crate::store::{FileStore, KvStore};
use crate::wardrobe::{Item, WardrobeStore, add};

pub struct Closet {
    store: Box<dyn KvStore>,
    rules: OutfitConfig,
}

impl Closet {
    pub fn new(store: Box<dyn KvStore>, rules: OutfitConfig) -> Self {
        Self { store, rules }
    }

    /// Open the file-backed closet described by `config`
    pub fn open(config: &Config) -> Self {
        let data_dir = config.data_dir();
        log::debug!("Opening closet at {}", data_dir.display());
        Self::new(Box::new(FileStore::new(data_dir)), config.outfit.clone())
    }

    pub fn rules(&self) -> &OutfitConfig {
        &self.rules
    }

    fn accounts(&self) -> AccountRegistry<'_> {
        AccountRegistry::new(self.store.as_ref())
    }

    fn session(&self) -> SessionHolder<'_> {
        SessionHolder::new(self.store.as_ref())
    }

    fn wardrobe(&self) -> WardrobeStore<'_> {
        WardrobeStore::new(self.store.as_ref())
    }

    fn selector(&self) -> OutfitSelector<'_> {
        OutfitSelector::new(self.store.as_ref(), &self.rules)
    }

    pub fn signup(&self, username: &str, password: &str) -> Result<bool> {
        self.accounts().signup(username, password)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<bool> {
        self.accounts().login(username, password)
    }

    pub fn logout(&self) -> Result<()> {
        self.session().logout()
    }

    pub fn current_user(&self) -> Result<Option<String>> {
        self.session().current_user()
    }

    pub fn save_item(&self, item: Item) -> Result<bool> {
        let Some(user) = self.current_user()? else {
            log::info!("save_item denied: no active session");
            return Ok(false);
        };
        self.wardrobe().save_item(&user, item)?;
        Ok(true)
    }

    pub fn get_items(&self) -> Result<Vec<Item>> {
        match self.current_user()? {
            Some(user) => self.wardrobe().items(&user),
            None => Ok(Vec::new()),
        }
    }

    pub fn delete_item(&self, id: i64) -> Result<bool> {
        let Some(user) = self.current_user()? else {
            log::info!("delete_item denied: no active session");
            return Ok(false);
        };
        self.wardrobe().delete_item(&user, id)
    }

    /// Run the add flow for an image on disk; `None` when not logged in
    pub fn add_item_from_file(&self, image: &Path, category: &str, note: Option<&str>) -> Result<Option<Item>> {
        let Some(user) = self.current_user()? else {
            log::info!("add denied: no active session");
            return Ok(None);
        };

        let id = self.wardrobe().next_id(&user, Utc::now().timestamp_millis())?;
        let item = add::build_item(id, image, category, note)?;
        if !self.save_item(item.clone())? {
            return Ok(None);
        }
        Ok(Some(item))
    }

    pub fn generate_outfit(&self) -> Result<Option<Combo>> {
        self.generate_outfit_with(&mut rand::thread_rng())
    }

    pub fn generate_outfit_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<Combo>> {
        let Some(user) = self.current_user()? else {
            log::info!("generate_outfit denied: no active session");
            return Ok(None);
        };
        self.selector().generate(&user, rng)
    }

    /// Last generated combo, shown only to a logged-in user
    pub fn last_outfit(&self) -> Result<Option<Combo>> {
        if self.current_user()?.is_none() {
            return Ok(None);
        }
        self.selector().last()
    }
}
