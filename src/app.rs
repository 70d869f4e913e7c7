//! Application state: one owner per collection, created once and shared by
//! handle.
//!
//! ```ignore
//! let config = Config::from_file_or_default("pricebook.toml")?;
//! let book = Pricebook::open(&config).await?;
//! book.load(Some(Theme::Dark)).await;
//!
//! let products = book.products(); // Arc<ProductStore<_>>, hand to any screen
//! ```

use std::sync::Arc;

use crate::collection::{CollectionStore, WriteMode};
use crate::config::Config;
use crate::due_bills::DueBillStore;
use crate::products::ProductStore;
use crate::record::{Clock, SystemClock};
use crate::storage::{FileKeyValueStore, KeyValueStore, StorageError};
use crate::theme::{Theme, ThemeStore};

/// The theme, product and due-bill stores over one shared adapter.
#[derive(Debug)]
pub struct Pricebook<S: KeyValueStore + Clone> {
    theme: Arc<ThemeStore<S>>,
    products: Arc<ProductStore<S>>,
    due_bills: Arc<DueBillStore<S>>,
    currency_symbol: String,
}

impl<S: KeyValueStore + Clone> Pricebook<S> {
    /// Build the stores without touching storage. Call [`Pricebook::load`]
    /// before use.
    pub fn new(storage: S, config: &Config) -> Self {
        Self::with_clock(storage, config, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: S, config: &Config, clock: Arc<dyn Clock>) -> Self {
        let keys = &config.storage;
        let mode: WriteMode = config.store.write_mode;

        let products = CollectionStore::with_key(storage.clone(), keys.products_key.clone())
            .with_clock(clock.clone())
            .with_write_mode(mode);
        let due_bills = CollectionStore::with_key(storage.clone(), keys.due_bills_key.clone())
            .with_clock(clock)
            .with_write_mode(mode);

        Self {
            theme: Arc::new(ThemeStore::with_key(storage, keys.theme_key.clone())),
            products: Arc::new(ProductStore::from_collection(products)),
            due_bills: Arc::new(DueBillStore::from_collection(due_bills)),
            currency_symbol: config.display.currency_symbol.clone(),
        }
    }

    /// Load everything, in order: theme, products, due bills.
    pub async fn load(&self, system_theme: Option<Theme>) {
        let theme = self.theme.load(system_theme).await;
        let products = self.products.load().await.len();
        let due_bills = self.due_bills.load().await.len();
        tracing::info!(%theme, products, due_bills, "pricebook loaded");
    }

    pub fn theme(&self) -> Arc<ThemeStore<S>> {
        Arc::clone(&self.theme)
    }

    pub fn products(&self) -> Arc<ProductStore<S>> {
        Arc::clone(&self.products)
    }

    pub fn due_bills(&self) -> Arc<DueBillStore<S>> {
        Arc::clone(&self.due_bills)
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// True until both collections finished their first load.
    pub fn is_loading(&self) -> bool {
        self.products.is_loading() || self.due_bills.is_loading()
    }
}

impl Pricebook<FileKeyValueStore> {
    /// File-backed stores under `config.storage.data_dir`, creating the
    /// directory if needed.
    pub async fn open(config: &Config) -> Result<Self, StorageError> {
        let storage = FileKeyValueStore::new(&config.storage.data_dir);
        storage.ensure_dir().await?;
        Ok(Self::new(storage, config))
    }
}
