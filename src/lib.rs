//! Offline-first price book.
//!
//! Products with a per-kilogram price, a price/weight calculator, and
//! due-bill notes, each collection persisted as one JSON array in a
//! key-value store and cached in memory.
//!
//! - [`CollectionStore`]: generic cached CRUD over one storage key.
//! - [`ProductStore`] / [`DueBillStore`]: the two collections.
//! - [`calculator`]: pure conversions between price and weight.
//! - [`Pricebook`]: owns all stores and hands out shared handles.

// Lets `#[derive(Record)]` refer to `pricebook::Record` inside this crate.
extern crate self as pricebook;

mod app;
pub mod calculator;
mod collection;
pub mod config;
mod due_bills;
mod error;
pub mod logging;
mod products;
mod record;
pub mod storage;
mod theme;

pub use app::Pricebook;
#[cfg(feature = "emitter")]
pub use collection::StoreEvent;
pub use collection::{CollectionStore, Snapshot, WriteMode};
pub use config::{Config, ConfigError};
pub use due_bills::{DueBill, DueBillPatch, DueBillStore, NewDueBill};
pub use error::{StoreError, ValidationError};
pub use products::{filter_products, NewProduct, Product, ProductPatch, ProductStore};
pub use record::{Clock, Content, IdGenerator, ManualClock, Record, SystemClock};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError};
pub use theme::{Theme, ThemeState, ThemeStore, UnknownTheme};

// Derive macro for the `Record` trait
pub use pricebook_macros::Record;
