use std::sync::Arc;

use tokio::sync::watch;

use crate::collection::{CollectionStore, Snapshot, WriteMode};
use crate::error::StoreError;
use crate::record::Clock;
use crate::storage::KeyValueStore;

use super::{NewProduct, Product, ProductPatch};

/// Products whose name contains `query`, ignoring case, in collection order.
/// An empty query keeps everything.
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    if query.is_empty() {
        return products.to_vec();
    }
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// The product collection plus the current search query.
#[derive(Debug)]
pub struct ProductStore<S: KeyValueStore> {
    collection: CollectionStore<Product, S>,
    query: watch::Sender<String>,
}

impl<S: KeyValueStore> ProductStore<S> {
    pub fn new(storage: S) -> Self {
        Self::from_collection(CollectionStore::new(storage))
    }

    pub fn from_collection(collection: CollectionStore<Product, S>) -> Self {
        Self {
            collection,
            query: watch::Sender::new(String::new()),
        }
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self::from_collection(CollectionStore::with_key(storage, key))
    }

    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self::from_collection(self.collection.with_clock(clock))
    }

    pub fn with_write_mode(self, mode: WriteMode) -> Self {
        Self::from_collection(self.collection.with_write_mode(mode))
    }

    /// The underlying collection, for listeners and raw access.
    pub fn collection(&self) -> &CollectionStore<Product, S> {
        &self.collection
    }

    pub async fn load(&self) -> Vec<Product> {
        self.collection.load().await
    }

    pub fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    pub fn products(&self) -> Vec<Product> {
        self.collection.list()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.collection.get(id)
    }

    pub async fn add_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        self.collection.add(product).await
    }

    /// Rejects an invalid patch before touching the collection.
    pub async fn update_product(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        self.collection.update(id, patch).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<bool, StoreError> {
        self.collection.delete(id).await
    }

    pub fn search_query(&self) -> String {
        self.query.borrow().clone()
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.query.send_if_modified(|current| {
            if *current == query {
                false
            } else {
                *current = query;
                true
            }
        });
    }

    /// The cached products filtered by the current search query, recomputed
    /// on every call.
    pub fn filtered_products(&self) -> Vec<Product> {
        let query = self.query.borrow().clone();
        filter_products(&self.products(), &query)
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot<Product>> {
        self.collection.subscribe()
    }

    pub fn subscribe_query(&self) -> watch::Receiver<String> {
        self.query.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            price_per_kg: 10.0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let products = vec![
            product("1", "Basmati Rice"),
            product("2", "Sugar"),
            product("3", "rice flour"),
        ];
        let names: Vec<_> = filter_products(&products, "RICE")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Basmati Rice", "rice flour"]);
    }

    #[test]
    fn empty_query_is_identity() {
        let products = vec![product("1", "Sugar"), product("2", "Salt")];
        assert_eq!(filter_products(&products, ""), products);
    }

    #[test]
    fn no_match_is_empty() {
        let products = vec![product("1", "Sugar")];
        assert!(filter_products(&products, "tea").is_empty());
    }

    #[tokio::test]
    async fn filtered_view_follows_query_and_collection() {
        let store = ProductStore::new(InMemoryKeyValueStore::new());
        store.load().await;
        store.add_product(NewProduct::new("Rice", 60.0).unwrap()).await.unwrap();
        store.add_product(NewProduct::new("Sugar", 90.0).unwrap()).await.unwrap();

        assert_eq!(store.filtered_products().len(), 2);

        let mut query_rx = store.subscribe_query();
        store.set_search_query("su");
        assert!(query_rx.has_changed().unwrap());
        assert_eq!(store.search_query(), "su");
        let filtered = store.filtered_products();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Sugar");

        store.add_product(NewProduct::new("Brown sugar", 110.0).unwrap()).await.unwrap();
        assert_eq!(store.filtered_products().len(), 2);
    }

    #[tokio::test]
    async fn same_query_does_not_notify() {
        let store = ProductStore::new(InMemoryKeyValueStore::new());
        let mut rx = store.subscribe_query();
        store.set_search_query("");
        assert!(!rx.has_changed().unwrap());
        rx.borrow_and_update();
        store.set_search_query("x");
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn invalid_patch_never_reaches_storage() {
        let store = ProductStore::new(InMemoryKeyValueStore::new());
        store.load().await;
        let rice = store.add_product(NewProduct::new("Rice", 60.0).unwrap()).await.unwrap();

        let err = store
            .update_product(&rice.id, ProductPatch::default().name("  "))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Please enter a name");
        assert_eq!(store.product(&rice.id).unwrap().name, "Rice");
    }
}
