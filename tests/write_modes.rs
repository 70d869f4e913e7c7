//! Overlapping mutations: the last write to land wins in `Overlapping` mode,
//! nothing is lost in `Serialized` mode.

mod support;

use pricebook::{KeyValueStore, WriteMode};
use support::{product, slow_product_store};

#[tokio::test]
async fn overlapping_writes_lose_an_update() {
    let store = slow_product_store(WriteMode::Overlapping);
    store.load().await;

    let (a, b) = tokio::join!(
        store.add_product(product("Rice", 60.0)),
        store.add_product(product("Sugar", 90.0)),
    );
    assert!(a.is_ok() && b.is_ok());

    // Both started from the empty list, so only one survives.
    assert_eq!(store.products().len(), 1);
    let blob = store.collection().storage().get("products").await.unwrap().unwrap();
    let stored: Vec<pricebook::Product> = serde_json::from_str(&blob).unwrap();
    assert_eq!(stored, store.products());
}

#[tokio::test]
async fn serialized_writes_keep_every_update() {
    let store = slow_product_store(WriteMode::Serialized);
    store.load().await;

    let (a, b, c) = tokio::join!(
        store.add_product(product("Rice", 60.0)),
        store.add_product(product("Sugar", 90.0)),
        store.add_product(product("Salt", 30.0)),
    );
    let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());

    let names: Vec<_> = store.products().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Rice", "Sugar", "Salt"]);
    assert!(a.id != b.id && b.id != c.id && a.id != c.id);
}

#[tokio::test]
async fn serialized_update_and_delete_interleave_safely() {
    let store = slow_product_store(WriteMode::Serialized);
    store.load().await;
    let rice = store.add_product(product("Rice", 60.0)).await.unwrap();
    let salt = store.add_product(product("Salt", 30.0)).await.unwrap();

    let (updated, deleted) = tokio::join!(
        store.update_product(&rice.id, pricebook::ProductPatch::default().price_per_kg(65.0)),
        store.delete_product(&salt.id),
    );
    assert!(updated.unwrap().is_some());
    assert!(deleted.unwrap());

    let products = store.products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price_per_kg, 65.0);
}
