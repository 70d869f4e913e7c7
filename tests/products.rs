mod support;

use pricebook::{calculator, CollectionStore, InMemoryKeyValueStore, Product, ProductPatch};
use std::collections::HashSet;
use support::{product, product_store};

#[tokio::test]
async fn rice_lifecycle() {
    let (store, clock) = product_store(InMemoryKeyValueStore::new());
    store.load().await;
    assert!(store.products().is_empty());

    let rice = store.add_product(product("Rice", 60.0)).await.unwrap();
    let products = store.products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Rice");
    assert_eq!(products[0].price_per_kg, 60.0);

    clock.advance(1_000);
    store
        .update_product(&rice.id, ProductPatch::default().price_per_kg(65.0))
        .await
        .unwrap();
    assert_eq!(store.products()[0].price_per_kg, 65.0);
    assert!(store.products()[0].updated_at > store.products()[0].created_at);

    assert!(store.delete_product(&rice.id).await.unwrap());
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn ids_stay_unique_across_mutations() {
    let (store, clock) = product_store(InMemoryKeyValueStore::new());
    store.load().await;

    let mut ids = Vec::new();
    for (i, name) in ["Rice", "Sugar", "Salt", "Tea", "Lentils"].iter().enumerate() {
        if i % 2 == 0 {
            clock.advance(1);
        }
        ids.push(store.add_product(product(name, 10.0 + i as f64)).await.unwrap().id);
    }
    store.delete_product(&ids[1]).await.unwrap();
    store.add_product(product("Flour", 55.0)).await.unwrap();

    let listed: Vec<_> = store.products().into_iter().map(|p| p.id).collect();
    let unique: HashSet<_> = listed.iter().collect();
    assert_eq!(listed.len(), 5);
    assert_eq!(unique.len(), 5);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let (store, clock) = product_store(InMemoryKeyValueStore::new());
    store.load().await;
    let sugar = store.add_product(product("Sugar", 90.0)).await.unwrap();
    let salt = store.add_product(product("Salt", 30.0)).await.unwrap();

    clock.advance(5);
    let renamed = store
        .update_product(&sugar.id, ProductPatch::default().name("Brown Sugar"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(renamed.id, sugar.id);
    assert_eq!(renamed.price_per_kg, 90.0);
    assert_eq!(renamed.created_at, sugar.created_at);
    assert!(renamed.updated_at >= sugar.updated_at);
    assert_eq!(store.product(&salt.id), Some(salt));
    assert_eq!(store.products()[0].name, "Brown Sugar");
}

#[tokio::test]
async fn delete_removes_exactly_one() {
    let (store, _) = product_store(InMemoryKeyValueStore::new());
    store.load().await;
    let a = store.add_product(product("A", 1.0)).await.unwrap();
    let b = store.add_product(product("B", 2.0)).await.unwrap();
    let c = store.add_product(product("C", 3.0)).await.unwrap();

    assert!(store.delete_product(&b.id).await.unwrap());
    assert_eq!(store.products(), vec![a, c]);
    assert!(!store.delete_product(&b.id).await.unwrap());
    assert_eq!(store.products().len(), 2);
}

#[tokio::test]
async fn reload_matches_cache_after_each_mutation() {
    let storage = InMemoryKeyValueStore::new();
    let (store, clock) = product_store(storage.clone());
    store.load().await;

    let check = |cache: Vec<Product>| {
        let storage = storage.clone();
        async move {
            let fresh = CollectionStore::<Product, _>::new(storage);
            assert_eq!(fresh.load().await, cache);
        }
    };

    let rice = store.add_product(product("Rice", 60.0)).await.unwrap();
    check(store.products()).await;

    clock.advance(10);
    store
        .update_product(&rice.id, ProductPatch::default().price_per_kg(62.5))
        .await
        .unwrap();
    check(store.products()).await;

    store.delete_product(&rice.id).await.unwrap();
    check(store.products()).await;
}

#[tokio::test]
async fn filtered_products_are_a_subsequence() {
    let (store, _) = product_store(InMemoryKeyValueStore::new());
    store.load().await;
    for (name, price) in [("Basmati Rice", 120.0), ("Sugar", 90.0), ("Rice Flour", 70.0), ("Tea", 400.0)] {
        store.add_product(product(name, price)).await.unwrap();
    }

    for query in ["", "rice", "RICE", "a", "zzz", "Tea"] {
        store.set_search_query(query);
        let all = store.products();
        let filtered = store.filtered_products();

        let mut cursor = all.iter();
        for p in &filtered {
            assert!(cursor.any(|q| q == p), "{query:?} broke order or invented {p:?}");
            assert!(p.name.to_lowercase().contains(&query.to_lowercase()));
        }
        if query.is_empty() {
            assert_eq!(filtered, all);
        }
    }
}

#[tokio::test]
async fn quick_prices_for_a_stored_product() {
    let (store, _) = product_store(InMemoryKeyValueStore::new());
    store.load().await;
    let rice = store.add_product(product("Rice", 60.0)).await.unwrap();

    let rows = calculator::quick_calculate(rice.price_per_kg);
    let half_kilo = rows.iter().find(|r| r.label == "500gm").unwrap();
    assert_eq!(
        calculator::format_price(calculator::DEFAULT_CURRENCY_SYMBOL, half_kilo.price).as_deref(),
        Some("৳30.00")
    );
}
