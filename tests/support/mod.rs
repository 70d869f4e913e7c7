//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use pricebook::{
    DueBillStore, InMemoryKeyValueStore, ManualClock, NewDueBill, NewProduct, ProductStore,
    WriteMode,
};

pub const START: i64 = 1_700_000_000_000;

pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(START))
}

pub fn product_store(storage: InMemoryKeyValueStore) -> (ProductStore<InMemoryKeyValueStore>, Arc<ManualClock>) {
    let clock = clock();
    (ProductStore::new(storage).with_clock(clock.clone()), clock)
}

pub fn due_bill_store(storage: InMemoryKeyValueStore) -> (DueBillStore<InMemoryKeyValueStore>, Arc<ManualClock>) {
    let clock = clock();
    (DueBillStore::new(storage).with_clock(clock.clone()), clock)
}

/// Storage whose writes take long enough for mutations to overlap.
pub fn slow_storage() -> InMemoryKeyValueStore {
    InMemoryKeyValueStore::new().with_write_latency(Duration::from_millis(20))
}

pub fn slow_product_store(mode: WriteMode) -> ProductStore<InMemoryKeyValueStore> {
    ProductStore::new(slow_storage())
        .with_clock(clock())
        .with_write_mode(mode)
}

pub fn product(name: &str, price_per_kg: f64) -> NewProduct {
    NewProduct::new(name, price_per_kg).expect("valid product")
}

pub fn bill(name: &str, note: &str) -> NewDueBill {
    NewDueBill::new(name, note).expect("valid due bill")
}
