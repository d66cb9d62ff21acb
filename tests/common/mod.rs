#![allow(dead_code)]

use chrono::Utc;
use shop_checkout_api::{
    models::Product,
    store::{InMemoryCarts, InMemoryCatalog, InMemoryTickets},
};
use uuid::Uuid;

pub struct Fixture {
    pub catalog: InMemoryCatalog,
    pub carts: InMemoryCarts,
    pub tickets: InMemoryTickets,
    pub shop_id: Uuid,
    pub user_id: Uuid,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            catalog: InMemoryCatalog::new(),
            carts: InMemoryCarts::new(),
            tickets: InMemoryTickets::new(),
            shop_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        }
    }

    pub fn stock(&self, name: &str, price: i64, stock: i32) -> Product {
        let product = product(self.shop_id, name, price, stock);
        self.catalog.insert(product.clone());
        product
    }
}

pub fn product(shop_id: Uuid, name: &str, price: i64, stock: i32) -> Product {
    Product {
        id: Uuid::new_v4(),
        shop_id,
        name: name.to_string(),
        price,
        stock,
        description: None,
        collection: None,
        img: None,
        created_at: Utc::now(),
    }
}
