//! In-memory stores for tests and local development.
//!
//! Every store is cheap to clone and shares its map, so a test can hand one
//! clone to a workflow and inspect another afterwards.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    models::{Cart, Product, Ticket},
    store::{CartStore, CatalogStore, StoreError, StoreResult, TicketStore},
};

fn read<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| StoreError::Conflict(format!("failed to acquire read lock: {e}")))
}

fn write<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| StoreError::Conflict(format!("failed to acquire write lock: {e}")))
}

#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::new();
        for product in products {
            catalog.insert(product);
        }
        catalog
    }

    pub fn insert(&self, product: Product) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.id, product);
        }
    }

    pub fn remove(&self, product_id: Uuid) -> Option<Product> {
        self.products
            .write()
            .ok()
            .and_then(|mut products| products.remove(&product_id))
    }

    pub fn stock_of(&self, product_id: Uuid) -> Option<i32> {
        self.products
            .read()
            .ok()
            .and_then(|products| products.get(&product_id).map(|p| p.stock))
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn get_product(&self, product_id: Uuid) -> StoreResult<Option<Product>> {
        Ok(read(&self.products)?.get(&product_id).cloned())
    }

    async fn decrement_stock(&self, product_id: Uuid, by: i32) -> StoreResult<()> {
        // The write guard is held across the check and the update.
        let mut products = write(&self.products)?;
        let product = products.get_mut(&product_id).ok_or(StoreError::NotFound)?;
        if by <= 0 || product.stock < by {
            return Err(StoreError::Conflict(format!(
                "cannot take {by} from stock {} of product {product_id}",
                product.stock
            )));
        }
        product.stock -= by;
        Ok(())
    }

    async fn product_in_shop(&self, product_id: Uuid, shop_id: Uuid) -> StoreResult<bool> {
        Ok(read(&self.products)?
            .get(&product_id)
            .is_some_and(|p| p.shop_id == shop_id))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCarts {
    carts: Arc<RwLock<HashMap<Uuid, Cart>>>,
}

impl InMemoryCarts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.carts.read().map(|carts| carts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CartStore for InMemoryCarts {
    async fn get_cart_for_user(&self, user_id: Uuid) -> StoreResult<Option<Cart>> {
        Ok(read(&self.carts)?
            .values()
            .find(|cart| cart.user_id == user_id)
            .cloned())
    }

    async fn save_cart(&self, cart: &Cart) -> StoreResult<()> {
        let mut carts = write(&self.carts)?;
        let taken = carts
            .values()
            .any(|other| other.user_id == cart.user_id && other.id != cart.id);
        if taken {
            return Err(StoreError::Conflict(format!(
                "user {} already has an open cart",
                cart.user_id
            )));
        }
        carts.insert(cart.id, cart.clone());
        Ok(())
    }

    async fn delete_cart(&self, cart_id: Uuid) -> StoreResult<()> {
        write(&self.carts)?
            .remove(&cart_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTickets {
    tickets: Arc<RwLock<Vec<Ticket>>>,
}

impl InMemoryTickets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Ticket> {
        self.tickets
            .read()
            .map(|tickets| tickets.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TicketStore for InMemoryTickets {
    async fn create_ticket(&self, ticket: &Ticket) -> StoreResult<Uuid> {
        let mut tickets = write(&self.tickets)?;
        if tickets.iter().any(|t| t.id == ticket.id) {
            return Err(StoreError::Conflict(format!("ticket {} already exists", ticket.id)));
        }
        tickets.push(ticket.clone());
        Ok(ticket.id)
    }
}
