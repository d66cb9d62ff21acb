//! Persistence seams used by the cart and checkout workflows.
//!
//! Each store comes in two flavours: [`postgres::PgStore`], which runs on any
//! SeaORM connection (pool or open transaction), and the in-memory stores in
//! [`memory`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Cart, Product, Ticket};

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryCarts, InMemoryCatalog, InMemoryTickets};
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("write not acknowledged: {0}")]
    Conflict(String),

    #[error("ORM error")]
    Orm(#[from] sea_orm::DbErr),

    #[error("malformed stored document")]
    Corrupt(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_product(&self, product_id: Uuid) -> StoreResult<Option<Product>>;

    /// Reads a product that is about to lose stock. Transactional stores lock
    /// the row until commit, so concurrent checkouts queue behind each other
    /// and see the stock left by the previous one.
    async fn get_product_for_update(&self, product_id: Uuid) -> StoreResult<Option<Product>> {
        self.get_product(product_id).await
    }

    /// Atomically lowers the stock of one product. Fails with
    /// [`StoreError::NotFound`] when the product is gone and
    /// [`StoreError::Conflict`] when the stock is lower than `by`.
    async fn decrement_stock(&self, product_id: Uuid, by: i32) -> StoreResult<()>;

    async fn product_in_shop(&self, product_id: Uuid, shop_id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn get_cart_for_user(&self, user_id: Uuid) -> StoreResult<Option<Cart>>;

    /// Upsert keyed by `cart.id`.
    async fn save_cart(&self, cart: &Cart) -> StoreResult<()>;

    async fn delete_cart(&self, cart_id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn create_ticket(&self, ticket: &Ticket) -> StoreResult<Uuid>;
}
