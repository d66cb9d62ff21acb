use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, LockType, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::{
        carts::{self, Entity as Carts},
        products::{self, Entity as Products},
        tickets::{self, Entity as Tickets},
    },
    models::{Cart, Product, Ticket, TicketKind},
    store::{CartStore, CatalogStore, StoreError, StoreResult, TicketStore},
};

/// SeaORM-backed store. Generic over the connection so the same code runs on
/// the shared pool and inside a checkout transaction.
pub struct PgStore<'c, C> {
    conn: &'c C,
}

impl<'c, C> PgStore<'c, C>
where
    C: ConnectionTrait,
{
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

fn unique_violation(err: sea_orm::DbErr, what: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            StoreError::Conflict(format!("{what}: {detail}"))
        }
        _ => StoreError::Orm(err),
    }
}

#[async_trait]
impl<'c, C> CatalogStore for PgStore<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn get_product(&self, product_id: Uuid) -> StoreResult<Option<Product>> {
        let product = Products::find_by_id(product_id)
            .one(self.conn)
            .await?
            .map(product_from_entity);
        Ok(product)
    }

    async fn get_product_for_update(&self, product_id: Uuid) -> StoreResult<Option<Product>> {
        // FOR UPDATE: a second checkout blocks here and re-reads the committed stock.
        let product = Products::find_by_id(product_id)
            .lock(LockType::Update)
            .one(self.conn)
            .await?
            .map(product_from_entity);
        Ok(product)
    }

    async fn decrement_stock(&self, product_id: Uuid, by: i32) -> StoreResult<()> {
        if by <= 0 {
            return Err(StoreError::Conflict(format!(
                "stock decrement must be positive, got {by}"
            )));
        }

        // Single conditional UPDATE: the row lock serialises concurrent decrements.
        let result = Products::update_many()
            .col_expr(
                products::Column::Stock,
                Expr::col(products::Column::Stock).sub(by),
            )
            .filter(products::Column::Id.eq(product_id))
            .filter(products::Column::Stock.gte(by))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            let exists = Products::find_by_id(product_id).count(self.conn).await? > 0;
            if !exists {
                return Err(StoreError::NotFound);
            }
            return Err(StoreError::Conflict(format!(
                "insufficient stock for product {product_id}"
            )));
        }

        Ok(())
    }

    async fn product_in_shop(&self, product_id: Uuid, shop_id: Uuid) -> StoreResult<bool> {
        let count = Products::find()
            .filter(products::Column::Id.eq(product_id))
            .filter(products::Column::ShopId.eq(shop_id))
            .count(self.conn)
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl<'c, C> CartStore for PgStore<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn get_cart_for_user(&self, user_id: Uuid) -> StoreResult<Option<Cart>> {
        Carts::find()
            .filter(carts::Column::UserId.eq(user_id))
            .one(self.conn)
            .await?
            .map(cart_from_entity)
            .transpose()
    }

    async fn save_cart(&self, cart: &Cart) -> StoreResult<()> {
        let active = carts::ActiveModel {
            id: Set(cart.id),
            user_id: Set(cart.user_id),
            products: Set(serde_json::to_value(&cart.products)?),
            total: Set(cart.total),
            created_at: Set(cart.created_at.into()),
            updated_at: Set(cart.updated_at.into()),
        };

        Carts::insert(active)
            .on_conflict(
                OnConflict::column(carts::Column::Id)
                    .update_columns([
                        carts::Column::Products,
                        carts::Column::Total,
                        carts::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await
            .map_err(|e| unique_violation(e, "cart was not saved"))?;

        Ok(())
    }

    async fn delete_cart(&self, cart_id: Uuid) -> StoreResult<()> {
        let result = Carts::delete_by_id(cart_id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl<'c, C> TicketStore for PgStore<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn create_ticket(&self, ticket: &Ticket) -> StoreResult<Uuid> {
        let active = tickets::ActiveModel {
            id: Set(ticket.id),
            user_id: Set(ticket.user_id),
            kind: Set(ticket.kind.as_str().to_string()),
            items: Set(serde_json::to_value(&ticket.items)?),
            price: Set(ticket.price),
            created_at: Set(ticket.created_at.into()),
        };

        Tickets::insert(active)
            .exec_without_returning(self.conn)
            .await
            .map_err(|e| unique_violation(e, "ticket was not created"))?;

        Ok(ticket.id)
    }
}

pub fn product_from_entity(model: products::Model) -> Product {
    Product {
        id: model.id,
        shop_id: model.shop_id,
        name: model.name,
        price: model.price,
        stock: model.stock,
        description: model.description,
        collection: model.collection,
        img: model.img,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn cart_from_entity(model: carts::Model) -> StoreResult<Cart> {
    Ok(Cart {
        id: model.id,
        user_id: model.user_id,
        products: serde_json::from_value(model.products)?,
        total: model.total,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub fn ticket_from_entity(model: tickets::Model) -> StoreResult<Ticket> {
    let kind = TicketKind::parse(&model.kind).ok_or_else(|| {
        StoreError::Conflict(format!("ticket {} has unknown type {}", model.id, model.kind))
    })?;
    Ok(Ticket {
        id: model.id,
        user_id: model.user_id,
        kind,
        items: serde_json::from_value(model.items)?,
        price: model.price,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
