use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{Ticket, TicketKind},
    store::{CartStore, CatalogStore, StoreError, TicketStore},
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("You don't have any cart")]
    NoActiveCart,

    #[error("Product in cart not found: {0}")]
    ProductMissing(Uuid),

    #[error("Error with the product: {product_id}")]
    StockUpdateConflict {
        product_id: Uuid,
        #[source]
        source: StoreError,
    },

    #[error("Ticket was not created")]
    TicketCreationFailed(#[source] StoreError),

    #[error("Cart was not bought")]
    CartDeletionFailed(#[source] StoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a successful checkout hands back to the caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckoutOutcome {
    pub ticket: Ticket,
    /// One notice per dropped item, comma separated. Empty when nothing was dropped.
    pub message: String,
    /// Cart total after removing the prices of dropped items.
    pub cart_total: i64,
    #[serde(skip)]
    pub dropped: Vec<Uuid>,
}

/// Turns a user's cart into a sale ticket, taking one unit of stock per cart
/// entry. Entries whose product has no stock left are dropped and reported in
/// the outcome message instead of failing the checkout.
pub struct CheckoutWorkflow<'a> {
    catalog: &'a dyn CatalogStore,
    carts: &'a dyn CartStore,
    tickets: &'a dyn TicketStore,
}

impl<'a> CheckoutWorkflow<'a> {
    pub fn new(
        catalog: &'a dyn CatalogStore,
        carts: &'a dyn CartStore,
        tickets: &'a dyn TicketStore,
    ) -> Self {
        Self {
            catalog,
            carts,
            tickets,
        }
    }

    pub async fn checkout(&self, user_id: Uuid) -> Result<CheckoutOutcome, CheckoutError> {
        let mut cart = self
            .carts
            .get_cart_for_user(user_id)
            .await?
            .ok_or(CheckoutError::NoActiveCart)?;

        let mut ticket = Ticket::new(user_id, TicketKind::Sale);
        let mut notices: Vec<String> = Vec::new();
        let mut dropped: Vec<Uuid> = Vec::new();

        // Re-read each entry so repeated products see earlier decrements.
        for &product_id in &cart.products {
            let product = self
                .catalog
                .get_product_for_update(product_id)
                .await?
                .ok_or(CheckoutError::ProductMissing(product_id))?;

            if product.stock == 0 {
                cart.total -= product.price;
                notices.push(format!("{} deleted because it has no stock", product.name));
                dropped.push(product_id);
                tracing::info!(%user_id, %product_id, "dropping out-of-stock item at checkout");
                continue;
            }

            self.catalog
                .decrement_stock(product_id, 1)
                .await
                .map_err(|source| CheckoutError::StockUpdateConflict { product_id, source })?;

            ticket.price += product.price;
            ticket.items.push(product);
        }

        self.tickets
            .create_ticket(&ticket)
            .await
            .map_err(CheckoutError::TicketCreationFailed)?;

        self.carts
            .delete_cart(cart.id)
            .await
            .map_err(CheckoutError::CartDeletionFailed)?;

        tracing::info!(
            %user_id,
            ticket_id = %ticket.id,
            items = ticket.items.len(),
            dropped = dropped.len(),
            price = ticket.price,
            "checkout completed"
        );

        Ok(CheckoutOutcome {
            ticket,
            message: notices.join(", "),
            cart_total: cart.total,
            dropped,
        })
    }
}
