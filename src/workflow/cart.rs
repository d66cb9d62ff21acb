use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::Cart,
    store::{CartStore, CatalogStore, StoreError},
};

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product {product_id} does not belong to shop {shop_id}")]
    ProductNotInShop { product_id: Uuid, shop_id: Uuid },

    #[error("Product {0} not found")]
    ProductMissing(Uuid),

    #[error("Product without stock")]
    OutOfStock(Uuid),

    #[error("You don't have any cart")]
    NoActiveCart,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Appends one unit of a product to the user's cart, creating the cart on the
/// first call. Stock is checked but not reserved.
pub async fn add_to_cart(
    catalog: &dyn CatalogStore,
    carts: &dyn CartStore,
    user_id: Uuid,
    shop_id: Uuid,
    product_id: Uuid,
) -> Result<Cart, CartError> {
    if !catalog.product_in_shop(product_id, shop_id).await? {
        return Err(CartError::ProductNotInShop {
            product_id,
            shop_id,
        });
    }

    let mut cart = match carts.get_cart_for_user(user_id).await? {
        Some(cart) => cart,
        None => Cart::new(user_id),
    };

    let product = catalog
        .get_product(product_id)
        .await?
        .ok_or(CartError::ProductMissing(product_id))?;

    if product.stock == 0 {
        return Err(CartError::OutOfStock(product_id));
    }

    cart.push(&product);
    carts.save_cart(&cart).await?;

    tracing::debug!(
        cart_id = %cart.id,
        %user_id,
        %product_id,
        total = cart.total,
        "product added to cart"
    );

    Ok(cart)
}

pub async fn clear_cart(carts: &dyn CartStore, user_id: Uuid) -> Result<Cart, CartError> {
    let cart = carts
        .get_cart_for_user(user_id)
        .await?
        .ok_or(CartError::NoActiveCart)?;
    carts.delete_cart(cart.id).await?;
    Ok(cart)
}
