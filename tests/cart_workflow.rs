mod common;

use common::Fixture;
use shop_checkout_api::{
    store::CartStore,
    workflow::{CartError, add_to_cart, clear_cart},
};
use uuid::Uuid;

#[tokio::test]
async fn first_add_creates_cart_with_product_and_total() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let mug = fx.stock("mug", 1200, 5);

    let cart = add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, mug.id).await?;

    assert_eq!(cart.user_id, fx.user_id);
    assert_eq!(cart.products, vec![mug.id]);
    assert_eq!(cart.total, 1200);

    let stored = fx.carts.get_cart_for_user(fx.user_id).await?.expect("cart");
    assert_eq!(stored, cart);
    Ok(())
}

#[tokio::test]
async fn repeated_adds_append_in_order_and_keep_one_cart() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let mug = fx.stock("mug", 1200, 5);
    let helmet = fx.stock("helmet", 19900, 1);

    let first = add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, mug.id).await?;
    add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, helmet.id).await?;
    let cart = add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, mug.id).await?;

    assert_eq!(cart.id, first.id);
    assert_eq!(cart.products, vec![mug.id, helmet.id, mug.id]);
    assert_eq!(cart.total, 1200 + 19900 + 1200);
    assert_eq!(fx.carts.len(), 1);
    Ok(())
}

#[tokio::test]
async fn adding_does_not_touch_stock() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let reactor = fx.stock("reactor", 2850, 1);

    add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, reactor.id).await?;
    add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, reactor.id).await?;

    assert_eq!(fx.catalog.stock_of(reactor.id), Some(1));
    Ok(())
}

#[tokio::test]
async fn out_of_stock_product_is_rejected_without_creating_a_cart() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let stickers = fx.stock("stickers", 500, 0);

    let err = add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, stickers.id)
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::OutOfStock(id) if id == stickers.id));
    assert!(fx.carts.is_empty());
    Ok(())
}

#[tokio::test]
async fn out_of_stock_product_leaves_existing_cart_untouched() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let mug = fx.stock("mug", 1200, 5);
    let stickers = fx.stock("stickers", 500, 0);

    let before = add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, mug.id).await?;
    let err = add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, stickers.id).await;
    assert!(matches!(err, Err(CartError::OutOfStock(_))));

    let after = fx.carts.get_cart_for_user(fx.user_id).await?.expect("cart");
    assert_eq!(after, before);
    Ok(())
}

#[tokio::test]
async fn product_from_another_shop_is_rejected() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let mug = fx.stock("mug", 1200, 5);
    let other_shop = Uuid::new_v4();

    let err = add_to_cart(&fx.catalog, &fx.carts, fx.user_id, other_shop, mug.id)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CartError::ProductNotInShop { product_id, shop_id }
            if product_id == mug.id && shop_id == other_shop
    ));
    assert!(fx.carts.is_empty());
    Ok(())
}

#[tokio::test]
async fn carts_are_kept_per_user() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let mug = fx.stock("mug", 1200, 5);
    let other_user = Uuid::new_v4();

    add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, mug.id).await?;
    let theirs = add_to_cart(&fx.catalog, &fx.carts, other_user, fx.shop_id, mug.id).await?;

    assert_eq!(theirs.products, vec![mug.id]);
    assert_eq!(fx.carts.len(), 2);
    Ok(())
}

#[tokio::test]
async fn clearing_removes_the_cart() -> anyhow::Result<()> {
    let fx = Fixture::new();
    let mug = fx.stock("mug", 1200, 5);
    let cart = add_to_cart(&fx.catalog, &fx.carts, fx.user_id, fx.shop_id, mug.id).await?;

    let cleared = clear_cart(&fx.carts, fx.user_id).await?;
    assert_eq!(cleared.id, cart.id);
    assert!(fx.carts.get_cart_for_user(fx.user_id).await?.is_none());

    let again = clear_cart(&fx.carts, fx.user_id).await;
    assert!(matches!(again, Err(CartError::NoActiveCart)));
    Ok(())
}
