use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::{
    audit,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Cart,
    response::{ApiResponse, Meta},
    state::AppState,
    store::{CartStore, PgStore},
    workflow::{self, CheckoutOutcome, CheckoutWorkflow},
};

pub async fn get_my_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Cart>> {
    let store = PgStore::new(&state.orm);
    let resp = match store.get_cart_for_user(user.user_id).await? {
        Some(cart) => ApiResponse::success("OK", cart, Some(Meta::empty())),
        None => ApiResponse::empty("No cart"),
    };
    Ok(resp)
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    shop_id: Uuid,
    product_id: Uuid,
) -> AppResult<ApiResponse<Cart>> {
    let store = PgStore::new(&state.orm);
    let cart = workflow::add_to_cart(&store, &store, user.user_id, shop_id, product_id).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "cart_add",
        "carts",
        serde_json::json!({ "cart_id": cart.id, "product_id": product_id }),
    )
    .await;

    Ok(ApiResponse::success("Added to cart", cart, Some(Meta::empty())))
}

/// Runs the checkout workflow inside one transaction: stock decrements, the
/// ticket insert and the cart delete commit together or not at all.
pub async fn checkout(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CheckoutOutcome>> {
    let txn = state.orm.begin().await?;

    let outcome = {
        let store = PgStore::new(&txn);
        CheckoutWorkflow::new(&store, &store, &store)
            .checkout(user.user_id)
            .await
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(user_id = %user.user_id, error = %err, "checkout rolled back");
            txn.rollback().await?;
            return Err(err.into());
        }
    };

    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "checkout",
        "tickets",
        serde_json::json!({
            "ticket_id": outcome.ticket.id,
            "price": outcome.ticket.price,
            "dropped": outcome.dropped,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Checkout success",
        outcome,
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Cart>> {
    let store = PgStore::new(&state.orm);
    let cart = workflow::clear_cart(&store, user.user_id).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "cart_clear",
        "carts",
        serde_json::json!({ "cart_id": cart.id }),
    )
    .await;

    Ok(ApiResponse::success("Cart cleared", cart, Some(Meta::empty())))
}
