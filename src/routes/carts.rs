use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::Cart,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
    workflow::CheckoutOutcome,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/my", get(get_my_cart).delete(clear_cart))
        .route("/my/buy", post(buy_cart))
        .route("/{shop_id}/{product_id}/add-to-cart", post(add_to_cart))
}

#[utoipa::path(
    get,
    path = "/api/carts/my",
    responses(
        (status = 200, description = "Cart of the current user; data is null when there is none", body = ApiResponse<Cart>)
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn get_my_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let resp = cart_service::get_my_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{shop_id}/{product_id}/add-to-cart",
    params(
        ("shop_id" = Uuid, Path, description = "Shop ID"),
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 202, description = "Product added to the cart", body = ApiResponse<Cart>),
        (status = 400, description = "Product without stock"),
        (status = 404, description = "Product not found in shop"),
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path((shop_id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<(StatusCode, Json<ApiResponse<Cart>>)> {
    let resp = cart_service::add_to_cart(&state, &user, shop_id, product_id).await?;
    Ok((StatusCode::ACCEPTED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/carts/my/buy",
    responses(
        (status = 202, description = "Ticket created from the cart", body = ApiResponse<CheckoutOutcome>),
        (status = 400, description = "No active cart"),
        (status = 409, description = "Stock, ticket or cart write rejected"),
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn buy_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<(StatusCode, Json<ApiResponse<CheckoutOutcome>>)> {
    let resp = cart_service::checkout(&state, &user).await?;
    Ok((StatusCode::ACCEPTED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/carts/my",
    responses(
        (status = 200, description = "Cart removed", body = ApiResponse<Cart>),
        (status = 404, description = "No active cart"),
    ),
    security(("bearer_auth" = [])),
    tag = "Carts"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Cart>>> {
    let resp = cart_service::clear_cart(&state, &user).await?;
    Ok(Json(resp))
}
