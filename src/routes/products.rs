use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Product,
    response::ApiResponse,
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/{shop_id}", post(create_product))
        .route("/{shop_id}", get(list_products))
        .route("/{shop_id}/{product_id}", get(get_product))
        .route(
            "/{shop_id}/{product_id}/update-stock/{stock}",
            patch(set_stock),
        )
}

#[utoipa::path(
    get,
    path = "/api/products/{shop_id}",
    params(
        ("shop_id" = Uuid, Path, description = "Shop ID"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("product_name" = Option<String>, Query, description = "Exact product name"),
        ("sort_by" = Option<String>, Query, description = "created_at | price | name"),
        ("sort_order" = Option<String>, Query, description = "asc | desc")
    ),
    responses(
        (status = 200, description = "Products of a shop", body = ApiResponse<ProductList>),
        (status = 404, description = "Shop not found")
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Path(shop_id): Path<Uuid>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, shop_id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{shop_id}/{product_id}",
    params(
        ("shop_id" = Uuid, Path, description = "Shop ID"),
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found in shop"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path((shop_id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, shop_id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products/register/{shop_id}",
    params(("shop_id" = Uuid, Path, description = "Shop ID")),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 403, description = "Caller does not own the shop")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(shop_id): Path<Uuid>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, &user, shop_id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/products/{shop_id}/{product_id}/update-stock/{stock}",
    params(
        ("shop_id" = Uuid, Path, description = "Shop ID"),
        ("product_id" = Uuid, Path, description = "Product ID"),
        ("stock" = i32, Path, description = "New stock count, greater than 0")
    ),
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 403, description = "Caller does not own the shop"),
        (status = 404, description = "Product not found in shop")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn set_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path((shop_id, product_id, stock)): Path<(Uuid, Uuid, i32)>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::set_stock(&state, &user, shop_id, product_id, stock).await?;
    Ok(Json(resp))
}
