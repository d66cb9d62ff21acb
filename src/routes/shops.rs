use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::shops::{CreateShopRequest, ShopList, ShopWithProducts},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Shop,
    response::ApiResponse,
    routes::params::Pagination,
    services::shop_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shops).post(create_shop))
        .route("/{shop_name}", get(get_shop))
}

#[utoipa::path(
    get,
    path = "/api/shops",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List shops", body = ApiResponse<ShopList>)
    ),
    tag = "Shops"
)]
pub async fn list_shops(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ShopList>>> {
    let resp = shop_service::list_shops(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/shops/{shop_name}",
    params(("shop_name" = String, Path, description = "Shop name, case insensitive")),
    responses(
        (status = 200, description = "Shop with its in-stock products", body = ApiResponse<ShopWithProducts>),
        (status = 404, description = "Shop not found")
    ),
    tag = "Shops"
)]
pub async fn get_shop(
    State(state): State<AppState>,
    Path(shop_name): Path<String>,
) -> AppResult<Json<ApiResponse<ShopWithProducts>>> {
    let resp = shop_service::get_shop(&state, &shop_name).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/shops",
    request_body = CreateShopRequest,
    responses(
        (status = 201, description = "Shop created", body = ApiResponse<Shop>),
        (status = 409, description = "Shop name already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Shops"
)]
pub async fn create_shop(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateShopRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Shop>>)> {
    let resp = shop_service::create_shop(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
