use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{CreateProductRequest, ProductList},
    entity::products::{ActiveModel, Column, Entity as Products},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    services::shop_service::find_shop,
    state::AppState,
    store::postgres::product_from_entity,
};

pub async fn list_products(
    state: &AppState,
    shop_id: Uuid,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    find_shop(&state.orm, shop_id).await?;

    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(Column::ShopId.eq(shop_id));
    if let Some(name) = query.product_name.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Name.eq(name.clone()));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(
    state: &AppState,
    shop_id: Uuid,
    product_id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    let product = find_product_in_shop(state, shop_id, product_id).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    shop_id: Uuid,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let shop = find_shop(&state.orm, shop_id).await?;
    ensure_owner(user, &shop)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if payload.price <= 0 {
        return Err(AppError::BadRequest("price must be greater than 0".into()));
    }
    if payload.stock < 0 {
        return Err(AppError::BadRequest("stock must not be negative".into()));
    }

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        shop_id: Set(shop.id),
        name: Set(payload.name),
        price: Set(payload.price),
        stock: Set(payload.stock),
        description: Set(payload.description),
        collection: Set(payload.collection),
        img: Set(payload.img),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id, "shop_id": shop.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

/// Overwrites the stock count of a product. Only the shop owner may do this.
pub async fn set_stock(
    state: &AppState,
    user: &AuthUser,
    shop_id: Uuid,
    product_id: Uuid,
    stock: i32,
) -> AppResult<ApiResponse<Product>> {
    if stock <= 0 {
        return Err(AppError::BadRequest("stock must be greater than 0".into()));
    }

    let shop = find_shop(&state.orm, shop_id).await?;
    ensure_owner(user, &shop)?;

    let existing = Products::find()
        .filter(Column::Id.eq(product_id))
        .filter(Column::ShopId.eq(shop_id))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(format!("product {product_id}")))?;

    let mut active: ActiveModel = existing.into();
    active.stock = Set(stock);
    let product = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_set_stock",
        "products",
        serde_json::json!({ "product_id": product.id, "stock": stock }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

async fn find_product_in_shop(
    state: &AppState,
    shop_id: Uuid,
    product_id: Uuid,
) -> AppResult<Product> {
    Products::find()
        .filter(Column::Id.eq(product_id))
        .filter(Column::ShopId.eq(shop_id))
        .one(&state.orm)
        .await?
        .map(product_from_entity)
        .ok_or_else(|| AppError::not_found(format!("product {product_id} in shop {shop_id}")))
}
