use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::shops::{CreateShopRequest, ShopList, ShopWithProducts},
    entity::{
        products::{Column as ProdCol, Entity as Products},
        shops::{ActiveModel as ShopActive, Column as ShopCol, Entity as Shops, Model as ShopModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Shop,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
    store::postgres::product_from_entity,
};

pub async fn list_shops(state: &AppState, pagination: Pagination) -> AppResult<ApiResponse<ShopList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Shops::find().order_by_asc(ShopCol::Name);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(shop_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Shops",
        ShopList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Looks a shop up by name and attaches the products that still have stock.
pub async fn get_shop(state: &AppState, shop_name: &str) -> AppResult<ApiResponse<ShopWithProducts>> {
    let shop_name = shop_name.to_lowercase();
    let shop = Shops::find()
        .filter(ShopCol::Name.eq(shop_name.as_str()))
        .one(&state.orm)
        .await?
        .map(shop_from_entity)
        .ok_or_else(|| AppError::not_found(format!("shop {shop_name}")))?;

    let products = Products::find()
        .filter(ProdCol::ShopId.eq(shop.id))
        .filter(ProdCol::Stock.gt(0))
        .order_by_asc(ProdCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Shop",
        ShopWithProducts { shop, products },
        Some(Meta::empty()),
    ))
}

pub async fn create_shop(
    state: &AppState,
    user: &AuthUser,
    payload: CreateShopRequest,
) -> AppResult<ApiResponse<Shop>> {
    let name = payload.name.trim().to_lowercase();
    if name.is_empty() {
        return Err(AppError::BadRequest("Incorrect shop data".into()));
    }

    let shop = ShopActive {
        id: Set(Uuid::new_v4()),
        owner_id: Set(user.user_id),
        name: Set(name),
        description: Set(payload.description),
        icon: Set(payload.icon),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Shop name is already taken".into())
        }
        _ => AppError::OrmError(err),
    })?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "shop_create",
        "shops",
        serde_json::json!({ "shop_id": shop.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Shop created",
        shop_from_entity(shop),
        Some(Meta::empty()),
    ))
}

pub async fn find_shop<C>(conn: &C, shop_id: Uuid) -> AppResult<Shop>
where
    C: ConnectionTrait,
{
    Shops::find_by_id(shop_id)
        .one(conn)
        .await?
        .map(shop_from_entity)
        .ok_or_else(|| AppError::not_found(format!("shop {shop_id}")))
}

pub fn shop_from_entity(model: ShopModel) -> Shop {
    Shop {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        description: model.description,
        icon: model.icon,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
