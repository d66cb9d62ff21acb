use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::{
    dto::users::UserList,
    entity::users::{Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    models::PublicUser,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::auth_service::user_from_entity,
    state::AppState,
};

pub async fn list_users(state: &AppState, pagination: Pagination) -> AppResult<ApiResponse<UserList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Users::find().order_by_asc(UserCol::Username);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|model| PublicUser::from(user_from_entity(model)))
        .collect();

    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_user(state: &AppState, username: &str) -> AppResult<ApiResponse<PublicUser>> {
    let user = Users::find()
        .filter(UserCol::Username.eq(username))
        .one(&state.orm)
        .await?
        .map(user_from_entity)
        .ok_or_else(|| AppError::not_found(format!("user {username}")))?;

    Ok(ApiResponse::success("User", PublicUser::from(user), None))
}
