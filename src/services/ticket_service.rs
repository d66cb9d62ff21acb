use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    dto::tickets::TicketList,
    entity::tickets::{Column as TicketCol, Entity as Tickets},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Ticket,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
    store::postgres::ticket_from_entity,
};

pub async fn list_my_tickets(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<TicketList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Tickets::find()
        .filter(TicketCol::UserId.eq(user.user_id))
        .order_by_desc(TicketCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ticket_from_entity)
        .collect::<Result<Vec<Ticket>, _>>()?;

    Ok(ApiResponse::success(
        "Tickets",
        TicketList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_ticket(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Ticket>> {
    let ticket = Tickets::find()
        .filter(
            Condition::all()
                .add(TicketCol::UserId.eq(user.user_id))
                .add(TicketCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found(format!("ticket {id}")))?;

    Ok(ApiResponse::success(
        "OK",
        ticket_from_entity(ticket)?,
        Some(Meta::empty()),
    ))
}
