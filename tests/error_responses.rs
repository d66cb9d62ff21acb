use axum::{http::StatusCode, response::IntoResponse};
use shop_checkout_api::{
    error::AppError,
    store::StoreError,
    workflow::{CartError, CheckoutError},
};
use uuid::Uuid;

fn status_of(err: impl Into<AppError>) -> StatusCode {
    let err: AppError = err.into();
    err.into_response().status()
}

#[test]
fn cart_errors_map_to_client_statuses() {
    let id = Uuid::new_v4();
    assert_eq!(status_of(CartError::OutOfStock(id)), StatusCode::BAD_REQUEST);
    assert_eq!(
        status_of(CartError::ProductNotInShop {
            product_id: id,
            shop_id: Uuid::new_v4(),
        }),
        StatusCode::NOT_FOUND
    );
    assert_eq!(status_of(CartError::NoActiveCart), StatusCode::NOT_FOUND);
    assert_eq!(
        status_of(CartError::Store(StoreError::Conflict("taken".into()))),
        StatusCode::CONFLICT
    );
}

#[test]
fn checkout_errors_map_to_client_statuses() {
    let id = Uuid::new_v4();
    assert_eq!(status_of(CheckoutError::NoActiveCart), StatusCode::BAD_REQUEST);
    assert_eq!(status_of(CheckoutError::ProductMissing(id)), StatusCode::CONFLICT);
    assert_eq!(
        status_of(CheckoutError::StockUpdateConflict {
            product_id: id,
            source: StoreError::Conflict("insufficient stock".into()),
        }),
        StatusCode::CONFLICT
    );
    assert_eq!(
        status_of(CheckoutError::TicketCreationFailed(StoreError::Conflict(
            "not acknowledged".into()
        ))),
        StatusCode::CONFLICT
    );
    assert_eq!(
        status_of(CheckoutError::CartDeletionFailed(StoreError::NotFound)),
        StatusCode::CONFLICT
    );
}

#[test]
fn auth_errors_are_distinguished() {
    assert_eq!(
        status_of(AppError::Unauthorized("Missing Authorization header".into())),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(status_of(AppError::Forbidden), StatusCode::FORBIDDEN);
}

#[test]
fn no_active_cart_message_is_human_readable() {
    assert_eq!(
        AppError::from(CheckoutError::NoActiveCart).to_string(),
        "Bad Request: You don't have any cart"
    );
}

#[test]
fn database_failures_are_server_errors() {
    let err = AppError::from(StoreError::Orm(sea_orm::DbErr::Custom("connection reset".into())));
    assert!(matches!(err, AppError::OrmError(_)));
    assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
}
