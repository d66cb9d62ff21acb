use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod carts;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod shops;
pub mod tickets;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/login", auth::router())
        .nest("/shops", shops::router())
        .nest("/products", products::router())
        .nest("/carts", carts::router())
        .nest("/tickets", tickets::router())
}
