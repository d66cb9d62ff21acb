pub mod auth_service;
pub mod cart_service;
pub mod product_service;
pub mod shop_service;
pub mod ticket_service;
pub mod user_service;
