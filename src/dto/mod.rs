pub mod auth;
pub mod products;
pub mod shops;
pub mod tickets;
pub mod users;
