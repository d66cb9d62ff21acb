pub mod audit_logs;
pub mod carts;
pub mod products;
pub mod shops;
pub mod tickets;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use carts::Entity as Carts;
pub use products::Entity as Products;
pub use shops::Entity as Shops;
pub use tickets::Entity as Tickets;
pub use users::Entity as Users;
