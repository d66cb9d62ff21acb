//! Store-agnostic cart and checkout logic. HTTP services wire these to
//! [`crate::store::PgStore`]; tests wire them to the in-memory stores.

pub mod cart;
pub mod checkout;

pub use cart::{CartError, add_to_cart, clear_cart};
pub use checkout::{CheckoutError, CheckoutOutcome, CheckoutWorkflow};
