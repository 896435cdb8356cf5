//! Domain models for cart reconciliation.

pub mod customer;
pub mod session;
pub mod token;

pub use customer::{Customer, CustomerId};
pub use session::CurrentCustomer;
pub use session::keys as session_keys;
pub use token::AccessToken;
