//! Authentication module
//!
//! Password hashing and the back-office user store.

mod password;
mod users;

pub use password::{hash_password, verify_password};
pub use users::{Role, User, UserStore};
