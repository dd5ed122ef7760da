//! Authentication route handlers
//!
//! - Login with email and password
//! - Token introspection
//! - Logout (revocation)
//! - Refresh (rotation)

pub mod introspect;
pub mod login;
pub mod logout;
pub mod refresh;
