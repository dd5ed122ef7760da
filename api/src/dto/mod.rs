pub mod auth;
pub mod error;
pub mod user;

pub use error::ErrorResponseExt;
