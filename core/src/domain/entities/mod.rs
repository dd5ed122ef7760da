//! Domain entities representing core business objects.

pub mod token;
pub mod user;


// Re-export commonly used types
pub use token::{Audience, Claims, IssuedToken, Rejection, RevocationEntry};
pub use user::{Role, User};
