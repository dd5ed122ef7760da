//! Current-user response bodies

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ag_core::domain::entities::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        let roles = user.role_codes().into_iter().collect();
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            roles,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoritiesResponse {
    pub authorities: Vec<String>,
}
