use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub username: String,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i32, ApiError> {
        self.sub.parse().map_err(|_| {
            tracing::warn!(sub = %self.sub, "Session carries a non-numeric user id");
            ApiError::Unauthorized
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(alias = "_hashed_password")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub user: String,
    pub password: String,
}
