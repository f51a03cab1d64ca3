use serde::{Deserialize, Serialize};

/// Account record stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// bcrypt hash, never serialized into a response.
    pub password: String,
    pub avatar: String,
    /// Registration time (Unix millis).
    pub date: i64,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user; the password hash is left out.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            date: user.date,
        }
    }
}

/// `/api/users/current` body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    /// `Bearer <jwt>`, ready to be used as the Authorization header.
    pub token: String,
}

/// Reference to a user as embedded in populated profiles.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserSummary {
    pub fn new(id: &str, user: Option<&User>) -> Self {
        UserSummary {
            id: id.to_string(),
            name: user.map(|u| u.name.clone()),
            avatar: user.map(|u| u.avatar.clone()),
        }
    }
}
