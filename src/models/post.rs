use serde::{Deserialize, Serialize};

/// Post stored in the `posts` collection. Author name/avatar are copied in
/// at creation so listing posts needs no user lookups.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub date: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Like {
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: i64,
}

/// Body of both `POST /api/posts` and `POST /api/posts/comment/{id}`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct PostRequest {
    pub text: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }
}
