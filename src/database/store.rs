use async_trait::async_trait;

use crate::models::{Post, Profile, User};
use crate::utils::StoreError;

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Fails with `StoreError::Duplicate("email")` when the email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;
    async fn delete_user(&self, id: &str) -> Result<bool, StoreError>;
}

/// Persistence for profiles; at most one per user, handles unique.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_profile_by_user(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;
    async fn find_profile_by_handle(&self, handle: &str) -> Result<Option<Profile>, StoreError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;
    /// Fails with `Duplicate("user")` or `Duplicate("handle")`.
    async fn insert_profile(&self, profile: &Profile) -> Result<(), StoreError>;
    /// Overwrites the stored document with the same id. Returns false if it is gone.
    async fn replace_profile(&self, profile: &Profile) -> Result<bool, StoreError>;
    async fn delete_profile_by_user(&self, user_id: &str) -> Result<bool, StoreError>;
}

/// Persistence for posts with their embedded likes and comments.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;
    async fn find_post(&self, id: &str) -> Result<Option<Post>, StoreError>;
    async fn insert_post(&self, post: &Post) -> Result<(), StoreError>;
    async fn replace_post(&self, post: &Post) -> Result<bool, StoreError>;
    async fn delete_post(&self, id: &str) -> Result<bool, StoreError>;
}

/// A complete backend, shared with handlers as `web::Data<dyn Store>`.
#[async_trait]
pub trait Store: UserStore + ProfileStore + PostStore {
    fn backend_name(&self) -> &'static str;

    async fn ping(&self) -> Result<(), StoreError>;
}
