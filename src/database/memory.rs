use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{PostStore, ProfileStore, Store, UserStore};
use crate::models::{Post, Profile, User};
use crate::utils::StoreError;

/// Process-local backend enforcing the same unique constraints as the
/// MongoDB indexes. Used by the route tests and `STORAGE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    profiles: RwLock<Vec<Profile>>,
    posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email".into()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_profile_by_user(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.read().await.iter().find(|p| p.user == user_id).cloned())
    }

    async fn find_profile_by_handle(&self, handle: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.read().await.iter().find(|p| p.handle == handle).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.profiles.read().await.clone())
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        if profiles.iter().any(|p| p.user == profile.user) {
            return Err(StoreError::Duplicate("user".into()));
        }
        if profiles.iter().any(|p| p.handle == profile.handle) {
            return Err(StoreError::Duplicate("handle".into()));
        }
        profiles.push(profile.clone());
        Ok(())
    }

    async fn replace_profile(&self, profile: &Profile) -> Result<bool, StoreError> {
        let mut profiles = self.profiles.write().await;
        if profiles
            .iter()
            .any(|p| p.id != profile.id && p.handle == profile.handle)
        {
            return Err(StoreError::Duplicate("handle".into()));
        }
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(slot) => {
                *slot = profile.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_profile_by_user(&self, user_id: &str) -> Result<bool, StoreError> {
        let mut profiles = self.profiles.write().await;
        let before = profiles.len();
        profiles.retain(|p| p.user != user_id);
        Ok(profiles.len() != before)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn find_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
        self.posts.write().await.push(post.clone());
        Ok(())
    }

    async fn replace_post(&self, post: &Post) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => {
                *slot = post.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_post(&self, id: &str) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
