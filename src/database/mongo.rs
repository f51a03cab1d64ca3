use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteError, WriteFailure};

use super::store::{PostStore, ProfileStore, Store, UserStore};
use super::{MongoDB, POSTS, PROFILES, USERS};
use crate::models::{Post, Profile, User};
use crate::utils::StoreError;

const DUPLICATE_KEY: i32 = 11000;

/// Maps an E11000 write error onto the indexed field it hit.
///
/// Index names follow the `<field>_1` default, so the field is read back
/// from the server message; `fields` lists the unique fields of the collection.
fn map_write_error(err: mongodb::error::Error, fields: &[&str]) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(WriteError { code, message, .. })) =
        err.kind.as_ref()
    {
        if *code == DUPLICATE_KEY {
            let field = fields
                .iter()
                .find(|f| message.contains(&format!("{}_1", f)))
                .or_else(|| fields.first())
                .copied()
                .unwrap_or("_id");
            return StoreError::Duplicate(field.to_string());
        }
    }
    StoreError::from(err)
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.collection::<User>(USERS).find_one(doc! { "_id": id }).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.collection::<User>(USERS).find_one(doc! { "email": email }).await?)
    }

    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.collection::<User>(USERS)
            .insert_one(user)
            .await
            .map_err(|e| map_write_error(e, &["email"]))?;
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        let result = self.collection::<User>(USERS).delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl ProfileStore for MongoDB {
    async fn find_profile_by_user(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .collection::<Profile>(PROFILES)
            .find_one(doc! { "user": user_id })
            .await?)
    }

    async fn find_profile_by_handle(&self, handle: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .collection::<Profile>(PROFILES)
            .find_one(doc! { "handle": handle })
            .await?)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let cursor = self.collection::<Profile>(PROFILES).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        self.collection::<Profile>(PROFILES)
            .insert_one(profile)
            .await
            .map_err(|e| map_write_error(e, &["user", "handle"]))?;
        Ok(())
    }

    async fn replace_profile(&self, profile: &Profile) -> Result<bool, StoreError> {
        let result = self
            .collection::<Profile>(PROFILES)
            .replace_one(doc! { "_id": profile.id.as_str() }, profile)
            .await
            .map_err(|e| map_write_error(e, &["handle", "user"]))?;
        Ok(result.matched_count > 0)
    }

    async fn delete_profile_by_user(&self, user_id: &str) -> Result<bool, StoreError> {
        let result = self
            .collection::<Profile>(PROFILES)
            .delete_one(doc! { "user": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl PostStore for MongoDB {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let cursor = self
            .collection::<Post>(POSTS)
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_post(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.collection::<Post>(POSTS).find_one(doc! { "_id": id }).await?)
    }

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
        self.collection::<Post>(POSTS).insert_one(post).await?;
        Ok(())
    }

    async fn replace_post(&self, post: &Post) -> Result<bool, StoreError> {
        let result = self
            .collection::<Post>(POSTS)
            .replace_one(doc! { "_id": post.id.as_str() }, post)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_post(&self, id: &str) -> Result<bool, StoreError> {
        let result = self.collection::<Post>(POSTS).delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl Store for MongoDB {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
