use crate::database::Store;
use crate::models::{new_id, now_millis, Comment, Like, Post, PostRequest};
use crate::services::auth_service::Claims;
use crate::utils::AppError;
use crate::validation::validate_post;

fn post_not_found() -> AppError {
    AppError::not_found("postNotFound", "No post found")
}

fn not_authorized() -> AppError {
    AppError::unauthorized("notAuthorized", "User not authorized")
}

async fn load(db: &dyn Store, post_id: &str) -> Result<Post, AppError> {
    db.find_post(post_id).await?.ok_or_else(post_not_found)
}

async fn save(db: &dyn Store, post: Post) -> Result<Post, AppError> {
    if db.replace_post(&post).await? {
        Ok(post)
    } else {
        Err(post_not_found())
    }
}

pub async fn get_posts(db: &dyn Store) -> Result<Vec<Post>, AppError> {
    Ok(db.list_posts().await?)
}

pub async fn get_post(db: &dyn Store, post_id: &str) -> Result<Post, AppError> {
    db.find_post(post_id)
        .await?
        .ok_or_else(|| AppError::not_found("noPostFound", "No post found with that ID"))
}

/// Author name and avatar come from the caller's token.
pub async fn create_post(db: &dyn Store, author: &Claims, request: PostRequest) -> Result<Post, AppError> {
    validate_post(&request).into_result()?;

    let post = Post {
        id: new_id(),
        user: author.id.clone(),
        text: request.text.trim().to_string(),
        name: author.name.clone(),
        avatar: author.avatar.clone(),
        likes: vec![],
        comments: vec![],
        date: now_millis(),
    };
    db.insert_post(&post).await?;

    log::info!("✅ Post {} created by {}", post.id, author.id);
    Ok(post)
}

/// Only the author may delete; anyone else gets a 401 and the post stays.
pub async fn delete_post(db: &dyn Store, user_id: &str, post_id: &str) -> Result<(), AppError> {
    let post = load(db, post_id).await?;

    if post.user != user_id {
        log::warn!("⛔ User {} tried to delete post {} owned by {}", user_id, post_id, post.user);
        return Err(not_authorized());
    }

    if !db.delete_post(post_id).await? {
        return Err(post_not_found());
    }
    Ok(())
}

pub async fn like_post(db: &dyn Store, user_id: &str, post_id: &str) -> Result<Post, AppError> {
    let mut post = load(db, post_id).await?;

    if post.is_liked_by(user_id) {
        return Err(AppError::conflict("alreadyLiked", "User already liked this post"));
    }

    post.likes.insert(0, Like { user: user_id.to_string() });
    save(db, post).await
}

pub async fn unlike_post(db: &dyn Store, user_id: &str, post_id: &str) -> Result<Post, AppError> {
    let mut post = load(db, post_id).await?;

    let index = post
        .likes
        .iter()
        .position(|like| like.user == user_id)
        .ok_or_else(|| AppError::conflict("notLiked", "You have not yet liked this post"))?;

    post.likes.remove(index);
    save(db, post).await
}

pub async fn add_comment(
    db: &dyn Store,
    author: &Claims,
    post_id: &str,
    request: PostRequest,
) -> Result<Post, AppError> {
    validate_post(&request).into_result()?;
    let mut post = load(db, post_id).await?;

    let comment = Comment {
        id: new_id(),
        user: author.id.clone(),
        text: request.text.trim().to_string(),
        name: author.name.clone(),
        avatar: author.avatar.clone(),
        date: now_millis(),
    };

    post.comments.insert(0, comment);
    save(db, post).await
}

/// The comment author or the post owner may remove a comment.
pub async fn delete_comment(
    db: &dyn Store,
    user_id: &str,
    post_id: &str,
    comment_id: &str,
) -> Result<Post, AppError> {
    let mut post = load(db, post_id).await?;

    let index = post
        .comments
        .iter()
        .position(|comment| comment.id == comment_id)
        .ok_or_else(|| AppError::not_found("commentNotExists", "Comment does not exist"))?;

    if post.comments[index].user != user_id && post.user != user_id {
        return Err(not_authorized());
    }

    post.comments.remove(index);
    save(db, post).await
}
