use actix_web::{web, HttpResponse};

use crate::database::Store;
use crate::models::{Post, PostRequest, SuccessResponse};
use crate::services::auth_service::Claims;
use crate::services::post_service;
use crate::utils::AppError;

pub async fn test() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "msg": "Posts works." }))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    responses((status = 200, description = "All posts, newest first", body = [Post]))
)]
pub async fn get_posts(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /posts");

    let posts = post_service::get_posts(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 404, description = "No post with that id")
    )
)]
pub async fn get_post(
    db: web::Data<dyn Store>,
    post_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /posts/{}", post_id);

    let post = post_service::get_post(db.get_ref(), &post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    request_body = PostRequest,
    responses(
        (status = 200, description = "Created post", body = Post),
        (status = 400, description = "Invalid input")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_post(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    request: web::Json<PostRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /posts - user {}", user.id);

    let post = post_service::create_post(db.get_ref(), &user, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = SuccessResponse),
        (status = 401, description = "Caller does not own the post"),
        (status = 404, description = "No post with that id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_post(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    post_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /posts/{} - user {}", post_id, user.id);

    post_service::delete_post(db.get_ref(), &user.id, &post_id).await?;
    log::info!("✅ Post {} deleted", post_id);
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}

#[utoipa::path(
    post,
    path = "/api/posts/like/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post with the new like", body = Post),
        (status = 400, description = "Already liked"),
        (status = 404, description = "No post with that id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn like_post(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    post_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("👍 POST /posts/like/{} - user {}", post_id, user.id);

    let post = post_service::like_post(db.get_ref(), &user.id, &post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    post,
    path = "/api/posts/unlike/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post without the like", body = Post),
        (status = 400, description = "Not liked yet"),
        (status = 404, description = "No post with that id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn unlike_post(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    post_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("👎 POST /posts/unlike/{} - user {}", post_id, user.id);

    let post = post_service::unlike_post(db.get_ref(), &user.id, &post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    post,
    path = "/api/posts/comment/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post with the new comment first", body = Post),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "No post with that id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_comment(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    post_id: web::Path<String>,
    request: web::Json<PostRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("💬 POST /posts/comment/{} - user {}", post_id, user.id);

    let post = post_service::add_comment(db.get_ref(), &user, &post_id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    delete,
    path = "/api/posts/comment/{id}/{comment_id}",
    tag = "Posts",
    params(
        ("id" = String, Path, description = "Post id"),
        ("comment_id" = String, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Post without the comment", body = Post),
        (status = 401, description = "Caller may not remove this comment"),
        (status = 404, description = "No such post or comment")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (post_id, comment_id) = path.into_inner();
    log::info!("🗑️  DELETE /posts/comment/{}/{} - user {}", post_id, comment_id, user.id);

    let post = post_service::delete_comment(db.get_ref(), &user.id, &post_id, &comment_id).await?;
    Ok(HttpResponse::Ok().json(post))
}
