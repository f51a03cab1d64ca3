use actix_web::{web, HttpResponse};

use crate::config::AuthSettings;
use crate::database::Store;
use crate::models::{CurrentUser, LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::services::auth_service::{self, Claims};
use crate::utils::AppError;

pub async fn test() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "msg": "Users works." }))
}

#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid input or email already exists")
    )
)]
pub async fn register(
    db: web::Data<dyn Store>,
    settings: web::Data<AuthSettings>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users/register - email: {}", request.email);

    let user = auth_service::register(db.get_ref(), &settings, request.into_inner())
        .await
        .inspect_err(|e| log::warn!("❌ Registration failed: {}", e))?;

    Ok(HttpResponse::Ok().json(user))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid input or wrong password"),
        (status = 404, description = "No user with that email")
    )
)]
pub async fn login(
    db: web::Data<dyn Store>,
    settings: web::Data<AuthSettings>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /users/login - email: {}", request.email);

    let response = auth_service::login(db.get_ref(), &settings, request.into_inner())
        .await
        .inspect_err(|e| log::warn!("❌ Login failed: {}", e))?;

    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/users/current",
    tag = "Users",
    responses(
        (status = 200, description = "Authenticated user", body = CurrentUser),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn current(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /users/current - {}", user.id);

    let current = auth_service::get_current_user(db.get_ref(), &user).await?;
    Ok(HttpResponse::Ok().json(current))
}
