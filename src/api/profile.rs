use actix_web::{web, HttpResponse};

use crate::database::Store;
use crate::models::{
    EducationRequest, ExperienceRequest, ProfileRequest, ProfileResponse, SuccessResponse,
};
use crate::services::auth_service::{self, Claims};
use crate::services::profile_service;
use crate::utils::AppError;

pub async fn test() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "msg": "Profiles works." }))
}

/// GET /api/profile - caller's own profile
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = ProfileResponse),
        (status = 404, description = "No profile yet")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_profile(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /profile - user {}", user.id);

    let profile = profile_service::get_current_profile(db.get_ref(), &user.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[utoipa::path(
    get,
    path = "/api/profile/all",
    tag = "Profile",
    responses(
        (status = 200, description = "Every profile", body = [ProfileResponse]),
        (status = 404, description = "There are no profiles")
    )
)]
pub async fn get_all_profiles(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /profile/all");

    let profiles = profile_service::get_all_profiles(db.get_ref()).await?;
    log::info!("✅ Listed {} profiles", profiles.len());
    Ok(HttpResponse::Ok().json(profiles))
}

#[utoipa::path(
    get,
    path = "/api/profile/handle/{handle}",
    tag = "Profile",
    params(("handle" = String, Path, description = "Profile handle")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 404, description = "No profile with that handle")
    )
)]
pub async fn get_profile_by_handle(
    db: web::Data<dyn Store>,
    handle: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /profile/handle/{}", handle);

    let profile = profile_service::get_profile_by_handle(db.get_ref(), &handle).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[utoipa::path(
    get,
    path = "/api/profile/user/{user_id}",
    tag = "Profile",
    params(("user_id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 404, description = "No profile for that user")
    )
)]
pub async fn get_profile_by_user(
    db: web::Data<dyn Store>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /profile/user/{}", user_id);

    let profile = profile_service::get_profile_by_user(db.get_ref(), &user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /api/profile - create or edit the caller's profile
#[utoipa::path(
    post,
    path = "/api/profile",
    tag = "Profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Saved profile", body = ProfileResponse),
        (status = 400, description = "Invalid input or handle taken")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upsert_profile(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    request: web::Json<ProfileRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /profile - user {}, handle '{}'", user.id, request.handle);

    let profile = profile_service::upsert_profile(db.get_ref(), &user.id, request.into_inner())
        .await
        .inspect_err(|e| log::warn!("⚠️ Profile not saved: {}", e))?;
    Ok(HttpResponse::Ok().json(profile))
}

#[utoipa::path(
    post,
    path = "/api/profile/experience",
    tag = "Profile",
    request_body = ExperienceRequest,
    responses(
        (status = 200, description = "Profile with the new entry first", body = ProfileResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "No profile yet")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_experience(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    request: web::Json<ExperienceRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("➕ POST /profile/experience - user {}", user.id);

    let profile = profile_service::add_experience(db.get_ref(), &user.id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[utoipa::path(
    delete,
    path = "/api/profile/experience/{exp_id}",
    tag = "Profile",
    params(("exp_id" = String, Path, description = "Experience entry id")),
    responses(
        (status = 200, description = "Profile without the entry", body = ProfileResponse),
        (status = 404, description = "No profile or no such entry")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_experience(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    exp_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /profile/experience/{} - user {}", exp_id, user.id);

    let profile = profile_service::delete_experience(db.get_ref(), &user.id, &exp_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[utoipa::path(
    post,
    path = "/api/profile/education",
    tag = "Profile",
    request_body = EducationRequest,
    responses(
        (status = 200, description = "Profile with the new entry first", body = ProfileResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "No profile yet")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_education(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    request: web::Json<EducationRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("➕ POST /profile/education - user {}", user.id);

    let profile = profile_service::add_education(db.get_ref(), &user.id, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[utoipa::path(
    delete,
    path = "/api/profile/education/{education_id}",
    tag = "Profile",
    params(("education_id" = String, Path, description = "Education entry id")),
    responses(
        (status = 200, description = "Profile without the entry", body = ProfileResponse),
        (status = 404, description = "No profile or no such entry")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_education(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
    education_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /profile/education/{} - user {}", education_id, user.id);

    let profile = profile_service::delete_education(db.get_ref(), &user.id, &education_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// DELETE /api/profile - removes the profile and the account
#[utoipa::path(
    delete,
    path = "/api/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Profile and account removed", body = SuccessResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_profile(
    db: web::Data<dyn Store>,
    user: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /profile - user {}", user.id);

    auth_service::delete_user_account(db.get_ref(), &user.id).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
