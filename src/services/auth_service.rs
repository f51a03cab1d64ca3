use actix_web::web;
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthSettings;
use crate::database::Store;
use crate::models::{
    new_id, now_millis, CurrentUser, LoginRequest, LoginResponse, RegisterRequest, User,
    UserResponse,
};
use crate::utils::{gravatar, AppError, StoreError};
use crate::validation::{validate_login, validate_register, FieldErrors};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Identity carried by every issued token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String,
}

pub fn generate_jwt(settings: &AuthSettings, user: &User) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = Duration::try_seconds(settings.token_ttl_secs)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::Internal(format!("Token lifetime {}s is out of range", settings.token_ttl_secs))
        })?;
    let claims = Claims {
        id: user.id.clone(),
        name: user.name.clone(),
        avatar: user.avatar.clone(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp().max(0) as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Checks signature and expiry of a raw token (without the `Bearer ` prefix).
pub fn verify_token(settings: &AuthSettings, token: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn register(
    db: &dyn Store,
    settings: &AuthSettings,
    request: RegisterRequest,
) -> Result<UserResponse, AppError> {
    let mut errors = validate_register(&request);
    let email = request.email.trim().to_lowercase();

    // A taken email is reported even when other fields are invalid
    if !email.is_empty() && db.find_user_by_email(&email).await?.is_some() {
        errors.add("email", "Email already exists");
    }
    errors.into_result()?;

    let cost = settings.bcrypt_cost;
    let password = request.password;
    let hashed = web::block(move || hash(password, cost))
        .await?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let user = User {
        id: new_id(),
        name: request.name.trim().to_string(),
        avatar: gravatar::avatar_url(&email),
        email,
        password: hashed,
        date: now_millis(),
    };

    match db.insert_user(&user).await {
        Ok(()) => {}
        Err(StoreError::Duplicate(_)) => {
            return Err(AppError::conflict("email", "Email already exists"));
        }
        Err(e) => return Err(e.into()),
    }

    log::info!("✅ User registered: {}", user.email);
    Ok(UserResponse::from(user))
}

pub async fn login(
    db: &dyn Store,
    settings: &AuthSettings,
    request: LoginRequest,
) -> Result<LoginResponse, AppError> {
    validate_login(&request).into_result()?;

    let email = request.email.trim().to_lowercase();
    let user = db
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("email", "User not found"))?;

    let stored = user.password.clone();
    let password = request.password;
    let valid = web::block(move || verify(password, &stored))
        .await?
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;

    if !valid {
        return Err(AppError::Validation(FieldErrors::single(
            "password",
            "Password incorrect",
        )));
    }

    let token = generate_jwt(settings, &user)?;
    Ok(LoginResponse {
        success: true,
        token: format!("{}{}", BEARER_PREFIX, token),
    })
}

/// Resolves token claims to the stored account. A token for a deleted user is rejected.
pub async fn get_current_user(db: &dyn Store, claims: &Claims) -> Result<CurrentUser, AppError> {
    let user = db
        .find_user_by_id(&claims.id)
        .await?
        .ok_or_else(|| AppError::unauthorized("user", "Unauthorized"))?;

    Ok(CurrentUser {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}

/// Removes the profile first, then the account.
pub async fn delete_user_account(db: &dyn Store, user_id: &str) -> Result<(), AppError> {
    log::info!("🗑️ Deleting account for user: {}", user_id);

    let profile_removed = db.delete_profile_by_user(user_id).await?;
    let user_removed = db.delete_user(user_id).await?;

    log::info!(
        "✅ Account deleted for {} (profile: {}, user: {})",
        user_id,
        profile_removed,
        user_removed
    );
    Ok(())
}
