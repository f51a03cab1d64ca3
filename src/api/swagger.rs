use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevConnector API",
        version = "1.0.0",
        description = "Developer profiles, posts, likes and comments.\n\n**Authentication:** private endpoints expect `Authorization: Bearer <token>` as returned by `/api/users/login`."
    ),
    paths(
        // Users
        crate::api::users::register,
        crate::api::users::login,
        crate::api::users::current,

        // Profile
        crate::api::profile::get_current_profile,
        crate::api::profile::get_all_profiles,
        crate::api::profile::get_profile_by_handle,
        crate::api::profile::get_profile_by_user,
        crate::api::profile::upsert_profile,
        crate::api::profile::add_experience,
        crate::api::profile::delete_experience,
        crate::api::profile::add_education,
        crate::api::profile::delete_education,
        crate::api::profile::delete_profile,

        // Posts
        crate::api::posts::get_posts,
        crate::api::posts::get_post,
        crate::api::posts::create_post,
        crate::api::posts::delete_post,
        crate::api::posts::like_post,
        crate::api::posts::unlike_post,
        crate::api::posts::add_comment,
        crate::api::posts::delete_comment,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::RegisterRequest,
            crate::models::LoginRequest,
            crate::models::LoginResponse,
            crate::models::UserResponse,
            crate::models::CurrentUser,
            crate::models::UserSummary,
            crate::models::ProfileRequest,
            crate::models::ExperienceRequest,
            crate::models::EducationRequest,
            crate::models::ProfileResponse,
            crate::models::Profile,
            crate::models::Social,
            crate::models::Experience,
            crate::models::Education,
            crate::models::PostRequest,
            crate::models::Post,
            crate::models::Like,
            crate::models::Comment,
            crate::models::SuccessResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Registration, login and the current account."),
        (name = "Profile", description = "Developer profiles with experience, education and social links."),
        (name = "Posts", description = "Posts, likes and comments."),
        (name = "Health", description = "Service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/users/login, without the `Bearer ` prefix"))
                        .build(),
                ),
            );
        }
    }
}
