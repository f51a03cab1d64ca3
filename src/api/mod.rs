pub mod health;
pub mod posts;
pub mod profile;
pub mod swagger;
pub mod users;

#[cfg(test)]
mod tests;

use actix_web::{error, guard, web, HttpResponse};

use crate::middleware::AuthMiddleware;

/// Malformed JSON bodies get the same `{success, error}` shape as other failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::warn!("❌ Rejected request body: {}", message);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": message
            })),
        )
        .into()
    })
}

/// Route table. Private resources are wrapped in `AuthMiddleware`; where a
/// path is public for GET and private for other verbs, the public resource
/// carries a GET guard so other methods fall through to the guarded one.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/users")
                .route("/test", web::get().to(users::test))
                .route("/register", web::post().to(users::register))
                .route("/login", web::post().to(users::login))
                .service(
                    web::resource("/current")
                        .wrap(AuthMiddleware)
                        .route(web::get().to(users::current)),
                ),
        )
        .service(
            web::scope("/api/profile")
                .route("/test", web::get().to(profile::test))
                .route("/all", web::get().to(profile::get_all_profiles))
                .route("/handle/{handle}", web::get().to(profile::get_profile_by_handle))
                .route("/user/{user_id}", web::get().to(profile::get_profile_by_user))
                .service(
                    web::resource("")
                        .wrap(AuthMiddleware)
                        .route(web::get().to(profile::get_current_profile))
                        .route(web::post().to(profile::upsert_profile))
                        .route(web::delete().to(profile::delete_profile)),
                )
                .service(
                    web::resource("/experience")
                        .wrap(AuthMiddleware)
                        .route(web::post().to(profile::add_experience)),
                )
                .service(
                    web::resource("/experience/{exp_id}")
                        .wrap(AuthMiddleware)
                        .route(web::delete().to(profile::delete_experience)),
                )
                .service(
                    web::resource("/education")
                        .wrap(AuthMiddleware)
                        .route(web::post().to(profile::add_education)),
                )
                .service(
                    web::resource("/education/{education_id}")
                        .wrap(AuthMiddleware)
                        .route(web::delete().to(profile::delete_education)),
                ),
        )
        .service(
            web::scope("/api/posts")
                .route("/test", web::get().to(posts::test))
                .service(
                    web::resource("")
                        .guard(guard::Get())
                        .route(web::get().to(posts::get_posts)),
                )
                .service(
                    web::resource("")
                        .wrap(AuthMiddleware)
                        .route(web::post().to(posts::create_post)),
                )
                .service(
                    web::resource("/like/{id}")
                        .wrap(AuthMiddleware)
                        .route(web::post().to(posts::like_post)),
                )
                .service(
                    web::resource("/unlike/{id}")
                        .wrap(AuthMiddleware)
                        .route(web::post().to(posts::unlike_post)),
                )
                .service(
                    web::resource("/comment/{id}")
                        .wrap(AuthMiddleware)
                        .route(web::post().to(posts::add_comment)),
                )
                .service(
                    web::resource("/comment/{id}/{comment_id}")
                        .wrap(AuthMiddleware)
                        .route(web::delete().to(posts::delete_comment)),
                )
                .service(
                    web::resource("/{id}")
                        .guard(guard::Get())
                        .route(web::get().to(posts::get_post)),
                )
                .service(
                    web::resource("/{id}")
                        .wrap(AuthMiddleware)
                        .route(web::delete().to(posts::delete_post)),
                ),
        );
}
