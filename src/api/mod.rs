pub mod auth;
pub mod health;
pub mod posts;
pub mod profile;
pub mod swagger;
pub mod users;

use actix_web::{guard, web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::middleware::AuthMiddleware;
use crate::utils::AppError;

/// Logs the outcome of a handler and renders it.
pub(crate) fn respond<T: Serialize>(context: &str, result: Result<T, AppError>) -> HttpResponse {
    match result {
        Ok(body) => {
            log::info!("✅ {}", context);
            HttpResponse::Ok().json(body)
        }
        Err(e) if e.status_code().is_server_error() => {
            log::error!("❌ {} failed: {}", context, e);
            e.error_response()
        }
        Err(e) => {
            log::warn!("⚠️ {} rejected: {}", context, e);
            e.error_response()
        }
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
        })
}

/// Registers every route. Expects `web::Data<Config>`, `web::Data<dyn DocumentStore>`
/// and `web::Data<reqwest::Client>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(web::scope("/api/users").route("", web::post().to(users::register)))
        .service(
            web::scope("/api/auth")
                .service(
                    web::resource("")
                        .guard(guard::Post())
                        .route(web::post().to(auth::login)),
                )
                .service(
                    web::resource("")
                        .guard(guard::Get())
                        .wrap(AuthMiddleware)
                        .route(web::get().to(auth::get_me)),
                ),
        )
        // Posts: everything requires a token
        .service(
            web::scope("/api/posts")
                .wrap(AuthMiddleware)
                .route("", web::post().to(posts::create_post))
                .route("", web::get().to(posts::list_posts))
                .route("/like/{id}", web::put().to(posts::like_post))
                .route("/unlike/{id}", web::put().to(posts::unlike_post))
                .route("/comment/{id}", web::post().to(posts::add_comment))
                .route("/comment/{id}/{comment_id}", web::delete().to(posts::delete_comment))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::delete().to(posts::delete_post)),
        )
        // Profiles: reads are public, writes are private
        .service(
            web::scope("/api/profile")
                .service(
                    web::resource("")
                        .guard(guard::Get())
                        .route(web::get().to(profile::list_profiles)),
                )
                .service(
                    web::resource("")
                        .guard(guard::Post())
                        .wrap(AuthMiddleware)
                        .route(web::post().to(profile::upsert_profile)),
                )
                .service(
                    web::resource("")
                        .guard(guard::Delete())
                        .wrap(AuthMiddleware)
                        .route(web::delete().to(profile::delete_account)),
                )
                .service(
                    web::resource("/me")
                        .wrap(AuthMiddleware)
                        .route(web::get().to(profile::get_my_profile)),
                )
                .route("/user/{user_id}", web::get().to(profile::get_profile_by_user))
                .route("/github/{username}", web::get().to(profile::get_github_repos))
                .service(
                    web::resource("/experience")
                        .wrap(AuthMiddleware)
                        .route(web::put().to(profile::add_experience)),
                )
                .service(
                    web::resource("/experience/{exp_id}")
                        .wrap(AuthMiddleware)
                        .route(web::delete().to(profile::remove_experience)),
                )
                .service(
                    web::resource("/education")
                        .wrap(AuthMiddleware)
                        .route(web::put().to(profile::add_education)),
                )
                .service(
                    web::resource("/education/{edu_id}")
                        .wrap(AuthMiddleware)
                        .route(web::delete().to(profile::remove_education)),
                ),
        );
}
