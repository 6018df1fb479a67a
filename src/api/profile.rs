use actix_web::{web, HttpResponse};

use super::respond;
use crate::config::Config;
use crate::database::DocumentStore;
use crate::middleware::AuthUser;
use crate::models::{EducationInput, ExperienceInput, ProfileInput, ProfileResponse};
use crate::services::github_service::{self, GithubRepo};
use crate::services::profile_service;

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Profiles",
    responses(
        (status = 200, description = "Every profile with its owner", body = [ProfileResponse])
    )
)]
pub async fn list_profiles(store: web::Data<dyn DocumentStore>) -> HttpResponse {
    log::info!("📋 GET /api/profile");

    respond("Profiles listed", profile_service::list_profiles(store.get_ref()).await)
}

#[utoipa::path(
    post,
    path = "/api/profile",
    tag = "Profiles",
    request_body = ProfileInput,
    responses(
        (status = 200, description = "Created or updated profile", body = ProfileResponse),
        (status = 400, description = "Status or skills missing")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upsert_profile(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    body: web::Json<ProfileInput>,
) -> HttpResponse {
    log::info!("✏️  POST /api/profile - user {}", user.id);

    respond(
        "Profile saved",
        profile_service::upsert_profile(store.get_ref(), &user.id, body.into_inner()).await,
    )
}

#[utoipa::path(
    delete,
    path = "/api/profile",
    tag = "Profiles",
    responses((status = 200, description = "User deleted")),
    security(("bearer_auth" = []))
)]
pub async fn delete_account(user: AuthUser, store: web::Data<dyn DocumentStore>) -> HttpResponse {
    log::info!("🗑️  DELETE /api/profile - user {}", user.id);

    let result = profile_service::delete_account(store.get_ref(), &user.id)
        .await
        .map(|_| serde_json::json!({ "msg": "User deleted" }));
    respond("Account deleted", result)
}

#[utoipa::path(
    get,
    path = "/api/profile/me",
    tag = "Profiles",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileResponse),
        (status = 400, description = "There is no profile for this user")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_my_profile(user: AuthUser, store: web::Data<dyn DocumentStore>) -> HttpResponse {
    log::info!("👤 GET /api/profile/me - user {}", user.id);

    respond("Own profile fetched", profile_service::get_my_profile(store.get_ref(), &user.id).await)
}

#[utoipa::path(
    get,
    path = "/api/profile/user/{user_id}",
    tag = "Profiles",
    params(("user_id" = String, Path, description = "Owner's user id")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 400, description = "Profile not found")
    )
)]
pub async fn get_profile_by_user(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("🔍 GET /api/profile/user/{}", user_id);

    respond(
        "Profile fetched",
        profile_service::get_profile_by_user(store.get_ref(), &user_id).await,
    )
}

#[utoipa::path(
    get,
    path = "/api/profile/github/{username}",
    tag = "Profiles",
    params(("username" = String, Path, description = "GitHub login")),
    responses(
        (status = 200, description = "Latest public repositories", body = [GithubRepo]),
        (status = 404, description = "No Github profile found")
    )
)]
pub async fn get_github_repos(
    config: web::Data<Config>,
    client: web::Data<reqwest::Client>,
    path: web::Path<String>,
) -> HttpResponse {
    let username = path.into_inner();
    log::info!("🐙 GET /api/profile/github/{}", username);

    respond(
        "GitHub repos fetched",
        github_service::get_user_repos(client.get_ref(), &config.github, &username).await,
    )
}

#[utoipa::path(
    put,
    path = "/api/profile/experience",
    tag = "Profiles",
    request_body = ExperienceInput,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Missing fields or no profile")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_experience(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    body: web::Json<ExperienceInput>,
) -> HttpResponse {
    log::info!("💼 PUT /api/profile/experience - user {}", user.id);

    respond(
        "Experience added",
        profile_service::add_experience(store.get_ref(), &user.id, body.into_inner()).await,
    )
}

#[utoipa::path(
    delete,
    path = "/api/profile/experience/{exp_id}",
    tag = "Profiles",
    params(("exp_id" = String, Path, description = "Experience entry id")),
    responses((status = 200, description = "Updated profile", body = ProfileResponse)),
    security(("bearer_auth" = []))
)]
pub async fn remove_experience(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> HttpResponse {
    let exp_id = path.into_inner();
    log::info!("🗑️  DELETE /api/profile/experience/{} - user {}", exp_id, user.id);

    respond(
        "Experience removed",
        profile_service::remove_experience(store.get_ref(), &user.id, &exp_id).await,
    )
}

#[utoipa::path(
    put,
    path = "/api/profile/education",
    tag = "Profiles",
    request_body = EducationInput,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Missing fields or no profile")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_education(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    body: web::Json<EducationInput>,
) -> HttpResponse {
    log::info!("🎓 PUT /api/profile/education - user {}", user.id);

    respond(
        "Education added",
        profile_service::add_education(store.get_ref(), &user.id, body.into_inner()).await,
    )
}

#[utoipa::path(
    delete,
    path = "/api/profile/education/{edu_id}",
    tag = "Profiles",
    params(("edu_id" = String, Path, description = "Education entry id")),
    responses((status = 200, description = "Updated profile", body = ProfileResponse)),
    security(("bearer_auth" = []))
)]
pub async fn remove_education(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> HttpResponse {
    let edu_id = path.into_inner();
    log::info!("🗑️  DELETE /api/profile/education/{} - user {}", edu_id, user.id);

    respond(
        "Education removed",
        profile_service::remove_education(store.get_ref(), &user.id, &edu_id).await,
    )
}
