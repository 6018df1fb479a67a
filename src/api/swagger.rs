use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevConnector API",
        version = "1.0.0",
        description = "Developer profiles, posts, comments and likes.\n\n**Authentication:** private endpoints take a JWT as `Authorization: Bearer <token>` (or the legacy `x-auth-token` header)."
    ),
    paths(
        // Auth
        crate::api::users::register,
        crate::api::auth::login,
        crate::api::auth::get_me,

        // Health
        crate::api::health::health_check,

        // Posts
        crate::api::posts::create_post,
        crate::api::posts::list_posts,
        crate::api::posts::get_post,
        crate::api::posts::delete_post,
        crate::api::posts::like_post,
        crate::api::posts::unlike_post,
        crate::api::posts::add_comment,
        crate::api::posts::delete_comment,

        // Profiles
        crate::api::profile::list_profiles,
        crate::api::profile::upsert_profile,
        crate::api::profile::delete_account,
        crate::api::profile::get_my_profile,
        crate::api::profile::get_profile_by_user,
        crate::api::profile::get_github_repos,
        crate::api::profile::add_experience,
        crate::api::profile::remove_experience,
        crate::api::profile::add_education,
        crate::api::profile::remove_education,
    ),
    components(
        schemas(
            crate::utils::FieldError,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::TokenResponse,
            crate::models::UserResponse,
            crate::models::UserSummary,
            crate::api::health::HealthResponse,
            crate::models::TextRequest,
            crate::models::PostResponse,
            crate::models::LikeResponse,
            crate::models::CommentResponse,
            crate::models::ProfileInput,
            crate::models::SkillsInput,
            crate::models::ExperienceInput,
            crate::models::EducationInput,
            crate::models::ProfileResponse,
            crate::models::ExperienceResponse,
            crate::models::EducationResponse,
            crate::models::Social,
            crate::services::github_service::GithubRepo,
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and the current user."),
        (name = "Health", description = "Liveness probe."),
        (name = "Posts", description = "Posts with likes and comments. Every endpoint requires a token."),
        (name = "Profiles", description = "Developer profiles. Reads are public, writes act on the caller's own profile."),
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
                        .description(Some("Token returned by POST /api/users or POST /api/auth"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/posts/comment/{id}/{comment_id}"));
        assert!(doc.paths.paths.contains_key("/api/profile/github/{username}"));
        assert!(doc
            .components
            .as_ref()
            .map(|c| c.security_schemes.contains_key("bearer_auth"))
            .unwrap_or(false));
    }
}
