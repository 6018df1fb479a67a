use actix_web::{web, HttpResponse};

use super::respond;
use crate::config::Config;
use crate::database::DocumentStore;
use crate::middleware::AuthUser;
use crate::models::UserResponse;
use crate::services::auth_service::{self, LoginRequest, TokenResponse};

#[utoipa::path(
    post,
    path = "/api/auth",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Invalid Credentials")
    )
)]
pub async fn login(
    config: web::Data<Config>,
    store: web::Data<dyn DocumentStore>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let email = request.email.clone().unwrap_or_default();
    log::info!("🔐 POST /api/auth - email: {}", email);

    respond(
        &format!("Login for {}", email),
        auth_service::login(store.get_ref(), &config.jwt, request).await,
    )
}

#[utoipa::path(
    get,
    path = "/api/auth",
    tag = "Auth",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(user: AuthUser, store: web::Data<dyn DocumentStore>) -> HttpResponse {
    log::info!("👤 GET /api/auth - user {}", user.id);

    respond(
        "Current user fetched",
        auth_service::current_user(store.get_ref(), &user.claims).await,
    )
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::api::test_support::TestContext;
    use crate::models::UserResponse;
    use crate::services::auth_service::TokenResponse;

    #[actix_web::test]
    async fn test_register_login_and_me() {
        let ctx = TestContext::new();
        let app = crate::test_app!(ctx).await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({
                "name": "Carol",
                "email": "Carol@Example.com",
                "password": "secret123"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/auth")
            .set_json(json!({ "email": "carol@example.com", "password": "secret123" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let TokenResponse { token } = test::read_body_json(res).await;

        let req = test::TestRequest::get()
            .uri("/api/auth")
            .insert_header(("x-auth-token", token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let me: UserResponse = test::read_body_json(res).await;
        assert_eq!(me.name, "Carol");
        assert_eq!(me.email, "carol@example.com");

        let body: Value = serde_json::to_value(&me).unwrap();
        assert!(body.get("password").is_none());
    }

    #[actix_web::test]
    async fn test_wrong_password() {
        let ctx = TestContext::new();
        let app = crate::test_app!(ctx).await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "name": "Dan", "email": "dan@example.com", "password": "secret123" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/auth")
            .set_json(json!({ "email": "dan@example.com", "password": "nope-nope" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Invalid Credentials");
    }

    #[actix_web::test]
    async fn test_me_requires_token() {
        let ctx = TestContext::new();
        let app = crate::test_app!(ctx).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/auth").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
