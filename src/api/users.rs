use actix_web::{web, HttpResponse};

use super::respond;
use crate::config::Config;
use crate::database::DocumentStore;
use crate::services::auth_service::{self, RegisterRequest, TokenResponse};

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration successful", body = TokenResponse),
        (status = 400, description = "Invalid request or user already exists")
    )
)]
pub async fn register(
    config: web::Data<Config>,
    store: web::Data<dyn DocumentStore>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let email = request.email.clone().unwrap_or_default();
    log::info!("📝 POST /api/users - email: {}", email);

    respond(
        &format!("Registration of {}", email),
        auth_service::register(store.get_ref(), &config.jwt, request).await,
    )
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::api::test_support::TestContext;

    #[actix_web::test]
    async fn test_register_validation_errors() {
        let ctx = TestContext::new();
        let app = crate::test_app!(ctx).await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "email": "not-an-email", "password": "123" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["errors"],
            json!([
                { "param": "email", "msg": "Please include a valid email" },
                { "param": "name", "msg": "Name is required" },
                { "param": "password", "msg": "Please enter a password with 6 or more characters" }
            ])
        );
    }

    #[actix_web::test]
    async fn test_duplicate_email() {
        let ctx = TestContext::new();
        let app = crate::test_app!(ctx).await;

        let body = json!({ "name": "Eve", "email": "eve@example.com", "password": "secret123" });
        let first = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/users").set_json(&body).to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/users").set_json(&body).to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(second).await;
        assert_eq!(body["error"], "User already exists");
    }
}
