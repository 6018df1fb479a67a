use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::test;

    use super::HealthResponse;
    use crate::api::test_support::TestContext;

    #[actix_web::test]
    async fn test_health_is_public() {
        let ctx = TestContext::new();
        let app = crate::test_app!(ctx).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, "devconnector");
    }
}
