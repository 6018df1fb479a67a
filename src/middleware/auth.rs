use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures::future::LocalBoxFuture;
use mongodb::bson::oid::ObjectId;
use std::future::{ready, Ready};

use crate::config::Config;
use crate::services::auth_service::{self, Claims};
use crate::utils::AppError;

/// Legacy header still sent by older clients
const LEGACY_TOKEN_HEADER: &str = "x-auth-token";

/// The caller as established by `AuthMiddleware`.
/// Only usable on routes wrapped by it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: ObjectId,
    pub claims: Claims,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();

        ready(match claims {
            Some(claims) => claims.user_id().map(|id| AuthUser { id, claims }),
            None => Err(AppError::Unauthorized(
                "No token, authorization denied".to_string(),
            )),
        })
    }
}

/// Rejects requests without a valid token; on success the caller's
/// `Claims` are available to handlers through `web::ReqData<Claims>`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    let headers = req.headers();

    if let Some(value) = headers.get(actix_web::http::header::AUTHORIZATION) {
        if let Some(token) = value.to_str().ok().and_then(|v| v.strip_prefix("Bearer ")) {
            return Some(token.trim().to_string());
        }
    }

    headers
        .get(LEGACY_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|token| token.trim().to_string())
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let token = extract_token(req)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_string()))?;

    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| AppError::Internal("Config missing from app data".to_string()))?;

    let claims = auth_service::verify_token(&token, &config.jwt)?;
    claims.user_id()?;
    Ok(claims)
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                let res = req.into_response(e.error_response()).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
