use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// MongoDB server code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// A single failed field check, serialized as `{ "param": ..., "msg": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("There is no profile for this user")]
    NoProfile,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Duplicate like / unlike of a post that was never liked
    #[error("{0}")]
    Conflict(String),

    /// The document changed between read and write
    #[error("Resource was modified concurrently, retry")]
    ConcurrentModification,

    /// A unique index rejected the write; holds the offending key
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("No Github profile found")]
    NoGithubProfile,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(param: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(param, msg)])
    }

    pub fn not_authorized() -> Self {
        AppError::Unauthorized("User not authorized".to_string())
    }

    /// Message exposed to clients. Server-side failures are never leaked.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Upstream(_) | AppError::Database(_) | AppError::Internal(_) => {
                "Server Error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::NoProfile
            | AppError::ProfileNotFound
            | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::NoGithubProfile => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ConcurrentModification | AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = serde_json::json!({
            "success": false,
            "error": self.public_message(),
        });

        if let AppError::Validation(errors) = self {
            body["errors"] = serde_json::json!(errors);
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors: Vec<FieldError> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| {
                    // Struct-level checks land under "__all__"; their code names the field
                    let param = if field == "__all__" {
                        e.code.to_string()
                    } else {
                        field.to_string()
                    };
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", param));
                    FieldError { param, msg }
                })
            })
            .collect();

        errors.sort_by(|a, b| a.param.cmp(&b.param));
        AppError::Validation(errors)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        if let ErrorKind::Write(WriteFailure::WriteError(write)) = err.kind.as_ref() {
            if write.code == DUPLICATE_KEY_CODE {
                return AppError::DuplicateKey(write.message.clone());
            }
        }
        AppError::Database(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Password hashing failed: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(format!("Token error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_server_errors_hide_details() {
        let err = AppError::Database("connection refused on 10.0.0.3".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Server Error");
    }

    #[actix_web::test]
    async fn test_validation_errors_are_listed() {
        let err = AppError::Validation(vec![FieldError::new("company", "Company is required")]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"][0]["msg"], "Company is required");
        assert_eq!(json["errors"][0]["param"], "company");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NoProfile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NoGithubProfile.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::not_authorized().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::ConcurrentModification.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::DuplicateKey("email".to_string()).status_code(),
            StatusCode::CONFLICT
        );
    }
}
