use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::JwtConfig;
use crate::database::DocumentStore;
use crate::models::{User, UserResponse};
use crate::utils::{now_millis, AppError};

const DEFAULT_AVATAR: &str = "https://www.gravatar.com/avatar/?s=200&r=pg&d=mm";

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id (hex)
    pub name: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
    pub aud: String,
    pub iss: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(&self.sub)
            .map_err(|_| AppError::Unauthorized("Token is not valid".to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Please include a valid email"),
        email(message = "Please include a valid email")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Please enter a password with 6 or more characters"),
        length(min = 6, message = "Please enter a password with 6 or more characters")
    )]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(
        required(message = "Please include a valid email"),
        email(message = "Please include a valid email")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// Generate JWT token
pub fn generate_jwt(user: &User, config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.object_id().to_hex(),
        name: user.name.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(config.expires_hours)).timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
        aud: config.audience.clone(),
        iss: config.issuer.clone(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?)
}

// Verify JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);
    validation.set_issuer(&[config.issuer.as_str()]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::debug!("Token rejected: {}", e);
        AppError::Unauthorized("Token is not valid".to_string())
    })
}

fn user_exists() -> AppError {
    AppError::BadRequest("User already exists".to_string())
}

// User registration
pub async fn register(
    store: &dyn DocumentStore,
    config: &JwtConfig,
    request: RegisterRequest,
) -> Result<TokenResponse, AppError> {
    request.validate()?;

    let email = request.email.unwrap_or_default().trim().to_lowercase();
    if store.find_user_by_email(&email).await?.is_some() {
        return Err(user_exists());
    }

    let password = request.password.unwrap_or_default();
    let hashed = tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

    let mut user = User {
        id: None,
        name: request.name.unwrap_or_default().trim().to_string(),
        email,
        password: hashed,
        avatar: Some(request.avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string())),
        date: now_millis(),
    };
    user.id = Some(store.insert_user(&user).await.map_err(|e| match e {
        AppError::DuplicateKey(_) => user_exists(),
        other => other,
    })?);

    Ok(TokenResponse {
        token: generate_jwt(&user, config)?,
    })
}

// User login
pub async fn login(
    store: &dyn DocumentStore,
    config: &JwtConfig,
    request: LoginRequest,
) -> Result<TokenResponse, AppError> {
    request.validate()?;

    let invalid = || AppError::BadRequest("Invalid Credentials".to_string());
    let email = request.email.unwrap_or_default().trim().to_lowercase();

    let user = store.find_user_by_email(&email).await?.ok_or_else(invalid)?;

    let password = request.password.unwrap_or_default();
    let stored = user.password.clone();
    let valid = tokio::task::spawn_blocking(move || verify(password, &stored))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))??;

    if !valid {
        return Err(invalid());
    }

    Ok(TokenResponse {
        token: generate_jwt(&user, config)?,
    })
}

/// The authenticated caller, without the credential hash.
pub async fn current_user(
    store: &dyn DocumentStore,
    claims: &Claims,
) -> Result<UserResponse, AppError> {
    let user_id = claims.user_id()?;
    store
        .find_user(&user_id)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
