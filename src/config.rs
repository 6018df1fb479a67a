use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Runtime settings, loaded once at startup and shared as `web::Data<Config>`.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub github: GithubConfig,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expires_hours: i64,
}

#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_base: String,
    pub token: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let cors_origins = var_or("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_or("PORT", 5000)?,
            database_url,
            jwt: JwtConfig {
                secret: var_or("JWT_SECRET", "default-secret-change-me"),
                issuer: var_or("JWT_ISSUER", "devconnector"),
                audience: var_or("JWT_AUDIENCE", "devconnector-api"),
                expires_hours: parse_or("JWT_EXPIRES_HOURS", 24)?,
            },
            github: GithubConfig {
                api_base: var_or("GITHUB_API_BASE", "https://api.github.com"),
                token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            },
            cors_origins,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        log::debug!("{} not set, using default: {}", key, default);
        default.to_string()
    })
}

fn parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Settings for in-process tests; never touches the environment.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "mongodb://localhost:27017/devconnector_test".to_string(),
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                issuer: "devconnector".to_string(),
                audience: "devconnector-api".to_string(),
                expires_hours: 1,
            },
            github: GithubConfig {
                api_base: "http://127.0.0.1:9".to_string(),
                token: None,
            },
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}
