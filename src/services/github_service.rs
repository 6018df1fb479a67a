use serde::{Deserialize, Serialize};

use crate::config::GithubConfig;
use crate::utils::AppError;

/// Subset of the GitHub repository object shown on a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GithubRepo {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
}

/// Fetches the five most recently created public repositories of `username`.
pub async fn get_user_repos(
    client: &reqwest::Client,
    config: &GithubConfig,
    username: &str,
) -> Result<Vec<GithubRepo>, AppError> {
    log::info!("🐙 Fetching GitHub repos for {}", username);

    let url = format!(
        "{}/users/{}/repos",
        config.api_base.trim_end_matches('/'),
        urlencoding::encode(username)
    );

    let mut request = client
        .get(&url)
        .query(&[("per_page", "5"), ("sort", "created"), ("direction", "asc")])
        .header("User-Agent", "devconnector")
        .header("Accept", "application/vnd.github+json");

    if let Some(token) = &config.token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;

    if !response.status().is_success() {
        log::warn!("GitHub API answered {} for {}", response.status(), username);
        return Err(AppError::NoGithubProfile);
    }

    Ok(response.json().await?)
}
