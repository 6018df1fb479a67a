pub mod auth_service;
pub mod github_service;
pub mod post_service;
pub mod profile_service;
