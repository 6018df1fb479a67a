use uuid::Uuid;

use super::alert::Alert;
use super::api_client::ApiError;
use crate::models::{CommentResponse, LikeResponse, PostResponse, ProfileResponse, UserResponse};
use crate::services::github_service::GithubRepo;

/// Carried by every error action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub msg: String,
    pub status: u16,
}

impl From<&ApiError> for ErrorPayload {
    fn from(err: &ApiError) -> Self {
        Self {
            msg: err.msg.clone(),
            status: err.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Auth
    RegisterSuccess { token: String },
    RegisterFail(ErrorPayload),
    UserLoaded(UserResponse),
    AuthError(ErrorPayload),
    LoginSuccess { token: String },
    LoginFail(ErrorPayload),
    Logout,
    AccountDeleted,

    // Alerts
    SetAlert(Alert),
    RemoveAlert(Uuid),

    // Posts
    GetPosts(Vec<PostResponse>),
    GetPost(PostResponse),
    AddPost(PostResponse),
    DeletePost(String),
    UpdateLikes { post_id: String, likes: Vec<LikeResponse> },
    AddComment(Vec<CommentResponse>),
    RemoveComment(String),
    PostError(ErrorPayload),

    // Profiles
    GetProfile(ProfileResponse),
    GetProfiles(Vec<ProfileResponse>),
    GetRepos(Vec<GithubRepo>),
    UpdateProfile(ProfileResponse),
    ClearProfile,
    ProfileError(ErrorPayload),
}
