use crate::client::actions::{Action, ErrorPayload};
use crate::models::PostResponse;

#[derive(Debug, Clone, PartialEq)]
pub struct PostState {
    pub posts: Vec<PostResponse>,
    pub post: Option<PostResponse>,
    pub loading: bool,
    pub error: Option<ErrorPayload>,
}

impl Default for PostState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            post: None,
            loading: true,
            error: None,
        }
    }
}

pub fn reduce(state: &PostState, action: &Action) -> PostState {
    match action {
        Action::GetPosts(posts) => PostState {
            posts: posts.clone(),
            loading: false,
            ..state.clone()
        },
        Action::GetPost(post) => PostState {
            post: Some(post.clone()),
            loading: false,
            ..state.clone()
        },
        Action::AddPost(post) => {
            let mut posts = Vec::with_capacity(state.posts.len() + 1);
            posts.push(post.clone());
            posts.extend(state.posts.iter().cloned());
            PostState {
                posts,
                loading: false,
                ..state.clone()
            }
        }
        Action::DeletePost(id) => PostState {
            posts: state.posts.iter().filter(|p| &p.id != id).cloned().collect(),
            loading: false,
            ..state.clone()
        },
        Action::UpdateLikes { post_id, likes } => {
            let with_likes = |p: &PostResponse| {
                if &p.id == post_id {
                    PostResponse {
                        likes: likes.clone(),
                        ..p.clone()
                    }
                } else {
                    p.clone()
                }
            };
            PostState {
                posts: state.posts.iter().map(with_likes).collect(),
                post: state.post.as_ref().map(with_likes),
                loading: false,
                ..state.clone()
            }
        }
        Action::AddComment(comments) => PostState {
            post: state.post.as_ref().map(|p| PostResponse {
                comments: comments.clone(),
                ..p.clone()
            }),
            loading: false,
            ..state.clone()
        },
        Action::RemoveComment(comment_id) => PostState {
            post: state.post.as_ref().map(|p| PostResponse {
                comments: p
                    .comments
                    .iter()
                    .filter(|c| &c.id != comment_id)
                    .cloned()
                    .collect(),
                ..p.clone()
            }),
            loading: false,
            ..state.clone()
        },
        Action::PostError(error) => PostState {
            error: Some(error.clone()),
            loading: false,
            ..state.clone()
        },
        Action::Logout | Action::AccountDeleted => PostState::default(),
        _ => state.clone(),
    }
}
