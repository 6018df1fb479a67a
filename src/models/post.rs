use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;
use crate::utils::{millis_to_rfc3339, now_millis, AppError};

/// Documento da collection "posts" (likes e comentários embutidos)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Author
    pub user: ObjectId,

    pub text: String,

    /// Author name and avatar as they were when the post was written
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,

    #[serde(default)]
    pub likes: Vec<Like>,

    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Unix millis
    pub date: i64,

    /// Bumped on every replace; guards read-modify-write cycles
    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub user: ObjectId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub text: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub date: i64,
}

impl Post {
    pub fn new(author: &User, text: String) -> Self {
        Post {
            id: None,
            user: author.object_id(),
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            likes: vec![],
            comments: vec![],
            date: now_millis(),
            version: 0,
        }
    }

    pub fn is_authored_by(&self, user: &ObjectId) -> bool {
        &self.user == user
    }

    pub fn is_liked_by(&self, user: &ObjectId) -> bool {
        self.likes.iter().any(|like| &like.user == user)
    }

    pub fn like(&mut self, user: ObjectId) -> Result<(), AppError> {
        if self.is_liked_by(&user) {
            return Err(AppError::Conflict("Post already liked".to_string()));
        }
        self.likes.insert(0, Like { user });
        Ok(())
    }

    pub fn unlike(&mut self, user: &ObjectId) -> Result<(), AppError> {
        let index = self
            .likes
            .iter()
            .position(|like| &like.user == user)
            .ok_or_else(|| AppError::Conflict("Post has not yet been liked".to_string()))?;
        self.likes.remove(index);
        Ok(())
    }

    /// Prepends a comment carrying the author's current name/avatar.
    pub fn add_comment(&mut self, author: &User, text: String) -> &Comment {
        self.comments.insert(
            0,
            Comment {
                id: ObjectId::new(),
                user: author.object_id(),
                text,
                name: author.name.clone(),
                avatar: author.avatar.clone(),
                date: now_millis(),
            },
        );
        &self.comments[0]
    }

    /// Removes the comment with `comment_id`; only its author may do so.
    pub fn remove_comment(
        &mut self,
        comment_id: &ObjectId,
        caller: &ObjectId,
    ) -> Result<Comment, AppError> {
        let index = self
            .comments
            .iter()
            .position(|comment| &comment.id == comment_id)
            .ok_or_else(|| AppError::NotFound("Comment does not exist".to_string()))?;

        if &self.comments[index].user != caller {
            return Err(AppError::not_authorized());
        }

        Ok(self.comments.remove(index))
    }
}

/// Body of `POST /api/posts` and `POST /api/posts/comment/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct TextRequest {
    #[validate(
        required(message = "Text is required"),
        length(min = 1, message = "Text is required")
    )]
    pub text: Option<String>,
}

impl TextRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LikeResponse {
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CommentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: Option<String>,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PostResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: Option<String>,
    pub likes: Vec<LikeResponse>,
    pub comments: Vec<CommentResponse>,
    pub date: String,
}

impl From<&Like> for LikeResponse {
    fn from(like: &Like) -> Self {
        LikeResponse {
            user: like.user.to_hex(),
        }
    }
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        CommentResponse {
            id: comment.id.to_hex(),
            user: comment.user.to_hex(),
            text: comment.text.clone(),
            name: comment.name.clone(),
            avatar: comment.avatar.clone(),
            date: millis_to_rfc3339(comment.date),
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            id: post.id.map(|id| id.to_hex()).unwrap_or_default(),
            user: post.user.to_hex(),
            likes: post.likes.iter().map(LikeResponse::from).collect(),
            comments: post.comments.iter().map(CommentResponse::from).collect(),
            text: post.text,
            name: post.name,
            avatar: post.avatar,
            date: millis_to_rfc3339(post.date),
        }
    }
}
