use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::database::DocumentStore;
use crate::models::{CommentResponse, LikeResponse, Post, PostResponse, TextRequest, User};
use crate::utils::{parse_object_id, AppError};

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

async fn load_author(store: &dyn DocumentStore, user_id: &ObjectId) -> Result<User, AppError> {
    store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
}

async fn load_post(store: &dyn DocumentStore, post_id: &str) -> Result<Post, AppError> {
    let id = parse_object_id(post_id, post_not_found())?;
    store.find_post(&id).await?.ok_or_else(post_not_found)
}

/// Persists a mutated post, failing when another request wrote it first.
async fn save_post(store: &dyn DocumentStore, post: &Post) -> Result<(), AppError> {
    if store.replace_post(post).await? {
        Ok(())
    } else {
        log::warn!("⚠️ Post {:?} changed between read and write", post.id);
        Err(AppError::ConcurrentModification)
    }
}

fn validated_text(request: TextRequest) -> Result<String, AppError> {
    request.validate()?;
    match request.text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::validation("text", "Text is required")),
    }
}

pub async fn create_post(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    request: TextRequest,
) -> Result<PostResponse, AppError> {
    let text = validated_text(request)?;
    let author = load_author(store, user_id).await?;

    let mut post = Post::new(&author, text);
    post.id = Some(store.insert_post(&post).await?);

    Ok(PostResponse::from(post))
}

pub async fn list_posts(store: &dyn DocumentStore) -> Result<Vec<PostResponse>, AppError> {
    let posts = store.list_posts().await?;
    Ok(posts.into_iter().map(PostResponse::from).collect())
}

pub async fn get_post(store: &dyn DocumentStore, post_id: &str) -> Result<PostResponse, AppError> {
    load_post(store, post_id).await.map(PostResponse::from)
}

pub async fn delete_post(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    post_id: &str,
) -> Result<(), AppError> {
    let post = load_post(store, post_id).await?;

    if !post.is_authored_by(user_id) {
        return Err(AppError::not_authorized());
    }

    if let Some(id) = post.id {
        store.delete_post(&id).await?;
    }
    Ok(())
}

pub async fn like_post(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    post_id: &str,
) -> Result<Vec<LikeResponse>, AppError> {
    let mut post = load_post(store, post_id).await?;
    post.like(*user_id)?;
    save_post(store, &post).await?;

    Ok(post.likes.iter().map(LikeResponse::from).collect())
}

pub async fn unlike_post(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    post_id: &str,
) -> Result<Vec<LikeResponse>, AppError> {
    let mut post = load_post(store, post_id).await?;
    post.unlike(user_id)?;
    save_post(store, &post).await?;

    Ok(post.likes.iter().map(LikeResponse::from).collect())
}

pub async fn add_comment(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    post_id: &str,
    request: TextRequest,
) -> Result<Vec<CommentResponse>, AppError> {
    let text = validated_text(request)?;
    let author = load_author(store, user_id).await?;
    let mut post = load_post(store, post_id).await?;

    post.add_comment(&author, text);
    save_post(store, &post).await?;

    Ok(post.comments.iter().map(CommentResponse::from).collect())
}

pub async fn delete_comment(
    store: &dyn DocumentStore,
    user_id: &ObjectId,
    post_id: &str,
    comment_id: &str,
) -> Result<Vec<CommentResponse>, AppError> {
    let mut post = load_post(store, post_id).await?;
    let comment_id = parse_object_id(
        comment_id,
        AppError::NotFound("Comment does not exist".to_string()),
    )?;

    post.remove_comment(&comment_id, user_id)?;
    save_post(store, &post).await?;

    Ok(post.comments.iter().map(CommentResponse::from).collect())
}
