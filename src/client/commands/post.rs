use serde_json::Value;

use super::alert_failure;
use crate::client::actions::{Action, ErrorPayload};
use crate::client::alert::AlertType;
use crate::client::api_client::{ApiClient, ApiError};
use crate::client::store::Store;
use crate::models::{CommentResponse, LikeResponse, PostResponse, TextRequest};

fn fail(store: &mut Store, err: ApiError) {
    alert_failure(store, &err);
    store.dispatch(Action::PostError(ErrorPayload::from(&err)));
}

pub async fn get_posts(store: &mut Store, api: &ApiClient) {
    match api.get::<Vec<PostResponse>>("/api/posts").await {
        Ok(posts) => store.dispatch(Action::GetPosts(posts)),
        Err(err) => fail(store, err),
    }
}

pub async fn get_post(store: &mut Store, api: &ApiClient, post_id: &str) {
    match api.get::<PostResponse>(&format!("/api/posts/{}", post_id)).await {
        Ok(post) => store.dispatch(Action::GetPost(post)),
        Err(err) => fail(store, err),
    }
}

pub async fn add_post(store: &mut Store, api: &ApiClient, text: &str) {
    match api.post::<_, PostResponse>("/api/posts", &TextRequest::new(text)).await {
        Ok(post) => {
            store.dispatch(Action::AddPost(post));
            store.set_alert("Post Created", AlertType::Success);
        }
        Err(err) => fail(store, err),
    }
}

pub async fn delete_post(store: &mut Store, api: &ApiClient, post_id: &str) {
    match api.delete::<Value>(&format!("/api/posts/{}", post_id)).await {
        Ok(_) => {
            store.dispatch(Action::DeletePost(post_id.to_string()));
            store.set_alert("Post Removed", AlertType::Success);
        }
        Err(err) => fail(store, err),
    }
}

pub async fn add_like(store: &mut Store, api: &ApiClient, post_id: &str) {
    update_likes(store, api, &format!("/api/posts/like/{}", post_id), post_id).await
}

pub async fn remove_like(store: &mut Store, api: &ApiClient, post_id: &str) {
    update_likes(store, api, &format!("/api/posts/unlike/{}", post_id), post_id).await
}

async fn update_likes(store: &mut Store, api: &ApiClient, path: &str, post_id: &str) {
    match api.put_empty::<Vec<LikeResponse>>(path).await {
        Ok(likes) => store.dispatch(Action::UpdateLikes {
            post_id: post_id.to_string(),
            likes,
        }),
        Err(err) => fail(store, err),
    }
}

pub async fn add_comment(store: &mut Store, api: &ApiClient, post_id: &str, text: &str) {
    let path = format!("/api/posts/comment/{}", post_id);
    match api.post::<_, Vec<CommentResponse>>(&path, &TextRequest::new(text)).await {
        Ok(comments) => {
            store.dispatch(Action::AddComment(comments));
            store.set_alert("Comment Added", AlertType::Success);
        }
        Err(err) => fail(store, err),
    }
}

pub async fn delete_comment(store: &mut Store, api: &ApiClient, post_id: &str, comment_id: &str) {
    let path = format!("/api/posts/comment/{}/{}", post_id, comment_id);
    match api.delete::<Vec<CommentResponse>>(&path).await {
        Ok(_) => {
            store.dispatch(Action::RemoveComment(comment_id.to_string()));
            store.set_alert("Comment Removed", AlertType::Success);
        }
        Err(err) => fail(store, err),
    }
}
