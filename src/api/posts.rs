use actix_web::{web, HttpResponse};

use super::respond;
use crate::database::DocumentStore;
use crate::middleware::AuthUser;
use crate::models::{CommentResponse, LikeResponse, PostResponse, TextRequest};
use crate::services::post_service;

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Post created", body = PostResponse),
        (status = 400, description = "Text is required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_post(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    body: web::Json<TextRequest>,
) -> HttpResponse {
    log::info!("📝 POST /api/posts - user {}", user.id);

    respond(
        "Post created",
        post_service::create_post(store.get_ref(), &user.id, body.into_inner()).await,
    )
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    responses((status = 200, description = "All posts, newest first", body = [PostResponse])),
    security(("bearer_auth" = []))
)]
pub async fn list_posts(user: AuthUser, store: web::Data<dyn DocumentStore>) -> HttpResponse {
    log::info!("📋 GET /api/posts - user {}", user.id);

    respond("Posts listed", post_service::list_posts(store.get_ref()).await)
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_post(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> HttpResponse {
    let post_id = path.into_inner();
    log::info!("🔍 GET /api/posts/{} - user {}", post_id, user.id);

    respond("Post fetched", post_service::get_post(store.get_ref(), &post_id).await)
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post removed"),
        (status = 401, description = "User not authorized"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_post(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> HttpResponse {
    let post_id = path.into_inner();
    log::info!("🗑️  DELETE /api/posts/{} - user {}", post_id, user.id);

    let result = post_service::delete_post(store.get_ref(), &user.id, &post_id)
        .await
        .map(|_| serde_json::json!({ "msg": "Post removed" }));
    respond("Post removed", result)
}

#[utoipa::path(
    put,
    path = "/api/posts/like/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Updated likes", body = [LikeResponse]),
        (status = 400, description = "Post already liked")
    ),
    security(("bearer_auth" = []))
)]
pub async fn like_post(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> HttpResponse {
    let post_id = path.into_inner();
    log::info!("👍 PUT /api/posts/like/{} - user {}", post_id, user.id);

    respond("Post liked", post_service::like_post(store.get_ref(), &user.id, &post_id).await)
}

#[utoipa::path(
    put,
    path = "/api/posts/unlike/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Updated likes", body = [LikeResponse]),
        (status = 400, description = "Post has not yet been liked")
    ),
    security(("bearer_auth" = []))
)]
pub async fn unlike_post(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> HttpResponse {
    let post_id = path.into_inner();
    log::info!("👎 PUT /api/posts/unlike/{} - user {}", post_id, user.id);

    respond("Post unliked", post_service::unlike_post(store.get_ref(), &user.id, &post_id).await)
}

#[utoipa::path(
    post,
    path = "/api/posts/comment/{id}",
    tag = "Posts",
    params(("id" = String, Path, description = "Post id")),
    request_body = TextRequest,
    responses(
        (status = 200, description = "Updated comments", body = [CommentResponse]),
        (status = 400, description = "Text is required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_comment(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Json<TextRequest>,
) -> HttpResponse {
    let post_id = path.into_inner();
    log::info!("💬 POST /api/posts/comment/{} - user {}", post_id, user.id);

    respond(
        "Comment added",
        post_service::add_comment(store.get_ref(), &user.id, &post_id, body.into_inner()).await,
    )
}

#[utoipa::path(
    delete,
    path = "/api/posts/comment/{id}/{comment_id}",
    tag = "Posts",
    params(
        ("id" = String, Path, description = "Post id"),
        ("comment_id" = String, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Updated comments", body = [CommentResponse]),
        (status = 401, description = "User not authorized"),
        (status = 404, description = "Comment does not exist")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    user: AuthUser,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (post_id, comment_id) = path.into_inner();
    log::info!(
        "🗑️  DELETE /api/posts/comment/{}/{} - user {}",
        post_id,
        comment_id,
        user.id
    );

    respond(
        "Comment removed",
        post_service::delete_comment(store.get_ref(), &user.id, &post_id, &comment_id).await,
    )
}
