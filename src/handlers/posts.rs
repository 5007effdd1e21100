use std::sync::Arc;

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, MethodRouter},
    Extension, Json, Router,
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::{
    models::{comments::CommentDto, posts::PostDto},
    AppState, Error, Result,
};

use super::{parse_id, JsonBody};

/// List and create, served at the prefix itself and at `{prefix}/`.
pub fn posts_root() -> MethodRouter {
    get(get_posts).post(create_post)
}

pub fn posts_handler() -> Router {
    Router::new()
        .route("/", posts_root())
        .route("/posts/comments", get(get_all_posts_with_comments))
        .route("/comments", get(get_comments))
        .route(
            "/comments/{comment_id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route(
            "/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/{id}/comments",
            get(get_comments_for_post).post(create_comment),
        )
        .route("/{id}/post/comments", get(get_post_with_comments))
}

async fn get_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.get_posts().await?;
    Ok((StatusCode::OK, Json(posts)))
}

async fn get_all_posts_with_comments(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let posts = app_state
        .posts_service
        .get_all_posts_with_comments()
        .await?;

    Ok((StatusCode::OK, Json(posts)))
}

async fn get_comments(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse> {
    let comments = app_state.posts_service.get_comments().await?;
    Ok((StatusCode::OK, Json(comments)))
}

async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let post_id = parse_id(&id)?;
    let post = app_state.posts_service.get_post(post_id).await?;

    Ok((StatusCode::OK, Json(post)))
}

async fn get_comments_for_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let post_id = parse_id(&id)?;
    let comments = app_state
        .posts_service
        .get_comments_for_post(post_id)
        .await?;

    Ok((StatusCode::OK, Json(comments)))
}

async fn get_post_with_comments(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let post_id = parse_id(&id)?;
    let post = app_state
        .posts_service
        .get_post_with_comments(post_id)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    JsonBody(new_post): JsonBody<PostDto>,
) -> Result<impl IntoResponse> {
    new_post.validate()?;

    let post = app_state.posts_service.create_post(&new_post).await?;
    info!(post_id = post.id, "post created");

    let location = format!("{}/{}", app_state.config.route_prefix, post.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(post)))
}

async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(update_post): JsonBody<PostDto>,
) -> Result<impl IntoResponse> {
    let post_id = parse_id(&id)?;
    let updated = Utc::now();
    update_post.validate()?;

    let post = app_state
        .posts_service
        .update_post(post_id, &update_post, updated)
        .await?;

    Ok((StatusCode::OK, Json(post)))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let post_id = parse_id(&id)?;
    if post_id < 1 {
        return Err(Error::BadRequest(format!("'{id}' is not a valid post id")));
    }

    app_state.posts_service.delete_post(post_id).await?;
    info!(post_id, "post deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn get_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse> {
    let comment_id = parse_id(&comment_id)?;
    let comment = app_state.posts_service.get_comment(comment_id).await?;

    Ok((StatusCode::OK, Json(comment)))
}

async fn create_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(new_comment): JsonBody<CommentDto>,
) -> Result<impl IntoResponse> {
    let post_id = parse_id(&id)?;
    new_comment.validate()?;

    let comment = app_state
        .posts_service
        .create_comment(post_id, &new_comment)
        .await?;
    info!(post_id, comment_id = comment.id, "comment created");

    let location = format!(
        "{}/comments/{}",
        app_state.config.route_prefix, comment.id
    );
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(comment)))
}

async fn update_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(comment_id): Path<String>,
    JsonBody(update_comment): JsonBody<CommentDto>,
) -> Result<impl IntoResponse> {
    let comment_id = parse_id(&comment_id)?;
    let updated = Utc::now();
    update_comment.validate()?;

    let comment = app_state
        .posts_service
        .update_comment(comment_id, &update_comment, updated)
        .await?;

    Ok((StatusCode::OK, Json(comment)))
}

async fn delete_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse> {
    let comment_id = parse_id(&comment_id)?;
    app_state.posts_service.delete_comment(comment_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
