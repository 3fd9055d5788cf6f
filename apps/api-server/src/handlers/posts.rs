//! Forum post handlers.

use actix_web::{HttpResponse, web};

use forum_core::domain::PostChanges;
use forum_shared::{NewCommentRequest, NewPostRequest, PeriodRequest, UpdatePostRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /forum/post/{author}
pub async fn create_post(
    state: web::Data<AppState>,
    author: web::Path<String>,
    body: web::Json<NewPostRequest>,
) -> AppResult<HttpResponse> {
    let author = author.into_inner();
    let req = body.into_inner();

    let post = state
        .posts
        .create_post(&author, req.title, req.content, req.tags)
        .await?;

    tracing::info!(post_id = %post.id, author = %post.author, "Post created");
    Ok(HttpResponse::Created().json(post))
}

/// GET /forum/post/{id}
pub async fn find_post_by_id(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find_post_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /forum/post/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        tags: req.tags,
    };

    let post = state.posts.update_post(&id, changes).await?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /forum/post/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.delete_post(&id).await?;

    tracing::info!(post_id = %post.id, "Post deleted");
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /forum/post/{post_id}/comment/{user}
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<NewCommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, user) = path.into_inner();

    let post = state
        .posts
        .add_comment(&post_id, &user, body.into_inner().message)
        .await?;

    tracing::debug!(post_id = %post.id, user = %user, "Comment added");
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /forum/post/{post_id}/like
pub async fn add_like(
    state: web::Data<AppState>,
    post_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let result = state.posts.add_like(&post_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /forum/posts
pub async fn find_all_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /forum/posts/author/{author}
pub async fn find_posts_by_author(
    state: web::Data<AppState>,
    author: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.find_posts_by_author(&author).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /forum/posts/tags
pub async fn find_posts_by_tags(
    state: web::Data<AppState>,
    body: web::Json<Vec<String>>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.find_posts_by_tags(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /forum/posts/period
pub async fn find_posts_by_period(
    state: web::Data<AppState>,
    body: web::Json<PeriodRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let posts = state
        .posts
        .find_posts_by_period(req.date_from, req.date_to)
        .await?;
    Ok(HttpResponse::Ok().json(posts))
}
