//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{NewPost, Post, PostChanges};
use blog_shared::ApiResponse;
use blog_shared::dto::{CreatePostRequest, PostListResponse, PostResponse, UpdatePostRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

pub const CREATED_NOTICE: &str = "Post was successfully created.";
pub const UPDATED_NOTICE: &str = "Post was successfully updated.";
pub const DESTROYED_NOTICE: &str = "Post was successfully destroyed.";

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        published: post.published,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn list(posts: Vec<Post>) -> HttpResponse {
    let posts = posts.into_iter().map(to_response).collect();
    HttpResponse::Ok().json(ApiResponse::ok(PostListResponse::new(posts)))
}

/// GET /api/posts - published posts only
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(list(state.posts.published().await?))
}

/// GET /api/posts/drafts
pub async fn drafts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(list(state.posts.drafts().await?))
}

/// GET /api/posts/all
pub async fn all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(list(state.posts.all().await?))
}

/// GET /api/posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.find(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new = NewPost::new(req.title, req.content, req.published.unwrap_or(false));

    let post = state.posts.create(new).await?;
    tracing::info!(post_id = %post.id, published = post.published, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(post),
        CREATED_NOTICE,
    )))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        published: req.published,
    };

    let post = state.posts.update(path.into_inner(), changes).await?;
    tracing::info!(post_id = %post.id, published = post.published, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(post),
        UPDATED_NOTICE,
    )))
}

/// DELETE /api/posts/{id}
pub async fn destroy(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, "Post destroyed");

    Ok(HttpResponse::Ok().json(ApiResponse::message(DESTROYED_NOTICE)))
}
