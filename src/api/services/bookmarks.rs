//! `/api/v1/bookmarks` 处理器
//!
//! 所有路由都挂在 BearerAuth 后面，调用者只能看到自己的书签

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use super::helpers::{api_result, error_response};
use super::types::{BookmarkBody, BookmarkListResponse, BookmarkResponse, PaginationQuery};
use crate::api::middleware::AuthenticatedUser;
use crate::errors::ShortmarkError;
use crate::services::{BookmarkService, UpdateBookmarkRequest};

/// GET /bookmarks
pub async fn list_bookmarks(
    user: AuthenticatedUser,
    query: web::Query<PaginationQuery>,
    bookmarks: web::Data<Arc<BookmarkService>>,
) -> impl Responder {
    trace!("List bookmarks for user {}: {:?}", user.id(), query);
    let result = bookmarks
        .list(user.id(), query.page, query.per_page)
        .await
        .map(BookmarkListResponse::from);
    api_result(StatusCode::OK, result)
}

/// POST /bookmarks
pub async fn create_bookmark(
    user: AuthenticatedUser,
    body: web::Json<BookmarkBody>,
    bookmarks: web::Data<Arc<BookmarkService>>,
) -> HttpResponse {
    let body = body.into_inner();
    let Some(url) = body.url else {
        return error_response(&ShortmarkError::validation("Enter a valid url"));
    };

    let result = bookmarks
        .create(user.id(), &url, body.body)
        .await
        .map(BookmarkResponse::from);
    api_result(StatusCode::CREATED, result)
}

/// GET /bookmarks/{id}
pub async fn get_bookmark(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    bookmarks: web::Data<Arc<BookmarkService>>,
) -> impl Responder {
    let result = bookmarks
        .get(user.id(), path.into_inner())
        .await
        .map(BookmarkResponse::from);
    api_result(StatusCode::OK, result)
}

/// PUT /bookmarks/{id}：url 必填
pub async fn replace_bookmark(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    body: web::Json<BookmarkBody>,
    bookmarks: web::Data<Arc<BookmarkService>>,
) -> HttpResponse {
    let body = body.into_inner();
    if body.url.is_none() {
        return error_response(&ShortmarkError::validation("Enter a valid url"));
    }
    update(user, path.into_inner(), body, &bookmarks).await
}

/// PATCH /bookmarks/{id}：字段均可省略
pub async fn patch_bookmark(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    body: web::Json<BookmarkBody>,
    bookmarks: web::Data<Arc<BookmarkService>>,
) -> HttpResponse {
    update(user, path.into_inner(), body.into_inner(), &bookmarks).await
}

async fn update(
    user: AuthenticatedUser,
    id: i32,
    body: BookmarkBody,
    bookmarks: &BookmarkService,
) -> HttpResponse {
    let req = UpdateBookmarkRequest {
        url: body.url,
        body: body.body,
    };
    let result = bookmarks
        .update(user.id(), id, req)
        .await
        .map(BookmarkResponse::from);
    api_result(StatusCode::OK, result)
}

/// DELETE /bookmarks/{id} → 204
pub async fn delete_bookmark(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    bookmarks: web::Data<Arc<BookmarkService>>,
) -> HttpResponse {
    match bookmarks.delete(user.id(), path.into_inner()).await {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}
