use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, web};
use tracing::trace;

use super::helpers::error_response;
use crate::errors::ShortmarkError;
use crate::services::{BookmarkService, SHORT_CODE_LENGTH};
use crate::utils::is_valid_short_code;

/// GET /{short_url} → 302 到书签 url，visits + 1
pub async fn redirect(
    path: web::Path<String>,
    bookmarks: web::Data<Arc<BookmarkService>>,
) -> HttpResponse {
    let code = path.into_inner();
    if !is_valid_short_code(&code, SHORT_CODE_LENGTH) {
        trace!("Invalid short code rejected: {}", code);
        return error_response(&ShortmarkError::not_found("Not found"));
    }

    match bookmarks.resolve(&code).await {
        Ok(url) => HttpResponse::Found().insert_header((LOCATION, url)).finish(),
        Err(e) => error_response(&e),
    }
}
