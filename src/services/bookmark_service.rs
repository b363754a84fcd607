//! Bookmark management service
//!
//! Every operation except `resolve` is scoped to the calling user: the owner id
//! is part of the store predicate, so another user's bookmark is reported as
//! not found.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::short_code::ShortCodeAllocator;
use crate::config::PaginationConfig;
use crate::errors::{Result, ShortmarkError};
use crate::storage::{Bookmark, BookmarkChanges, NewBookmark, SeaOrmStorage};
use crate::utils::url_validator::{validate_url, validation_error_message};

/// Conflict message for a url held by another bookmark
pub const DUPLICATE_URL_MESSAGE: &str = "Bookmark with this url already exists";

/// Pagination metadata returned alongside a page of bookmarks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub pages: u64,
    pub total_count: u64,
    pub per_page: u64,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageMeta {
    pub fn new(page: u64, per_page: u64, total_count: u64) -> Self {
        let pages = total_count.div_ceil(per_page);
        let has_prev = page > 1;
        let has_next = page < pages;
        Self {
            page,
            pages,
            total_count,
            per_page,
            prev_page: has_prev.then(|| page - 1),
            next_page: has_next.then(|| page + 1),
            has_prev,
            has_next,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookmarkList {
    pub items: Vec<Bookmark>,
    pub meta: PageMeta,
}

/// Normalize raw `page`/`per_page` query values.
///
/// `page < 1` becomes 1; `per_page` is clamped into `[1, max_per_page]`.
/// `page` is capped so the row offset `(page - 1) * per_page` fits in an i64.
pub fn clamp_pagination(
    page: Option<i64>,
    per_page: Option<i64>,
    config: &PaginationConfig,
) -> (u64, u64) {
    let max = config.max_per_page.max(1);
    let per_page = per_page
        .map(|p| p.max(1) as u64)
        .unwrap_or(config.default_per_page)
        .clamp(1, max);
    let max_page = i64::MAX as u64 / per_page;
    let page = (page.unwrap_or(1).max(1) as u64).min(max_page);
    (page, per_page)
}

/// Partial update of a bookmark; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateBookmarkRequest {
    pub url: Option<String>,
    pub body: Option<String>,
}

fn checked_url(url: &str) -> Result<String> {
    validate_url(url).map_err(|e| {
        debug!("Rejected bookmark url: {}", e);
        ShortmarkError::validation(validation_error_message(&e))
    })?;
    Ok(url.trim().to_string())
}

pub struct BookmarkService {
    storage: Arc<SeaOrmStorage>,
    allocator: ShortCodeAllocator,
    pagination: PaginationConfig,
}

impl BookmarkService {
    pub fn new(storage: Arc<SeaOrmStorage>, pagination: PaginationConfig) -> Self {
        let allocator = ShortCodeAllocator::new(storage.clone());
        Self::with_allocator(storage, allocator, pagination)
    }

    pub fn with_allocator(
        storage: Arc<SeaOrmStorage>,
        allocator: ShortCodeAllocator,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            storage,
            allocator,
            pagination,
        }
    }

    /// Create a bookmark with a freshly allocated short code.
    ///
    /// A unique-index rejection at insert is resolved by looking at the url
    /// again: if it is now taken the caller gets a conflict, otherwise the
    /// short code lost a race and a new one is drawn.
    pub async fn create(&self, user_id: i32, url: &str, body: Option<String>) -> Result<Bookmark> {
        let url = checked_url(url)?;

        if self.storage.url_exists(&url, None).await? {
            return Err(ShortmarkError::conflict(DUPLICATE_URL_MESSAGE));
        }

        let body = body.unwrap_or_default();
        loop {
            let short_url = self.allocator.allocate().await?;
            let new = NewBookmark {
                user_id,
                url: url.clone(),
                body: body.clone(),
                short_url,
            };

            match self.storage.insert_bookmark(&new).await {
                Ok(bookmark) => return Ok(bookmark),
                Err(ShortmarkError::Conflict(_)) => {
                    if self.storage.url_exists(&url, None).await? {
                        return Err(ShortmarkError::conflict(DUPLICATE_URL_MESSAGE));
                    }
                    warn!(
                        "Short code {} was taken concurrently, allocating again",
                        new.short_url
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn list(
        &self,
        user_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<BookmarkList> {
        let (page, per_page) = clamp_pagination(page, per_page, &self.pagination);
        let result = self
            .storage
            .list_owned_bookmarks(user_id, page, per_page)
            .await?;

        Ok(BookmarkList {
            meta: PageMeta::new(page, per_page, result.total),
            items: result.items,
        })
    }

    pub async fn get(&self, user_id: i32, id: i32) -> Result<Bookmark> {
        self.storage
            .find_owned_bookmark(user_id, id)
            .await?
            .ok_or_else(|| ShortmarkError::not_found("Bookmark not found"))
    }

    pub async fn update(
        &self,
        user_id: i32,
        id: i32,
        req: UpdateBookmarkRequest,
    ) -> Result<Bookmark> {
        let url = req.url.as_deref().map(checked_url).transpose()?;

        if let Some(url) = url.as_deref()
            && self.storage.url_exists(url, Some(id)).await?
        {
            // 不存在或不属于调用者的书签优先报 404
            if self.storage.find_owned_bookmark(user_id, id).await?.is_none() {
                return Err(ShortmarkError::not_found("Bookmark not found"));
            }
            return Err(ShortmarkError::conflict(DUPLICATE_URL_MESSAGE));
        }

        let changes = BookmarkChanges {
            url,
            body: req.body,
        };
        self.storage
            .update_owned_bookmark(user_id, id, changes)
            .await?
            .ok_or_else(|| ShortmarkError::not_found("Bookmark not found"))
    }

    /// Returns the deleted bookmark id
    pub async fn delete(&self, user_id: i32, id: i32) -> Result<i32> {
        if self.storage.delete_owned_bookmark(user_id, id).await? {
            Ok(id)
        } else {
            Err(ShortmarkError::not_found("Bookmark not found"))
        }
    }

    /// Resolve a short code to its url, counting the visit
    pub async fn resolve(&self, short_url: &str) -> Result<String> {
        let url = self
            .storage
            .resolve_and_visit(short_url)
            .await?
            .ok_or_else(|| ShortmarkError::not_found("Not found"))?;
        info!("Redirecting {} -> {}", short_url, url);
        Ok(url)
    }
}
