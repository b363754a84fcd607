//! API 请求 / 响应类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::{BookmarkList, PageMeta, UserProfile};
use crate::storage::{Bookmark, User};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserProfile,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse<T: Serialize> {
    pub user: T,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// POST /bookmarks 与 PUT /bookmarks/{id} 的 body
#[derive(Debug, Deserialize)]
pub struct BookmarkBody {
    pub url: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub id: i32,
    pub url: String,
    pub short_url: String,
    pub visits: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            id: bookmark.id,
            url: bookmark.url,
            short_url: bookmark.short_url,
            visits: bookmark.visits,
            body: bookmark.body,
            created_at: bookmark.created_at,
            updated_at: bookmark.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookmarkListResponse {
    pub data: Vec<BookmarkResponse>,
    pub meta: PageMeta,
}

impl From<BookmarkList> for BookmarkListResponse {
    fn from(list: BookmarkList) -> Self {
        Self {
            data: list.items.into_iter().map(BookmarkResponse::from).collect(),
            meta: list.meta,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_response_shape() {
        let bookmark = Bookmark {
            id: 1,
            url: "https://example.com".to_string(),
            short_url: "x7Q".to_string(),
            body: "note".to_string(),
            visits: 0,
            user_id: 9,
            created_at: Utc::now(),
            updated_at: None,
        };

        let value = serde_json::to_value(BookmarkResponse::from(bookmark)).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["body", "created_at", "id", "short_url", "updated_at", "url", "visits"]
        );
        assert!(obj["updated_at"].is_null());
        assert!(!obj.contains_key("user_id"));
    }

    #[test]
    fn test_list_response_meta_nulls() {
        let list = BookmarkList {
            items: Vec::new(),
            meta: PageMeta::new(1, 5, 0),
        };
        let value = serde_json::to_value(BookmarkListResponse::from(list)).unwrap();
        assert!(value["data"].as_array().unwrap().is_empty());
        assert!(value["meta"]["prev_page"].is_null());
        assert!(value["meta"]["next_page"].is_null());
        assert_eq!(value["meta"]["total_count"], 0);
    }
}
