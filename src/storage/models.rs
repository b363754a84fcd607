use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 注册用户（password 为 Argon2id PHC 字符串）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i32,
    pub url: String,
    pub short_url: String,
    pub body: String,
    pub visits: i64,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 待插入的书签（short_url 已由分配器生成）
#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub user_id: i32,
    pub url: String,
    pub body: String,
    pub short_url: String,
}

/// 待插入的用户
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// 一页书签及总数
#[derive(Debug, Clone)]
pub struct BookmarkPage {
    pub items: Vec<Bookmark>,
    pub total: u64,
}
