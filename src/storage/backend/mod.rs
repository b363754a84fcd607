//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod bookmarks;
mod connection;
mod converters;
pub mod retry;
mod users;

use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::{info, warn};

use crate::errors::{Result, ShortmarkError};

pub use bookmarks::BookmarkChanges;
pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ShortmarkError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported schemes: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 唯一索引冲突（username / email / url / short_url）
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// SeaORM-based storage backend
///
/// 持有连接池；每次操作只在单条语句期间占用一个连接
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// 重试配置
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ShortmarkError::database_config("database_url is empty"));
        }

        // 读取重试配置
        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig::from(&config.database);

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        // 运行迁移
        run_migrations(&storage.db).await?;

        info!(
            "{} storage initialized",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 关闭连接池（优雅关闭时调用）
    pub async fn close(&self) {
        if let Err(e) = self.db.clone().close().await {
            warn!("Failed to close database pool: {}", e);
        } else {
            info!("Database pool closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(
            infer_backend_from_url("sqlite://data.db?mode=rwc").unwrap(),
            "sqlite"
        );
        assert_eq!(infer_backend_from_url("bookmarks.sqlite").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mariadb://root@localhost/db").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://u:p@localhost/db").unwrap(),
            "postgres"
        );
    }

    #[test]
    fn test_infer_backend_rejects_unknown_scheme() {
        let err = infer_backend_from_url("redis://localhost").unwrap_err();
        assert!(matches!(err, ShortmarkError::DatabaseConfig(_)));
    }

    #[test]
    fn test_is_unique_violation_ignores_other_errors() {
        assert!(!is_unique_violation(&DbErr::RecordNotFound("x".into())));
        assert!(!is_unique_violation(&DbErr::Custom("x".into())));
    }
}
