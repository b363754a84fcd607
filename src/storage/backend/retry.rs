//! 数据库操作重试
//!
//! 连接获取失败、死锁、SQLite BUSY 等瞬时错误按指数退避重试；
//! 唯一索引冲突等业务错误立即返回给调用方。

use std::future::Future;
use std::ops::Deref;
use std::time::Duration;

use sea_orm::DbErr;
use sea_orm::error::RuntimeErr;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// 可重试的数据库错误码
///
/// MySQL: 1213 死锁, 1205 锁等待超时
/// PostgreSQL: 40001 序列化失败, 40P01 死锁
/// SQLite: 5 BUSY, 6 LOCKED
const RETRYABLE_CODES: &[&str] = &["1213", "1205", "40001", "40P01", "5", "6"];

/// 错误码不可用时按消息匹配
const RETRYABLE_MESSAGES: &[&str] = &[
    "deadlock",
    "lock wait timeout",
    "database is locked",
    "serialization failure",
];

pub fn is_retryable_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime_err) | DbErr::Query(runtime_err) => is_transient(runtime_err),
        _ => false,
    }
}

fn is_transient(err: &RuntimeErr) -> bool {
    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            if let Some(code) = sqlx_err
                .deref()
                .as_database_error()
                .and_then(|db_err| db_err.code())
            {
                return RETRYABLE_CODES.contains(&code.as_ref());
            }
            message_is_transient(&sqlx_err.to_string())
        }
        RuntimeErr::Internal(msg) => message_is_transient(msg),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

fn message_is_transient(msg: &str) -> bool {
    let msg = msg.to_lowercase();
    RETRYABLE_MESSAGES.iter().any(|pattern| msg.contains(pattern))
}

#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }
}

impl RetryConfig {
    /// 第 `attempt` 次重试前的等待时间：指数增长，封顶后加 0-25% 抖动
    fn backoff(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        let capped = exp.min(self.max_delay_ms);
        let jitter = rand::random_range(0..=capped / 4);
        Duration::from_millis(capped.saturating_add(jitter))
    }
}

/// 执行数据库操作，瞬时错误按退避策略重试
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("{} succeeded after {} retries", operation_name, attempt);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if !is_retryable_error(&err) || attempt >= config.max_retries {
            return Err(err);
        }

        attempt += 1;
        let delay = config.backoff(attempt);
        warn!(
            "{} failed (attempt {}/{}): {}; retrying in {:?}",
            operation_name,
            attempt,
            config.max_retries + 1,
            err,
            delay
        );
        sleep(delay).await;
    }
}
