use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::storage::SeaOrmStorage;

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// 等待 Ctrl+C，然后关闭数据库连接池
pub async fn listen_for_shutdown(storage: Arc<SeaOrmStorage>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    if timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), storage.close())
        .await
        .is_err()
    {
        error!(
            "Closing the database pool timed out after {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        );
    }
}
