use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::jwt::JwtService;
use crate::config::StaticConfig;
use crate::services::{AuthService, BookmarkService, UserService};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 服务器运行所需的共享组件
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub bookmark_service: Arc<BookmarkService>,
}

impl StartupContext {
    /// 在已连接的存储之上组装服务层
    pub fn from_storage(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        let jwt = Arc::new(JwtService::from_config(&config.api));
        let user_service = Arc::new(UserService::new(storage.clone()));
        let auth_service = Arc::new(AuthService::new(user_service.clone(), jwt));
        let bookmark_service = Arc::new(BookmarkService::new(
            storage.clone(),
            config.pagination.clone(),
        ));

        Self {
            storage,
            user_service,
            auth_service,
            bookmark_service,
        }
    }
}

/// 准备服务器启动的上下文：连接数据库、执行迁移、构建服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = crate::config::get_config();

    let storage = StorageFactory::create()
        .await
        .context("Failed to initialize storage")?;
    debug!("Storage backend: {}", storage.backend_name());

    let context = StartupContext::from_storage(storage, &config);

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
