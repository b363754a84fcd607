//! Server mode
//!
//! Builds the shared services, configures the actix-web app and serves until
//! the server stops or Ctrl+C is received.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::configure_routes;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: configuration and logging must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup()
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let user_service = startup.user_service.clone();
    let auth_service = startup.auth_service.clone();
    let bookmark_service = startup.bookmark_service.clone();

    let config = crate::config::get_config();
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} worker threads", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(bookmark_service.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Starting server at http://{}", bind_address);

    tokio::select! {
        res = server => {
            res.context("HTTP server error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(startup.storage.clone()) => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}
