use actix_web::{HttpResponse, Responder};
use tracing::trace;

use super::types::{MessageResponse, ServiceInfo};

/// GET /api/v1/bookmarks/ping
pub async fn ping() -> impl Responder {
    trace!("Ping");
    HttpResponse::Ok().json(MessageResponse {
        message: "Pong! Bookmarks service is working.",
    })
}

/// GET /
pub async fn service_info() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
