//! 路由配置
//!
//! - `/`：服务信息
//! - `/api/v1/auth/*`、`/api/v1/bookmarks/*`：JSON API
//! - `/{short_url}`：3 位短码跳转

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web;

use super::auth::{login, me, refresh_token, register};
use super::bookmarks::{
    create_bookmark, delete_bookmark, get_bookmark, list_bookmarks, patch_bookmark,
    replace_bookmark,
};
use super::health::{ping, service_info};
use super::helpers::{json_error_handler, path_error_handler, query_error_handler};
use super::redirect::redirect;
use crate::api::middleware::BearerAuth;

/// 认证路由 `/auth`
///
/// - POST /auth/register
/// - POST /auth/login
/// - POST /auth/token/refresh（Bearer refresh token）
/// - GET /auth/me（Bearer access token）
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/token/refresh", web::post().to(refresh_token))
        .service(web::resource("/me").wrap(BearerAuth).route(web::get().to(me)))
}

/// 书签路由 `/bookmarks`，`/bookmarks` 与 `/bookmarks/` 等价
pub fn bookmark_routes() -> actix_web::Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    web::scope("/bookmarks")
        .wrap(BearerAuth)
        .route("", web::get().to(list_bookmarks))
        .route("", web::post().to(create_bookmark))
        .route("/", web::get().to(list_bookmarks))
        .route("/", web::post().to(create_bookmark))
        .route("/{id}", web::get().to(get_bookmark))
        .route("/{id}", web::put().to(replace_bookmark))
        .route("/{id}", web::patch().to(patch_bookmark))
        .route("/{id}", web::delete().to(delete_bookmark))
}

pub fn api_v1_routes() -> actix_web::Scope {
    web::scope("/api/v1")
        .service(auth_routes())
        // ping 不需要认证，必须注册在 /bookmarks scope 之前
        .service(web::resource("/bookmarks/ping").route(web::get().to(ping)))
        .service(bookmark_routes())
}

/// 注册全部路由与提取器错误处理
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/", web::get().to(service_info))
        .service(api_v1_routes())
        .service(web::resource("/{short_url:[0-9a-zA-Z]{3}}").route(web::get().to(redirect)));
}
