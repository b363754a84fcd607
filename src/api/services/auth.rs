//! `/api/v1/auth` 处理器

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{info, trace};

use super::helpers::{api_result, error_response};
use super::types::{LoginBody, LoginResponse, RefreshResponse, RegisterBody, RegisterResponse};
use crate::api::middleware::{AuthenticatedUser, extract_bearer_token};
use crate::errors::ShortmarkError;
use crate::services::{AuthService, RegisterRequest, UserService};

/// POST /auth/register
pub async fn register(
    body: web::Json<RegisterBody>,
    users: web::Data<Arc<UserService>>,
) -> impl Responder {
    let body = body.into_inner();
    trace!("Register request for username {:?}", body.username);

    let result = users
        .register(RegisterRequest {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await
        .map(|user| {
            info!("User registered: {}", user.username);
            RegisterResponse {
                message: "User created",
                user: user.into(),
            }
        });

    api_result(StatusCode::CREATED, result)
}

/// POST /auth/login
pub async fn login(body: web::Json<LoginBody>, auth: web::Data<Arc<AuthService>>) -> impl Responder {
    let result = auth
        .login(&body.email, &body.password)
        .await
        .map(|user| LoginResponse { user });
    api_result(StatusCode::OK, result)
}

/// POST /auth/token/refresh，Bearer 中携带 refresh token
pub async fn refresh_token(req: HttpRequest, auth: web::Data<Arc<AuthService>>) -> HttpResponse {
    let Some(token) = extract_bearer_token(&req) else {
        return error_response(&ShortmarkError::unauthorized("Missing bearer token"));
    };

    let result = auth
        .refresh(token)
        .await
        .map(|access| RefreshResponse { access });
    api_result(StatusCode::OK, result)
}

/// GET /auth/me
pub async fn me(user: AuthenticatedUser, auth: web::Data<Arc<AuthService>>) -> impl Responder {
    api_result(StatusCode::OK, auth.current_user_profile(user.id()).await)
}
