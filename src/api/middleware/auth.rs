//! Bearer 认证中间件
//!
//! 校验 `Authorization: Bearer <access token>`，通过后把调用者身份
//! 以 [`AuthenticatedUser`] 写入 request extensions。

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    web,
};
use futures_util::future::LocalBoxFuture;
use tracing::{error, trace};

use crate::api::services::helpers::error_response;
use crate::errors::ShortmarkError;
use crate::services::AuthService;

/// 已认证的调用者（access token 中的 user id）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i32);

impl AuthenticatedUser {
    pub fn id(&self) -> i32 {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // 只有挂了 BearerAuth 的路由才会有该扩展
        let user = req.extensions().get::<AuthenticatedUser>().copied();
        ready(user.ok_or_else(|| {
            actix_web::error::InternalError::from_response(
                "missing authenticated user",
                error_response(&ShortmarkError::unauthorized("Missing bearer token")),
            )
            .into()
        }))
    }
}

/// 从 Authorization header 提取 Bearer token
pub fn extract_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[derive(Clone, Default)]
pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn reject(req: ServiceRequest, err: &ShortmarkError) -> ServiceResponse<EitherBody<B>> {
        req.into_response(error_response(err).map_into_right_body())
    }
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let Some(auth) = req.app_data::<web::Data<Arc<AuthService>>>().cloned() else {
                error!("AuthService is not registered as app data");
                return Ok(Self::reject(
                    req,
                    &ShortmarkError::unauthorized("Authentication is not available"),
                ));
            };

            let token = extract_bearer_token(req.request()).map(str::to_owned);
            let Some(token) = token else {
                trace!("Request without bearer token");
                return Ok(Self::reject(
                    req,
                    &ShortmarkError::unauthorized("Missing bearer token"),
                ));
            };

            match auth.authenticate(&token) {
                Ok(user_id) => {
                    trace!("Authenticated user {}", user_id);
                    req.extensions_mut().insert(AuthenticatedUser(user_id));
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                Err(e) => Ok(Self::reject(req, &e)),
            }
        })
    }
}
