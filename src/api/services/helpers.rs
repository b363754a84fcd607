//! 响应构建帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::errors::ShortmarkError;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("application/json; charset=utf-8")
        .json(data)
}

/// 从 ShortmarkError 构建 `{"error": ...}` 响应
///
/// 服务端错误只返回通用消息，详情写入日志
pub fn error_response(err: &ShortmarkError) -> HttpResponse {
    let status = err.http_status();
    let message = if err.is_client_error() {
        err.message().to_string()
    } else {
        error!("{} [{}]: {}", err.error_type(), err.code(), err.message());
        "Internal server error".to_string()
    };
    json_response(status, &json!({ "error": message }))
}

/// 统一 Result → HttpResponse 转换，成功时使用给定状态码
pub fn api_result<T: Serialize>(status: StatusCode, result: Result<T, ShortmarkError>) -> HttpResponse {
    match result {
        Ok(data) => json_response(status, &data),
        Err(e) => error_response(&e),
    }
}

fn bad_request(message: String) -> actix_web::Error {
    let response = json_response(StatusCode::BAD_REQUEST, &json!({ "error": message }));
    error::InternalError::from_response(message, response).into()
}

/// JSON body 解析失败 → 400 `{"error": ...}`
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(format!("Invalid JSON body: {}", err))
}

/// Query 参数解析失败 → 400
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(format!("Invalid query string: {}", err))
}

/// Path 参数解析失败 → 400
pub fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(format!("Invalid path parameter: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_client_error_keeps_message() {
        let resp = error_response(&ShortmarkError::conflict("Email is taken"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(resp).await["error"], "Email is taken");
    }

    #[actix_web::test]
    async fn test_internal_error_is_masked() {
        let resp = error_response(&ShortmarkError::database_operation("disk I/O error at 0x1f"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"], "Internal server error");
    }

    #[actix_web::test]
    async fn test_api_result_success_status() {
        let resp = api_result(StatusCode::CREATED, Ok(json!({"ok": true})));
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
