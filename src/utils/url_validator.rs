//! URL 验证模块
//!
//! 书签 URL 必须是可解析的 http/https 地址

use url::Url;

/// 书签 URL 最大长度（与 bookmarks.url 列宽一致）
pub const MAX_URL_LENGTH: usize = 768;

/// URL 验证错误
#[derive(Debug)]
pub enum UrlValidationError {
    EmptyUrl,
    TooLong(usize),
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::TooLong(len) => write!(
                f,
                "URL is {} characters long, the maximum is {}",
                len, MAX_URL_LENGTH
            ),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::DangerousProtocol(proto) => {
                write!(f, "Dangerous protocol blocked: {}", proto)
            }
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 危险协议列表
const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// 验证 URL
///
/// 检查项目：
/// 1. URL 不为空且不超长
/// 2. 不是危险协议（javascript:, data:, file: 等）
/// 3. 必须是 http:// 或 https://
/// 4. URL 格式有效且带 host
pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let len = url.chars().count();
    if len > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong(len));
    }

    let url_lower = url.to_lowercase();

    // 检查危险协议
    for proto in DANGEROUS_PROTOCOLS {
        if url_lower.starts_with(proto) {
            return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
        }
    }

    // 检查协议
    if !url_lower.starts_with("http://") && !url_lower.starts_with("https://") {
        let proto = match url_lower.split_once(':') {
            Some((scheme, _)) => format!("{}:", scheme),
            None => "none".to_string(),
        };
        return Err(UrlValidationError::InvalidProtocol(proto));
    }

    // 解析 URL 验证格式
    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
    if parsed.host_str().is_none_or(|h| h.is_empty()) {
        return Err(UrlValidationError::InvalidFormat("missing host".to_string()));
    }

    Ok(())
}

/// 获取 URL 验证错误的用户友好消息
pub fn validation_error_message(error: &UrlValidationError) -> &'static str {
    match error {
        UrlValidationError::EmptyUrl => "URL cannot be empty",
        UrlValidationError::TooLong(_) => "URL is too long",
        UrlValidationError::InvalidProtocol(_) => "URL must start with http:// or https://",
        UrlValidationError::DangerousProtocol(_) => "This URL protocol is not allowed",
        UrlValidationError::InvalidFormat(_) => "Enter a valid url",
    }
}
