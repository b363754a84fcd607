use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum ShortmarkError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    Conflict(String),
    NotFound(String),
    WrongCredentials(String),
    Unauthorized(String),
    PasswordHash(String),
    TokenCreation(String),
}

impl ShortmarkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortmarkError::DatabaseConfig(_) => "E001",
            ShortmarkError::DatabaseConnection(_) => "E002",
            ShortmarkError::DatabaseOperation(_) => "E003",
            ShortmarkError::FileOperation(_) => "E004",
            ShortmarkError::Validation(_) => "E005",
            ShortmarkError::Conflict(_) => "E006",
            ShortmarkError::NotFound(_) => "E007",
            ShortmarkError::WrongCredentials(_) => "E008",
            ShortmarkError::Unauthorized(_) => "E009",
            ShortmarkError::PasswordHash(_) => "E010",
            ShortmarkError::TokenCreation(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortmarkError::DatabaseConfig(_) => "Database Configuration Error",
            ShortmarkError::DatabaseConnection(_) => "Database Connection Error",
            ShortmarkError::DatabaseOperation(_) => "Database Operation Error",
            ShortmarkError::FileOperation(_) => "File Operation Error",
            ShortmarkError::Validation(_) => "Validation Error",
            ShortmarkError::Conflict(_) => "Conflict",
            ShortmarkError::NotFound(_) => "Resource Not Found",
            ShortmarkError::WrongCredentials(_) => "Wrong Credentials",
            ShortmarkError::Unauthorized(_) => "Unauthorized",
            ShortmarkError::PasswordHash(_) => "Password Hash Error",
            ShortmarkError::TokenCreation(_) => "Token Creation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortmarkError::DatabaseConfig(msg)
            | ShortmarkError::DatabaseConnection(msg)
            | ShortmarkError::DatabaseOperation(msg)
            | ShortmarkError::FileOperation(msg)
            | ShortmarkError::Validation(msg)
            | ShortmarkError::Conflict(msg)
            | ShortmarkError::NotFound(msg)
            | ShortmarkError::WrongCredentials(msg)
            | ShortmarkError::Unauthorized(msg)
            | ShortmarkError::PasswordHash(msg)
            | ShortmarkError::TokenCreation(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            ShortmarkError::Validation(_) | ShortmarkError::WrongCredentials(_) => {
                StatusCode::BAD_REQUEST
            }
            ShortmarkError::Conflict(_) => StatusCode::CONFLICT,
            ShortmarkError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortmarkError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the message can be shown to API callers as-is.
    ///
    /// Internal failures carry driver/library detail that stays in the logs.
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于启动失败）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortmarkError {}

// 便捷的构造函数
impl ShortmarkError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::Validation(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::Conflict(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::NotFound(msg.into())
    }

    /// 登录失败：不区分用户不存在与密码错误
    pub fn wrong_credentials() -> Self {
        ShortmarkError::WrongCredentials("Wrong credentials".to_string())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::Unauthorized(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::PasswordHash(msg.into())
    }

    pub fn token_creation<T: Into<String>>(msg: T) -> Self {
        ShortmarkError::TokenCreation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ShortmarkError {
    fn from(err: sea_orm::DbErr) -> Self {
        ShortmarkError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ShortmarkError {
    fn from(err: std::io::Error) -> Self {
        ShortmarkError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortmarkError>;
