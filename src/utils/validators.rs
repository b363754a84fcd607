//! 注册字段校验

use validator::ValidateEmail;

/// 用户名长度范围
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 80;
/// 密码最短长度
pub const PASSWORD_MIN_LEN: usize = 6;
/// 邮箱最大长度（与 users.email 列宽一致）
pub const EMAIL_MAX_LEN: usize = 255;

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err("Password must contain at least 6 characters");
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err("Username must be between 3 and 80 characters long");
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Username can contain only letters and numbers");
    }
    Ok(())
}

/// 邮箱语法校验（HTML5 规则），不做投递检查
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > EMAIL_MAX_LEN || !email.validate_email() {
        return Err("Enter a valid email address");
    }
    Ok(())
}
