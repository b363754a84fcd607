//! User account service

use std::sync::Arc;

use tracing::{error, info};

use crate::errors::{Result, ShortmarkError};
use crate::storage::{NewUser, SeaOrmStorage, User};
use crate::utils::password::hash_password;
use crate::utils::validators::{validate_email, validate_password, validate_username};

pub const EMAIL_TAKEN_MESSAGE: &str = "Email is taken";
pub const USERNAME_TAKEN_MESSAGE: &str = "Username is taken";

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct UserService {
    storage: Arc<SeaOrmStorage>,
}

impl UserService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Register a new account.
    ///
    /// Input is checked in a fixed order (password, username length, username
    /// charset, email) and the first failure is reported.
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        let username = req.username.trim();
        let email = req.email.trim();

        validate_password(&req.password).map_err(ShortmarkError::validation)?;
        validate_username(username).map_err(ShortmarkError::validation)?;
        validate_email(email).map_err(ShortmarkError::validation)?;

        self.ensure_available(username, email).await?;

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!("Failed to hash password: {}", e);
            ShortmarkError::password_hash(e.to_string())
        })?;

        let new = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        };

        match self.storage.insert_user(&new).await {
            Ok(user) => {
                info!("Registered user {} (id={})", user.username, user.id);
                Ok(user)
            }
            // 并发注册输掉唯一索引竞争：重新检查以给出具体字段
            Err(ShortmarkError::Conflict(msg)) => {
                self.ensure_available(username, email).await?;
                Err(ShortmarkError::Conflict(msg))
            }
            Err(e) => Err(e),
        }
    }

    async fn ensure_available(&self, username: &str, email: &str) -> Result<()> {
        if self.storage.find_user_by_email(email).await?.is_some() {
            return Err(ShortmarkError::conflict(EMAIL_TAKEN_MESSAGE));
        }
        if self.storage.find_user_by_username(username).await?.is_some() {
            return Err(ShortmarkError::conflict(USERNAME_TAKEN_MESSAGE));
        }
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.storage.find_user_by_email(email.trim()).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        self.storage.find_user_by_id(id).await
    }
}
