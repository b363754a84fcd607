//! Authentication service
//!
//! Login issues an access/refresh token pair; every protected request is
//! authenticated statelessly from its bearer access token.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::user_service::UserService;
use crate::api::jwt::JwtService;
use crate::errors::{Result, ShortmarkError};
use crate::utils::password::verify_password;

#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub access: String,
    pub refresh: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

pub struct AuthService {
    users: Arc<UserService>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Login failed: unknown account");
            return Err(ShortmarkError::wrong_credentials());
        };

        let matches = verify_password(password, &user.password).unwrap_or_else(|e| {
            error!("Stored password hash for user {} is unreadable: {}", user.id, e);
            false
        });
        if !matches {
            warn!("Login failed for user {}", user.id);
            return Err(ShortmarkError::wrong_credentials());
        }

        let access = self.issue_access(user.id)?;
        let refresh = self
            .jwt
            .generate_refresh_token(user.id)
            .inspect_err(|e| error!("Failed to sign refresh token: {}", e))?;

        info!("User {} logged in", user.id);
        Ok(LoginResult {
            access,
            refresh,
            username: user.username,
            email: user.email,
        })
    }

    /// Resolve a bearer access token to the user id it was issued for
    pub fn authenticate(&self, token: &str) -> Result<i32> {
        self.jwt
            .validate_access_token(token)
            .and_then(|claims| claims.user_id())
            .map_err(|e| {
                warn!("Rejected access token: {}", e);
                ShortmarkError::unauthorized("Invalid or expired token")
            })
    }

    pub async fn current_user_profile(&self, user_id: i32) -> Result<UserProfile> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ShortmarkError::unauthorized("User no longer exists"))?;

        Ok(UserProfile {
            username: user.username,
            email: user.email,
        })
    }

    /// Exchange a refresh token for a new access token for the same user
    pub async fn refresh(&self, refresh_token: &str) -> Result<String> {
        let user_id = self
            .jwt
            .validate_refresh_token(refresh_token)
            .and_then(|claims| claims.user_id())
            .map_err(|e| {
                warn!("Rejected refresh token: {}", e);
                ShortmarkError::unauthorized("Invalid or expired refresh token")
            })?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ShortmarkError::unauthorized("User no longer exists"));
        }

        self.issue_access(user_id)
    }

    fn issue_access(&self, user_id: i32) -> Result<String> {
        self.jwt
            .generate_access_token(user_id)
            .inspect_err(|e| error!("Failed to sign access token: {}", e))
    }
}
