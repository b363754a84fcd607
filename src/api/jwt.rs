use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ApiConfig;
use crate::errors::ShortmarkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims shared by access and refresh tokens; `sub` is the user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub token_type: TokenType,
}

impl Claims {
    /// User id bound to the token
    pub fn user_id(&self) -> Result<i32, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::from(ErrorKind::InvalidSubject))
    }
}

/// Issues and verifies HS256 tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_minutes: u64,
    refresh_token_days: u64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_minutes: u64, refresh_token_days: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_minutes,
            refresh_token_days,
        }
    }

    /// Build from `[api]` config. An empty secret is replaced by a random one,
    /// which invalidates all tokens on restart.
    pub fn from_config(config: &ApiConfig) -> Self {
        let secret = if config.jwt_secret.is_empty() {
            warn!("api.jwt_secret is empty, generating a random secret for this process");
            crate::utils::generate_random_code(64)
        } else {
            config.jwt_secret.clone()
        };

        Self::new(
            &secret,
            config.access_token_minutes,
            config.refresh_token_days,
        )
    }

    /// Signing fails with `TokenCreation` when the configured lifetime
    /// pushes `exp` past what chrono can represent.
    fn issue(&self, user_id: i32, token_type: TokenType) -> crate::errors::Result<String> {
        let now = Utc::now();
        let lifetime = match token_type {
            TokenType::Access => i64::try_from(self.access_token_minutes)
                .ok()
                .and_then(Duration::try_minutes),
            TokenType::Refresh => i64::try_from(self.refresh_token_days)
                .ok()
                .and_then(Duration::try_days),
        };
        let exp = lifetime
            .and_then(|d| now.checked_add_signed(d))
            .ok_or_else(|| {
                ShortmarkError::token_creation(format!("{:?} token lifetime is out of range", token_type))
            })?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ShortmarkError::token_creation(e.to_string()))
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.token_type != expected {
            return Err(JwtError::from(ErrorKind::InvalidToken));
        }

        Ok(token_data.claims)
    }

    /// Access token, lifetime `access_token_minutes`
    pub fn generate_access_token(&self, user_id: i32) -> crate::errors::Result<String> {
        self.issue(user_id, TokenType::Access)
    }

    /// Refresh token, lifetime `refresh_token_days`
    pub fn generate_refresh_token(&self, user_id: i32) -> crate::errors::Result<String> {
        self.issue(user_id, TokenType::Refresh)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify(token, TokenType::Access)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify(token, TokenType::Refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_32_bytes_long!!";

    fn create_test_service() -> JwtService {
        JwtService::new(SECRET, 15, 7)
    }

    #[test]
    fn test_access_token_carries_user_id() {
        let service = create_test_service();
        let token = service.generate_access_token(42).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_refresh_token_lifetime() {
        let service = create_test_service();
        let token = service.generate_refresh_token(7).unwrap();
        let claims = service.validate_refresh_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), 7);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let service = create_test_service();
        let access = service.generate_access_token(1).unwrap();
        let refresh = service.generate_refresh_token(1).unwrap();

        assert!(service.validate_refresh_token(&access).is_err());
        assert!(service.validate_access_token(&refresh).is_err());
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let service = create_test_service();
        let a = service.generate_access_token(1).unwrap();
        let b = service.generate_access_token(1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_and_foreign_tokens_rejected() {
        let service = create_test_service();
        assert!(service.validate_access_token("invalid.token.here").is_err());

        let other = JwtService::new("different_secret_key_32_bytes!!", 15, 7);
        let token = other.generate_access_token(1).unwrap();
        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        let now = Utc::now();
        let claims = Claims {
            sub: "1".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: TokenType::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_out_of_range_lifetime_is_token_error() {
        let huge_access = JwtService::new(SECRET, u64::MAX, 7);
        assert!(matches!(
            huge_access.generate_access_token(1),
            Err(ShortmarkError::TokenCreation(_))
        ));
        // the other token type is unaffected
        assert!(huge_access.generate_refresh_token(1).is_ok());

        // fits in i64 but overflows chrono's date range
        let huge_refresh = JwtService::new(SECRET, 15, 1_000_000_000_000);
        assert!(matches!(
            huge_refresh.generate_refresh_token(1),
            Err(ShortmarkError::TokenCreation(_))
        ));
        assert!(huge_refresh.generate_access_token(1).is_ok());
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let claims = Claims {
            sub: "admin".to_string(),
            iat: 0,
            exp: 0,
            jti: String::new(),
            token_type: TokenType::Access,
        };
        assert!(claims.user_id().is_err());
    }

    #[test]
    fn test_from_config_with_empty_secret() {
        let config = ApiConfig::default();
        let service = JwtService::from_config(&config);
        let token = service.generate_access_token(3).unwrap();
        assert_eq!(
            service
                .validate_access_token(&token)
                .unwrap()
                .user_id()
                .unwrap(),
            3
        );
    }
}
