use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Mint an HS256 access token for `user_id`. Login lives elsewhere; this is
/// used by the `issue-token` command.
pub fn create_access_token(user_id: Uuid, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        exp: (now + Duration::seconds(config.jwt_access_ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create access token: {}", e)))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, ttl: i64) -> Config {
        Config {
            database_url: String::new(),
            database_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: Vec::new(),
            jwt_secret: secret.into(),
            jwt_access_ttl_secs: ttl,
        }
    }

    #[test]
    fn test_token_round_trip_carries_subject() {
        let cfg = config("test-secret-test-secret-test-secret", 3600);
        let user = Uuid::new_v4();
        let token = create_access_token(user, &cfg).unwrap();
        let data = verify_token(&token, &cfg).unwrap();
        assert_eq!(data.claims.sub, user);
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = create_access_token(Uuid::new_v4(), &config("one-secret", 3600)).unwrap();
        let result = verify_token(&token, &config("another-secret", 3600));
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        // Well past the default 60s leeway.
        let cfg = config("expiry-secret", -3600);
        let token = create_access_token(Uuid::new_v4(), &cfg).unwrap();
        assert!(matches!(verify_token(&token, &cfg), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_garbage_token_is_unauthorized() {
        let cfg = config("whatever", 3600);
        assert!(matches!(verify_token("not.a.jwt", &cfg), Err(AppError::Unauthorized)));
    }
}
