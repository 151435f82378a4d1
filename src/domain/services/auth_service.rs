use crate::config::Config;
use crate::domain::models::auth::Claims;
use crate::error::AppError;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

const TOKEN_TTL_MINUTES: i64 = 60;

/// Issues and verifies the bearer tokens the API trusts. Tokens carry
/// `{userId, isArtist, artistId?}`; an artist registration issues a fresh
/// token so the artist flag takes effect immediately.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    pub fn issue(&self, user_id: &str, artist_id: Option<&str>) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            is_artist: artist_id.is_some(),
            artist_id: artist_id.map(str::to_string),
            exp: (now + Duration::minutes(TOKEN_TTL_MINUTES)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Forbidden("Invalid token".into()))
    }
}

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| AppError::Internal)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AppError::Internal)?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".into(),
            port: 0,
            jwt_secret: "test-secret".into(),
            stripe_secret_key: "sk_test".into(),
            checkout_success_url: "http://localhost/success".into(),
            checkout_cancel_url: "http://localhost/cancel".into(),
        }
    }

    #[test]
    fn issued_tokens_verify_and_carry_identity() {
        let service = AuthService::new(&test_config());

        let token = service.issue("user-1", None).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert!(!claims.is_artist);
        assert!(claims.artist_id.is_none());

        let token = service.issue("user-2", Some("artist-9")).unwrap();
        let claims = service.verify(&token).unwrap();
        assert!(claims.is_artist);
        assert_eq!(claims.artist_id.as_deref(), Some("artist-9"));
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let service = AuthService::new(&test_config());
        let token = service.issue("user-1", None).unwrap();
        assert!(service.verify(&format!("{}x", token)).is_err());
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }
}
