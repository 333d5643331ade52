use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Role};

/// JWT claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — user ID (UUID string)
    pub sub: String,
    /// User role at issue time
    pub role: Role,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Service for issuing and verifying HS256 bearer tokens.
///
/// Tokens encode `{userId, role}` with a 24-hour expiry; everything else is
/// looked up from the database per request.
pub struct TokenService {
    config: AuthConfig,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Token lifetime in seconds, for `expires_in` response fields.
    pub fn expires_in_secs(&self) -> i64 {
        self.config.token_ttl.as_secs() as i64
    }

    /// Issue a signed token for the given user.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now,
            exp: now + self.expires_in_secs(),
        };

        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a token's signature and expiry and decode the caller identity.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::Unauthorized("Token expired".to_string())
            }
            _ => AppError::Unauthorized("Invalid token".to_string()),
        })?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(ttl: Duration) -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-test-secret-test-secret!".to_string(),
            token_ttl: ttl,
            otp_ttl: Duration::from_secs(600),
            reset_token_ttl: Duration::from_secs(3600),
        }
    }

    #[test]
    fn issue_then_verify_round_trip() {
        let service = TokenService::new(test_config(Duration::from_secs(3600)));
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, Role::AgencyStaff).unwrap();
        let user = service.verify(&token).unwrap();

        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, Role::AgencyStaff);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = TokenService::new(test_config(Duration::from_secs(3600)));
        assert!(service.verify("not.a.token").is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuing = TokenService::new(AuthConfig {
            jwt_secret: "another-secret-another-secret-another!".to_string(),
            ..test_config(Duration::from_secs(3600))
        });
        let verifying = TokenService::new(test_config(Duration::from_secs(3600)));

        let token = issuing.issue(Uuid::new_v4(), Role::Citizen).unwrap();
        assert!(verifying.verify(&token).is_err());
    }

    #[test]
    fn expired_token_reports_expiry() {
        // Issued already expired (negative lifetime is not representable,
        // so issue with zero TTL and rely on jsonwebtoken's default leeway
        // being overridden).
        let service = TokenService::new(test_config(Duration::from_secs(0)));
        let token = service.issue(Uuid::new_v4(), Role::Citizen).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let result = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test-secret-test-secret-test-secret!".as_bytes()),
            &validation,
        );
        assert!(matches!(
            result.unwrap_err().kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }
}
