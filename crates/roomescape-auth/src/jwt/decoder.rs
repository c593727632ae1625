//! Login token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use roomescape_core::config::AuthConfig;
use roomescape_core::error::AppError;

use super::claims::Claims;

/// Validates login tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a login token (signature and expiry).
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Login token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid login token signature")
                }
                _ => AppError::authentication(format!("Invalid login token: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use roomescape_core::error::ErrorKind;
    use roomescape_entity::member::{Member, MemberRole};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issued_token_decodes_to_member() {
        let member = Member::new("kim", "kim@example.com", "hash", MemberRole::Admin);
        let token = JwtEncoder::new(&config("s3cret"))
            .generate_token(&member)
            .unwrap();

        let claims = JwtDecoder::new(&config("s3cret")).decode_token(&token).unwrap();
        assert_eq!(claims.member_id(), member.id);
        assert_eq!(claims.role, MemberRole::Admin);
        assert_eq!(claims.name, "kim");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let member = Member::new("kim", "kim@example.com", "hash", MemberRole::User);
        let token = JwtEncoder::new(&config("one")).generate_token(&member).unwrap();

        let err = JwtDecoder::new(&config("two")).decode_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_malformed_token_rejected() {
        let err = JwtDecoder::new(&config("s3cret"))
            .decode_token("invalid token")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
