use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::InvalidToken;
use super::errors::JwtError;
use crate::secret::Secret;

/// Session lifetime used when none is configured (7 days).
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 7 * 24;

/// Outcome of checking a presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerification {
    Valid(SessionClaims),
    Invalid(InvalidToken),
}

/// Issues and verifies signed session tokens.
///
/// Uses HS256 (HMAC with SHA-256). Tokens are self-contained: validity is
/// decided by signature and expiry alone, there is no revocation list.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a handler signing with `secret`, issuing tokens valid for 7 days.
    ///
    /// # Arguments
    /// * `secret` - Non-empty signing key
    pub fn new(secret: &Secret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.expose()),
            decoding_key: DecodingKey::from_secret(secret.expose()),
            algorithm: Algorithm::HS256,
            ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Override the lifetime of issued tokens.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a token for a user.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, user_id: impl ToString, email: &str) -> Result<String, JwtError> {
        let claims = SessionClaims::for_user(user_id, email, self.ttl);
        self.encode(&claims)
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Check signature and expiry of a token.
    ///
    /// Never fails: a bad token is reported as [`TokenVerification::Invalid`].
    pub fn verify(&self, token: &str) -> TokenVerification {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        match decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(token_data) => TokenVerification::Valid(token_data.claims),
            Err(e) => TokenVerification::Invalid(match e.kind() {
                ErrorKind::ExpiredSignature => InvalidToken::Expired,
                ErrorKind::InvalidSignature => InvalidToken::BadSignature,
                _ => InvalidToken::Malformed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(secret: &str) -> JwtHandler {
        JwtHandler::new(&Secret::new("jwt.secret", secret).unwrap())
    }

    #[test]
    fn test_issue_and_verify() {
        let handler = handler("my_secret_key_at_least_32_bytes_long!");

        let token = handler
            .issue("user123", "alice@example.com")
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        match handler.verify(&token) {
            TokenVerification::Valid(claims) => {
                assert_eq!(claims.user_id(), "user123");
                assert_eq!(claims.email(), "alice@example.com");
                assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_HOURS * 3600);
            }
            other => panic!("expected valid token, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_malformed_token() {
        let handler = handler("my_secret_key_at_least_32_bytes_long!");

        assert_eq!(
            handler.verify("invalid.token.here"),
            TokenVerification::Invalid(InvalidToken::Malformed)
        );
        assert!(matches!(handler.verify(""), TokenVerification::Invalid(_)));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = handler("secret1_at_least_32_bytes_long_key!");
        let handler2 = handler("secret2_at_least_32_bytes_long_key!");

        let token = handler1.issue("user123", "alice@example.com").unwrap();

        assert_eq!(
            handler2.verify(&token),
            TokenVerification::Invalid(InvalidToken::BadSignature)
        );
    }

    #[test]
    fn test_verify_expired_token() {
        let handler = handler("my_secret_key_at_least_32_bytes_long!").with_ttl(Duration::seconds(-30));

        let token = handler.issue("user123", "alice@example.com").unwrap();

        assert_eq!(
            handler.verify(&token),
            TokenVerification::Invalid(InvalidToken::Expired)
        );
    }
}
