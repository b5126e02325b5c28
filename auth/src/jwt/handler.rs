use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use super::secret::SecretPolicy;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type to allow services to define their own token payload.
/// Uses HS256 (HMAC with SHA-256) algorithm by default.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: Option<String>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `InvalidSecret` - Secret fails the default [`SecretPolicy`]
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    /// - Rotate secrets periodically
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        Self::with_policy(secret, &SecretPolicy::default())
    }

    /// Create a JWT handler after checking the secret against `policy`.
    pub fn with_policy(secret: &[u8], policy: &SecretPolicy) -> Result<Self, JwtError> {
        policy.validate(secret)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: None,
        })
    }

    /// Bind the handler to an issuer.
    ///
    /// Decoding then requires `exp`, `sub`, and `iss`/`aud` both equal to `issuer`.
    pub fn with_issuer(mut self, issuer: impl ToString) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Encode claims into a JWT token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired (if exp claim is present)
    /// * `InvalidToken` - Signature, issuer or audience does not match
    /// * `MissingClaim` - A claim required by the issuer binding is absent
    /// * `DecodingFailed` - Token is malformed
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let token_data =
            decode::<T>(token, &self.decoding_key, &self.validation()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidIssuer
                    | ErrorKind::InvalidAudience
                    | ErrorKind::ImmatureSignature => JwtError::InvalidToken(e.to_string()),
                    ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);

        match &self.issuer {
            Some(issuer) => {
                validation.set_issuer(&[issuer]);
                validation.set_audience(&[issuer]);
                validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
            }
            None => {
                // Allow tokens without 'exp' claim for flexibility
                validation.required_spec_claims.clear();
                validation.validate_aud = false;
            }
        }

        validation
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::jwt::Claims;
    use crate::jwt::SecretError;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();

        let claims = TestClaims {
            sub: "user123".to_string(),
            role: "admin".to_string(),
        };

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_new_rejects_weak_secret() {
        assert!(matches!(
            JwtHandler::new(b""),
            Err(JwtError::InvalidSecret(SecretError::Empty))
        ));
        assert!(matches!(
            JwtHandler::new(b"too_short"),
            Err(JwtError::InvalidSecret(SecretError::TooShort { .. }))
        ));
    }

    #[test]
    fn test_with_relaxed_policy() {
        let policy = SecretPolicy {
            min_length: 1,
            min_entropy_bits: 0.0,
        };
        assert!(JwtHandler::with_policy(b"k", &policy).is_ok());
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();

        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let claims = TestClaims {
            sub: "user123".to_string(),
            role: "admin".to_string(),
        };

        let token = handler1.encode(&claims).expect("Failed to encode token");

        let result = handler2.decode::<TestClaims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_issuer_bound_round_trip() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!")
            .unwrap()
            .with_issuer("login-service");

        let claims = Claims::for_identity("42", "damian", "damian@wp.pl")
            .with_issuer("login-service".to_string())
            .with_audience("login-service".to_string())
            .with_expiration(Utc::now().timestamp() + 600);

        let token = handler.encode(&claims).unwrap();
        let decoded: Claims = handler.decode(&token).expect("Failed to decode token");

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_issuer_bound_rejects_foreign_issuer() {
        let secret = b"my_secret_key_at_least_32_bytes_long!";
        let handler = JwtHandler::new(secret).unwrap().with_issuer("login-service");

        let claims = Claims::new()
            .with_subject("42")
            .with_issuer("someone-else".to_string())
            .with_audience("login-service".to_string())
            .with_expiration(Utc::now().timestamp() + 600);

        let token = handler.encode(&claims).unwrap();
        let result = handler.decode::<Claims>(&token);

        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_issuer_bound_requires_expiration() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!")
            .unwrap()
            .with_issuer("login-service");

        let claims = Claims::new()
            .with_subject("42")
            .with_issuer("login-service".to_string())
            .with_audience("login-service".to_string());

        let token = handler.encode(&claims).unwrap();
        let result = handler.decode::<Claims>(&token);

        assert!(matches!(result, Err(JwtError::MissingClaim(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!").unwrap();

        let claims = Claims::new()
            .with_subject("42")
            .with_expiration(Utc::now().timestamp() - 3600);

        let token = handler.encode(&claims).unwrap();
        let result = handler.decode::<Claims>(&token);

        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }
}
