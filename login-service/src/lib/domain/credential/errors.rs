use auth::JwtError;
use auth::SecretError;
use thiserror::Error;

/// Error for CredentialId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error reported by credential store adapters
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    #[error("Credential record is malformed: {0}")]
    MalformedRecord(String),
}

/// Missing or unusable token signing settings.
///
/// Fatal for the current configuration; retrying does not help.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SigningConfigurationError {
    #[error("Signing key is not configured")]
    MissingKey,

    #[error("Signing key is too weak: {0}")]
    WeakKey(SecretError),

    #[error("Token issuer is not configured")]
    MissingIssuer,

    #[error("Invalid token lifetime: {0}")]
    InvalidLifetime(String),
}

impl From<SecretError> for SigningConfigurationError {
    fn from(err: SecretError) -> Self {
        match err {
            SecretError::Empty => SigningConfigurationError::MissingKey,
            other => SigningConfigurationError::WeakKey(other),
        }
    }
}

/// Infrastructure failures of a login attempt.
///
/// Wrong credentials are not an error: they are reported through
/// `LoginOutcome::Failure`.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Signing configuration error: {0}")]
    SigningConfiguration(#[from] SigningConfigurationError),

    #[error("Token error: {0}")]
    Token(JwtError),
}

impl From<StoreError> for AuthenticationError {
    fn from(err: StoreError) -> Self {
        AuthenticationError::StoreUnavailable(err.to_string())
    }
}

impl From<JwtError> for AuthenticationError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidSecret(secret) => {
                AuthenticationError::SigningConfiguration(secret.into())
            }
            other => AuthenticationError::Token(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_is_missing_key() {
        assert_eq!(
            SigningConfigurationError::from(SecretError::Empty),
            SigningConfigurationError::MissingKey
        );
    }

    #[test]
    fn test_short_secret_is_weak_key() {
        let err = SigningConfigurationError::from(SecretError::TooShort { min: 32, actual: 3 });
        assert!(matches!(err, SigningConfigurationError::WeakKey(_)));
    }

    #[test]
    fn test_invalid_secret_maps_to_signing_configuration() {
        let err = AuthenticationError::from(JwtError::InvalidSecret(SecretError::Empty));
        assert!(matches!(
            err,
            AuthenticationError::SigningConfiguration(SigningConfigurationError::MissingKey)
        ));
    }

    #[test]
    fn test_store_error_maps_to_unavailable() {
        let err = AuthenticationError::from(StoreError::Unavailable("connection refused".into()));
        assert!(matches!(err, AuthenticationError::StoreUnavailable(_)));
    }
}
