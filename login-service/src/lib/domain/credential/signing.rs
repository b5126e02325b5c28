use std::fmt;

use auth::JwtHandler;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::credential::errors::AuthenticationError;
use crate::credential::errors::SigningConfigurationError;
use crate::credential::ports::ConfigurationProvider;

pub const SECRET_KEY: &str = "jwt.secret";
pub const ISSUER_KEY: &str = "jwt.issuer";
pub const EXPIRATION_MINUTES_KEY: &str = "jwt.expiration_minutes";

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 60;
/// Longest accepted token lifetime (30 days).
pub const MAX_TOKEN_LIFETIME_MINUTES: i64 = 60 * 24 * 30;

/// Validated token signing settings.
///
/// Immutable once built; every constructor checks the key strength, the
/// issuer and the lifetime.
#[derive(Clone, PartialEq)]
pub struct SigningContext {
    secret: Vec<u8>,
    issuer: String,
    token_lifetime: Duration,
}

impl SigningContext {
    /// Build a signing context from explicit values.
    ///
    /// # Errors
    /// * `MissingKey` - Secret is empty
    /// * `WeakKey` - Secret is too short or too repetitive
    /// * `MissingIssuer` - Issuer is empty or blank
    /// * `InvalidLifetime` - Lifetime is not positive or exceeds 30 days
    pub fn new(
        secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        token_lifetime: Duration,
    ) -> Result<Self, SigningConfigurationError> {
        let secret = secret.into();
        let issuer = issuer.into();

        validate_secret(&secret)?;
        validate_issuer(&issuer)?;

        if token_lifetime <= Duration::zero()
            || token_lifetime > Duration::minutes(MAX_TOKEN_LIFETIME_MINUTES)
        {
            return Err(SigningConfigurationError::InvalidLifetime(format!(
                "expected between 1 second and {} minutes, got {} seconds",
                MAX_TOKEN_LIFETIME_MINUTES,
                token_lifetime.num_seconds()
            )));
        }

        Ok(Self {
            secret,
            issuer,
            token_lifetime,
        })
    }

    /// Read and validate signing settings from a configuration provider.
    ///
    /// Keys: `jwt.secret`, `jwt.issuer`, and optionally
    /// `jwt.expiration_minutes` (defaults to 60).
    pub fn from_provider<P>(provider: &P) -> Result<Self, SigningConfigurationError>
    where
        P: ConfigurationProvider + ?Sized,
    {
        let secret = provider
            .get_value(SECRET_KEY)
            .ok_or(SigningConfigurationError::MissingKey)?;
        let issuer = provider
            .get_value(ISSUER_KEY)
            .ok_or(SigningConfigurationError::MissingIssuer)?;
        let minutes = match provider.get_value(EXPIRATION_MINUTES_KEY) {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                SigningConfigurationError::InvalidLifetime(format!(
                    "{} is not a whole number of minutes",
                    EXPIRATION_MINUTES_KEY
                ))
            })?,
            None => DEFAULT_TOKEN_LIFETIME_MINUTES,
        };

        let token_lifetime = Duration::try_minutes(minutes).ok_or_else(|| {
            SigningConfigurationError::InvalidLifetime(format!("{} minutes is out of range", minutes))
        })?;

        Self::new(secret.into_bytes(), issuer, token_lifetime)
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Expiration instant for a token issued at `now`.
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.token_lifetime
    }

    /// Token verifier bound to this key and issuer.
    pub fn verifier(&self) -> Result<JwtHandler, AuthenticationError> {
        Ok(JwtHandler::new(&self.secret)?.with_issuer(&self.issuer))
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("token_lifetime", &self.token_lifetime)
            .finish()
    }
}

pub(crate) fn validate_secret(secret: &[u8]) -> Result<(), SigningConfigurationError> {
    auth::SecretPolicy::default()
        .validate(secret)
        .map_err(SigningConfigurationError::from)
}

pub(crate) fn validate_issuer(issuer: &str) -> Result<(), SigningConfigurationError> {
    if issuer.trim().is_empty() {
        return Err(SigningConfigurationError::MissingIssuer);
    }
    Ok(())
}
