use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::credential::errors::AuthenticationError;
use crate::credential::errors::SigningConfigurationError;
use crate::credential::models::Credential;
use crate::credential::models::LoginOutcome;
use crate::credential::models::LoginRequest;
use crate::credential::models::LoginSuccess;
use crate::credential::models::PublicProfile;
use crate::credential::ports::AuthenticatorPort;
use crate::credential::ports::ConfigurationProvider;
use crate::credential::ports::CredentialStore;
use crate::credential::signing::SigningContext;
use crate::credential::token::issue_token;

/// Domain service implementation for the login use case.
///
/// Holds no mutable state; safe to share across tasks behind an `Arc`.
pub struct Authenticator<CS, CP>
where
    CS: CredentialStore,
    CP: ConfigurationProvider + ?Sized,
{
    store: Arc<CS>,
    configuration: Arc<CP>,
    password_hasher: auth::PasswordHasher,
    lookup_timeout: Option<Duration>,
}

impl<CS, CP> Authenticator<CS, CP>
where
    CS: CredentialStore,
    CP: ConfigurationProvider + ?Sized,
{
    /// Create a new authenticator with injected dependencies.
    ///
    /// Signing settings are validated once here so a broken configuration
    /// fails at startup rather than on the first login.
    ///
    /// # Arguments
    /// * `store` - Credential lookup implementation
    /// * `configuration` - Source of `jwt.*` signing settings
    ///
    /// # Errors
    /// * `SigningConfigurationError` - Signing key, issuer or lifetime invalid
    pub fn new(
        store: Arc<CS>,
        configuration: Arc<CP>,
    ) -> Result<Self, SigningConfigurationError> {
        SigningContext::from_provider(configuration.as_ref())?;

        Ok(Self {
            store,
            configuration,
            password_hasher: auth::PasswordHasher::new(),
            lookup_timeout: None,
        })
    }

    /// Bound every credential lookup by `timeout`.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    async fn find_credential(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, AuthenticationError> {
        let lookup = self.store.find_by_username(username);

        let result = match self.lookup_timeout {
            Some(timeout) => tokio::time::timeout(timeout, lookup).await.map_err(|_| {
                tracing::error!(
                    timeout_ms = timeout.as_millis() as u64,
                    "Credential lookup timed out"
                );
                AuthenticationError::StoreUnavailable(format!(
                    "lookup timed out after {}ms",
                    timeout.as_millis()
                ))
            })?,
            None => lookup.await,
        };

        result.map_err(|e| {
            tracing::error!(error = %e, "Credential lookup failed");
            AuthenticationError::from(e)
        })
    }

    fn password_matches(&self, password: &str, credential: &Credential) -> bool {
        match self
            .password_hasher
            .verify(password, &credential.password_hash)
        {
            Ok(true) => {
                if self.password_hasher.needs_rehash(&credential.password_hash) {
                    tracing::info!(
                        credential_id = %credential.id,
                        "Credential uses a legacy password digest and should be rehashed"
                    );
                }
                true
            }
            Ok(false) => false,
            Err(e) => {
                tracing::warn!(
                    credential_id = %credential.id,
                    error = %e,
                    "Stored password digest could not be verified"
                );
                false
            }
        }
    }
}

#[async_trait]
impl<CS, CP> AuthenticatorPort for Authenticator<CS, CP>
where
    CS: CredentialStore,
    CP: ConfigurationProvider + ?Sized,
{
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AuthenticationError> {
        // Resolved per call; the provider decides how fresh its values are.
        let context = SigningContext::from_provider(self.configuration.as_ref())?;

        let credential = match self.find_credential(&request.username).await? {
            Some(credential) => credential,
            None => {
                self.password_hasher.verify_dummy(&request.password);
                tracing::info!(username_len = request.username.len(), "Login rejected");
                return Ok(LoginOutcome::invalid_credentials());
            }
        };

        if !self.password_matches(&request.password, &credential) {
            tracing::info!(username_len = request.username.len(), "Login rejected");
            return Ok(LoginOutcome::invalid_credentials());
        }

        let expires_at = context.expires_at(Utc::now());
        let token = issue_token(
            &credential,
            context.secret(),
            context.issuer(),
            Some(expires_at),
        )?;

        tracing::info!(credential_id = %credential.id, "Login succeeded");

        Ok(LoginOutcome::Success(LoginSuccess {
            token,
            expires_at,
            profile: PublicProfile::from(&credential),
        }))
    }
}
