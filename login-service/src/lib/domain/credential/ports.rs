use async_trait::async_trait;

use crate::credential::errors::AuthenticationError;
use crate::credential::errors::StoreError;
use crate::credential::models::Credential;
use crate::credential::models::LoginOutcome;
use crate::credential::models::LoginRequest;

/// Port for the login use case.
#[async_trait]
pub trait AuthenticatorPort: Send + Sync + 'static {
    /// Verify a username/password pair and issue an identity token.
    ///
    /// # Arguments
    /// * `request` - Submitted username and plaintext password
    ///
    /// # Returns
    /// `Success` with a signed token, or `Failure` with one generic message
    /// that is identical for unknown usernames and wrong passwords
    ///
    /// # Errors
    /// * `StoreUnavailable` - Credential store failed or timed out
    /// * `SigningConfiguration` - Signing key or issuer missing or invalid
    /// * `Token` - Token encoding failed
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AuthenticationError>;
}

/// Read access to stored credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve credential by exact, case-sensitive username.
    ///
    /// # Arguments
    /// * `username` - Username to search for (may be empty)
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    /// * `MalformedRecord` - Stored row could not be read
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError>;
}

/// Key/value configuration lookup.
pub trait ConfigurationProvider: Send + Sync + 'static {
    fn get_value(&self, key: &str) -> Option<String>;
}
