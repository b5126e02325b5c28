use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::credential::errors::CredentialIdError;

/// Stored identity record used to verify a login attempt.
///
/// Created and maintained outside this service; read-only here.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: CredentialId,
    pub username: String,
    pub email: String,
    /// One-way digest of the password, never the plaintext
    pub password_hash: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Credential unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId(pub Uuid);

impl CredentialId {
    /// Generate a new random credential ID.
    ///
    /// # Returns
    /// CredentialId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a credential ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed CredentialId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CredentialIdError> {
        Uuid::parse_str(s)
            .map(CredentialId)
            .map_err(|e| CredentialIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Submitted login attempt.
///
/// Both fields may be empty; they are matched like any other input.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public profile fields echoed back after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProfile {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&Credential> for PublicProfile {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id.to_string(),
            username: credential.username.clone(),
            email: credential.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub profile: PublicProfile,
}

/// Ordered, non-empty list of user-facing error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFailure {
    errors: Vec<String>,
}

impl LoginFailure {
    /// Message shared by unknown usernames and wrong passwords.
    pub const INVALID_CREDENTIALS: &'static str = "Invalid username or password";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::new(Self::INVALID_CREDENTIALS)
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.errors.push(message.into());
        self
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Result of a login attempt: a success payload or user-facing errors, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(LoginSuccess),
    Failure(LoginFailure),
}

impl LoginOutcome {
    pub fn invalid_credentials() -> Self {
        Self::Failure(LoginFailure::invalid_credentials())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn success(&self) -> Option<&LoginSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    /// Error messages; empty on success.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(failure) => failure.errors(),
        }
    }
}
