use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Generic JWT claims structure.
///
/// Supports standard RFC 7519 claims plus custom fields via `extra` map.
/// All standard fields are optional for maximum flexibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub const GIVEN_NAME: &'static str = "given_name";
    pub const EMAIL: &'static str = "email";

    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create identity claims for an authenticated account.
    ///
    /// # Arguments
    /// * `subject` - Unique account identifier
    /// * `given_name` - Display name (stored in `extra.given_name`)
    /// * `email` - Contact address (stored in `extra.email`)
    ///
    /// # Returns
    /// Claims with sub, iat, given_name and email set
    pub fn for_identity(
        subject: impl ToString,
        given_name: impl ToString,
        email: impl ToString,
    ) -> Self {
        Self::new()
            .with_subject(subject)
            .with_issued_at(Utc::now().timestamp())
            .with_extra(Self::GIVEN_NAME, given_name.to_string())
            .with_extra(Self::EMAIL, email.to_string())
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: String) -> Self {
        self.iss = Some(iss);
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: String) -> Self {
        self.aud = Some(aud);
        self
    }

    /// Set token identifier.
    pub fn with_jwt_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Get display name from extra fields.
    pub fn given_name(&self) -> Option<String> {
        self.extra_str(Self::GIVEN_NAME)
    }

    /// Get email from extra fields.
    pub fn email(&self) -> Option<String> {
        self.extra_str(Self::EMAIL)
    }

    /// Get the subject or fail if the token carries none.
    pub fn require_subject(&self) -> Result<&str, JwtError> {
        self.sub
            .as_deref()
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }

    fn extra_str(&self, key: &str) -> Option<String> {
        self.extra
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            sub: None,
            exp: None,
            iat: None,
            nbf: None,
            iss: None,
            aud: None,
            jti: None,
            extra: HashMap::new(),
        }
    }
}
