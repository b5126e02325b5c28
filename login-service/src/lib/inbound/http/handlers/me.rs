use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

/// Echo the identity named by the caller's verified token.
pub async fn me(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&identity).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: String,
    pub given_name: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&AuthenticatedIdentity> for IdentityData {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            id: identity.id.to_string(),
            given_name: identity.given_name.clone(),
            email: identity.email.clone(),
            expires_at: identity
                .expires_at
                .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::models::CredentialId;

    #[test]
    fn test_identity_data_from_identity() {
        let id = CredentialId::new();
        let identity = AuthenticatedIdentity {
            id,
            given_name: Some("damian".to_string()),
            email: Some("damian@example.com".to_string()),
            expires_at: Some(1_700_000_000),
        };

        let data = IdentityData::from(&identity);

        assert_eq!(data.id, id.to_string());
        assert_eq!(data.given_name.as_deref(), Some("damian"));
        assert_eq!(data.email.as_deref(), Some("damian@example.com"));
        assert_eq!(
            data.expires_at.map(|at| at.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_identity_without_expiry() {
        let identity = AuthenticatedIdentity {
            id: CredentialId::new(),
            given_name: None,
            email: None,
            expires_at: None,
        };

        assert_eq!(IdentityData::from(&identity).expires_at, None);
    }
}
