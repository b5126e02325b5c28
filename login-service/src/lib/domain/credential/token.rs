use auth::Claims;
use auth::JwtHandler;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::credential::errors::AuthenticationError;
use crate::credential::errors::SigningConfigurationError;
use crate::credential::models::Credential;
use crate::credential::signing::validate_issuer;
use crate::credential::signing::DEFAULT_TOKEN_LIFETIME_MINUTES;

/// Issue a signed HS256 identity token for `identity`.
///
/// Claims: `sub` (credential id), `given_name`, `email`, `iss` and `aud`
/// (both `issuer`), `iat`, `exp` and a random `jti`. The password digest is
/// never embedded.
///
/// # Arguments
/// * `identity` - Verified credential
/// * `secret_key` - HMAC key material
/// * `issuer` - Issuer identity, also used as audience
/// * `expires_at` - Expiration instant; defaults to 60 minutes from now
///
/// # Returns
/// Compact JWT string
///
/// # Errors
/// * `SigningConfiguration(MissingKey)` - Secret key is empty
/// * `SigningConfiguration(WeakKey)` - Secret key is too short or repetitive
/// * `SigningConfiguration(MissingIssuer)` - Issuer is empty or blank
/// * `SigningConfiguration(InvalidLifetime)` - `expires_at` is not in the future
/// * `Token` - Encoding failed
pub fn issue_token(
    identity: &Credential,
    secret_key: &[u8],
    issuer: &str,
    expires_at: Option<DateTime<Utc>>,
) -> Result<String, AuthenticationError> {
    let handler = JwtHandler::new(secret_key)?;
    validate_issuer(issuer)?;

    let now = Utc::now();
    let expires_at =
        expires_at.unwrap_or_else(|| now + Duration::minutes(DEFAULT_TOKEN_LIFETIME_MINUTES));

    if expires_at <= now {
        return Err(SigningConfigurationError::InvalidLifetime(format!(
            "token expiration {} is not in the future",
            expires_at.to_rfc3339()
        ))
        .into());
    }

    let claims = Claims::for_identity(identity.id, &identity.username, &identity.email)
        .with_issued_at(now.timestamp())
        .with_issuer(issuer.to_string())
        .with_audience(issuer.to_string())
        .with_expiration(expires_at.timestamp())
        .with_jwt_id(Uuid::new_v4());

    Ok(handler.encode(&claims)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::models::CredentialId;

    const SECRET: &[u8] = b"qwertyuiosdfghjkkjhgfdsdfghjklhgfd";
    const ISSUER: &str = "login-service";

    fn credential() -> Credential {
        Credential {
            id: CredentialId::new(),
            username: "damian".to_string(),
            email: "damian@wp.pl".to_string(),
            password_hash: auth::password::digest("qwerty"),
        }
    }

    fn decode(token: &str) -> Claims {
        JwtHandler::new(SECRET)
            .unwrap()
            .with_issuer(ISSUER)
            .decode(token)
            .expect("Failed to decode token")
    }

    #[test]
    fn test_issue_token_embeds_identity_claims() {
        let credential = credential();
        let expires_at = Utc::now() + Duration::minutes(15);

        let token = issue_token(&credential, SECRET, ISSUER, Some(expires_at)).unwrap();
        let claims = decode(&token);

        assert_eq!(claims.sub, Some(credential.id.to_string()));
        assert_eq!(claims.given_name(), Some("damian".to_string()));
        assert_eq!(claims.email(), Some("damian@wp.pl".to_string()));
        assert_eq!(claims.iss, Some(ISSUER.to_string()));
        assert_eq!(claims.aud, Some(ISSUER.to_string()));
        assert_eq!(claims.exp, Some(expires_at.timestamp()));
        assert!(claims.iat.is_some());
        assert!(claims.jti.is_some());
    }

    #[test]
    fn test_issue_token_never_embeds_digest() {
        let credential = credential();
        let token = issue_token(&credential, SECRET, ISSUER, None).unwrap();
        let claims = decode(&token);

        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains(&credential.password_hash));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_issue_token_defaults_to_bounded_lifetime() {
        let before = Utc::now();
        let token = issue_token(&credential(), SECRET, ISSUER, None).unwrap();
        let claims = decode(&token);

        let exp = claims.exp.expect("Token must expire");
        let expected = (before + Duration::minutes(DEFAULT_TOKEN_LIFETIME_MINUTES)).timestamp();
        assert!((exp - expected).abs() <= 5);
    }

    #[test]
    fn test_issue_token_is_unique_per_call() {
        let credential = credential();
        let expires_at = Utc::now() + Duration::minutes(15);

        let first = issue_token(&credential, SECRET, ISSUER, Some(expires_at)).unwrap();
        let second = issue_token(&credential, SECRET, ISSUER, Some(expires_at)).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_issue_token_empty_key_is_configuration_error() {
        let result = issue_token(&credential(), b"", ISSUER, None);

        assert!(matches!(
            result,
            Err(AuthenticationError::SigningConfiguration(
                SigningConfigurationError::MissingKey
            ))
        ));
    }

    #[test]
    fn test_issue_token_weak_key_is_configuration_error() {
        let result = issue_token(&credential(), b"qwerty", ISSUER, None);

        assert!(matches!(
            result,
            Err(AuthenticationError::SigningConfiguration(
                SigningConfigurationError::WeakKey(_)
            ))
        ));
    }

    #[test]
    fn test_issue_token_empty_issuer_is_configuration_error() {
        let result = issue_token(&credential(), SECRET, "", None);

        assert!(matches!(
            result,
            Err(AuthenticationError::SigningConfiguration(
                SigningConfigurationError::MissingIssuer
            ))
        ));
    }

    #[test]
    fn test_issue_token_rejects_past_expiration() {
        let result = issue_token(
            &credential(),
            SECRET,
            ISSUER,
            Some(Utc::now() - Duration::minutes(1)),
        );

        assert!(matches!(
            result,
            Err(AuthenticationError::SigningConfiguration(
                SigningConfigurationError::InvalidLifetime(_)
            ))
        ));
    }
}
