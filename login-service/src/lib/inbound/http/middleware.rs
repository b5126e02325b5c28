use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::credential::models::CredentialId;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity carried by a verified token, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub id: CredentialId,
    pub given_name: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<i64>,
}

/// Middleware that verifies the bearer token and records the identity it names.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims: auth::Claims = state.token_verifier.decode(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        unauthorized("Invalid or expired token")
    })?;

    let subject = claims.require_subject().map_err(|e| {
        tracing::warn!(error = %e, "Token has no subject");
        unauthorized("Invalid token format")
    })?;

    let id = CredentialId::from_string(subject).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a credential id");
        unauthorized("Invalid token format")
    })?;

    tracing::debug!(credential_id = %id, "Request authenticated");

    req.extensions_mut().insert(AuthenticatedIdentity {
        id,
        given_name: claims.given_name(),
        email: claims.email(),
        expires_at: claims.exp,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let value = header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    value
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
        })
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
