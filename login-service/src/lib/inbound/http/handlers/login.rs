use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::models::LoginOutcome;
use crate::credential::models::LoginRequest;
use crate::credential::models::LoginSuccess;
use crate::credential::models::PublicProfile;
use crate::credential::ports::AuthenticatorPort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let outcome = state
        .authenticator
        .login(body.into())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Login could not be completed");
            ApiError::from(e)
        })?;

    match outcome {
        LoginOutcome::Success(ref success) => Ok(ApiSuccess::new(StatusCode::OK, success.into())),
        LoginOutcome::Failure(failure) => Err(ApiError::BadRequest(failure.into_errors())),
    }
}

/// Missing fields are treated as empty strings and fail like any other mismatch.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl From<LoginRequestBody> for LoginRequest {
    fn from(body: LoginRequestBody) -> Self {
        LoginRequest::new(body.username, body.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: PublicProfile,
}

impl From<&LoginSuccess> for LoginResponseData {
    fn from(success: &LoginSuccess) -> Self {
        Self {
            token: success.token.clone(),
            expires_at: success.expires_at,
            user: success.profile.clone(),
        }
    }
}
