use std::sync::Arc;
use std::time::Duration;

use auth::JwtHandler;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::me::me;
use super::middleware::authenticate as auth_middleware;
use crate::credential::ports::AuthenticatorPort;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<dyn AuthenticatorPort>,
    pub token_verifier: Arc<JwtHandler>,
}

pub fn create_router(
    authenticator: Arc<dyn AuthenticatorPort>,
    token_verifier: Arc<JwtHandler>,
) -> Router {
    let state = AppState {
        authenticator,
        token_verifier,
    };

    let public_routes = Router::new().route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Only method and path are recorded: headers carry bearer tokens and
    // query strings are not part of any route.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "login_http",
                method = %request.method(),
                path = %request.uri().path(),
            )
        })
        .on_request(())
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                let status = response.status();
                if status.is_server_error() {
                    tracing::warn!(
                        status = status.as_u16(),
                        latency_ms = latency.as_millis() as u64,
                        "Request failed"
                    );
                } else {
                    tracing::info!(
                        status = status.as_u16(),
                        latency_ms = latency.as_millis() as u64,
                        "Request handled"
                    );
                }
            },
        )
        .on_failure(
            |failure: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                tracing::error!(
                    failure = %failure,
                    latency_ms = latency.as_millis() as u64,
                    "Request aborted"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
