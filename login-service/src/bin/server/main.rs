use std::sync::Arc;

use login_service::config::Config;
use login_service::credential::service::Authenticator;
use login_service::credential::signing::SigningContext;
use login_service::inbound::http::router::create_router;
use login_service::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "login_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "login-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let layered = Arc::new(Config::layered()?);
    let config = Config::from_layered(&layered)?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        jwt = ?config.jwt,
        lookup_timeout_ms = ?config.store.lookup_timeout_ms,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_verifier = Arc::new(SigningContext::from_provider(layered.as_ref())?.verifier()?);

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool));
    let mut authenticator = Authenticator::new(credential_store, Arc::clone(&layered))?;
    if let Some(timeout) = config.store.lookup_timeout() {
        authenticator = authenticator.with_lookup_timeout(timeout);
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::new(authenticator), token_verifier);
    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
