use std::sync::Arc;

use async_trait::async_trait;
use auth::JwtHandler;
use login_service::config::StaticConfiguration;
use login_service::credential::errors::StoreError;
use login_service::credential::models::Credential;
use login_service::credential::models::CredentialId;
use login_service::credential::ports::CredentialStore;
use login_service::credential::service::Authenticator;
use login_service::credential::signing::SigningContext;
use login_service::credential::signing::EXPIRATION_MINUTES_KEY;
use login_service::credential::signing::ISSUER_KEY;
use login_service::credential::signing::SECRET_KEY;
use login_service::inbound::http::router::create_router;
use login_service::repositories::InMemoryCredentialStore;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_ISSUER: &str = "login-service-test";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// Store that fails every lookup, as a dropped database connection would
pub struct UnavailableStore;

#[async_trait]
impl CredentialStore for UnavailableStore {
    async fn find_by_username(&self, _username: &str) -> Result<Option<Credential>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub fn test_configuration() -> StaticConfiguration {
    StaticConfiguration::new()
        .with_value(SECRET_KEY, TEST_SECRET)
        .with_value(ISSUER_KEY, TEST_ISSUER)
        .with_value(EXPIRATION_MINUTES_KEY, "60")
}

/// Stored credential for `damian` with the legacy digest of `qwerty`
pub fn damian() -> Credential {
    Credential {
        id: CredentialId::new(),
        username: "damian".to_string(),
        email: "damian@example.com".to_string(),
        password_hash: auth::password::digest("qwerty"),
    }
}

impl TestApp {
    /// Spawn the application backed by an in-memory store holding `credentials`
    pub async fn spawn(credentials: Vec<Credential>) -> Self {
        let store: InMemoryCredentialStore = credentials.into_iter().collect();
        Self::spawn_with_store(Arc::new(store)).await
    }

    /// Spawn the application on top of any credential store
    pub async fn spawn_with_store<CS: CredentialStore>(store: Arc<CS>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let configuration = Arc::new(test_configuration());
        let token_verifier = SigningContext::from_provider(configuration.as_ref())
            .expect("Invalid test signing configuration")
            .verifier()
            .expect("Failed to build token verifier");

        let authenticator = Authenticator::new(store, configuration)
            .expect("Failed to create authenticator");

        let router = create_router(Arc::new(authenticator), Arc::new(token_verifier));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jwt_handler = JwtHandler::new(TEST_SECRET.as_bytes())
            .expect("Invalid test secret")
            .with_issuer(TEST_ISSUER);

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }
}
