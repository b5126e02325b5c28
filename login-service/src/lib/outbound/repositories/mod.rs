pub mod credential;
pub mod memory;

pub use credential::PostgresCredentialStore;
pub use memory::InMemoryCredentialStore;
