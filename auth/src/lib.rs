//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id) and legacy SHA-256 digest verification
//! - JWT token generation and validation (HS256)
//! - Signing secret strength checks
//!
//! Each service defines its own authentication traits and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Legacy Digests
//! ```
//! use auth::PasswordHasher;
//!
//! let stored = auth::password::digest("qwerty");
//! let hasher = PasswordHasher::new();
//! assert!(hasher.verify("qwerty", &stored).unwrap());
//! assert!(hasher.needs_rehash(&stored));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = Claims::new().with_subject("user123");
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("user123"));
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SecretError;
pub use jwt::SecretPolicy;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordScheme;
