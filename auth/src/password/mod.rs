mod argon2;
pub mod errors;
pub mod hasher;
pub mod sha256;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use hasher::PasswordScheme;
pub use sha256::constant_time_eq;
pub use sha256::digest;
