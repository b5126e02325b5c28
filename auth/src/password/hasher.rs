use super::argon2;
use super::errors::PasswordError;
use super::sha256;

/// Digest scheme used for newly hashed passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    /// Salted, memory-hard Argon2id (PHC string output).
    #[default]
    Argon2id,
    /// Unsalted SHA-256 hex digest. Only for compatibility with legacy records.
    Sha256,
}

/// Password hashing implementation.
///
/// Hashes new passwords with the configured scheme and verifies stored
/// hashes of either scheme, detecting the format from the stored value.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    scheme: PasswordScheme,
}

impl PasswordHasher {
    /// Create a password hasher producing Argon2id hashes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a password hasher producing hashes of the given scheme.
    pub fn with_scheme(scheme: PasswordScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string for Argon2id, lowercase hex for SHA-256
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match self.scheme {
            PasswordScheme::Argon2id => argon2::hash(password),
            PasswordScheme::Sha256 => Ok(sha256::digest(password)),
        }
    }

    /// Verify a password against a stored hash.
    ///
    /// Every call costs one Argon2 verification whatever the stored format,
    /// so response time does not reveal which scheme a record uses or
    /// whether a record exists at all (see [`PasswordHasher::verify_dummy`]).
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored hash, either an Argon2 PHC string or a SHA-256 hex digest
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - PHC string is malformed
    /// * `UnknownFormat` - Stored value is neither a PHC string nor a hex digest
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        if argon2::is_phc(hash) {
            let result = argon2::verify(password, hash);
            if result.is_err() {
                self.verify_dummy(password);
            }
            return result;
        }

        self.verify_dummy(password);

        if sha256::is_digest(hash) {
            Ok(sha256::verify(password, hash))
        } else {
            Err(PasswordError::UnknownFormat)
        }
    }

    /// Spend the cost of one Argon2 verification without a stored hash.
    ///
    /// Used when no record exists so the caller's response time matches a
    /// real verification.
    pub fn verify_dummy(&self, password: &str) {
        // Result is irrelevant, only the work matters.
        let _ = argon2::verify(password, argon2::DUMMY_HASH);
    }

    /// Whether a stored hash should be replaced with one of the current scheme.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        match self.scheme {
            PasswordScheme::Argon2id => !argon2::is_argon2id(hash),
            PasswordScheme::Sha256 => !sha256::is_digest(hash),
        }
    }
}
