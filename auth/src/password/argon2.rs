use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed Argon2id PHC string that no password is expected to match.
///
/// Verifying against it costs the same as verifying a real record, which keeps
/// unknown-account lookups indistinguishable by timing.
pub(crate) const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Whether `hash` looks like an Argon2 PHC string.
pub(crate) fn is_phc(hash: &str) -> bool {
    hash.starts_with("$argon2")
}

/// Whether `hash` is an Argon2id PHC string.
pub(crate) fn is_argon2id(hash: &str) -> bool {
    hash.starts_with("$argon2id$")
}

/// Hash a plaintext password with Argon2id and a random salt.
///
/// # Returns
/// PHC string format hash (includes algorithm, parameters, salt, and hash)
///
/// # Errors
/// * `HashingFailed` - Password hashing operation failed
pub(crate) fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

/// Verify a password against a stored PHC hash.
///
/// Parameters and salt are taken from the PHC string, so hashes produced
/// with other cost settings still verify.
///
/// # Errors
/// * `VerificationFailed` - Hash format is invalid
pub(crate) fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| {
        PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
    })?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "my_secure_password";

        let hash = hash(password).expect("Failed to hash password");
        assert!(is_argon2id(&hash));

        assert!(verify(password, &hash).expect("Failed to verify password"));
        assert!(!verify("wrong_password", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_uses_random_salt() {
        let first = hash("qwerty").expect("Failed to hash password");
        let second = hash("qwerty").expect("Failed to hash password");

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_invalid_hash() {
        let result = verify("password", "$argon2id$v=19$m=19456,t=2,p=1$!!!$!!!");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_truncated_phc_is_a_mismatch() {
        // Parses as a PHC string without salt or output.
        assert!(!verify("password", "$argon2id$garbage").expect("Truncated PHC should parse"));
    }

    #[test]
    fn test_dummy_hash_is_well_formed() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
        assert!(!verify("", DUMMY_HASH).expect("Dummy hash should parse"));
    }
}
