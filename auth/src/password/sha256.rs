//! Fast unsalted SHA-256 password digests.
//!
//! Records created by older deployments store `hex(sha256(password))`. The
//! digest is deterministic, so equal inputs always produce equal digests, but
//! it is cheap to brute force. New records should use Argon2id through
//! [`PasswordHasher`](super::PasswordHasher); this module exists so legacy
//! records keep verifying until they are migrated.

use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the lowercase hex SHA-256 digest of `plaintext`.
///
/// # Examples
/// ```
/// let digest = auth::password::digest("qwerty");
/// assert_eq!(digest.len(), 64);
/// assert_eq!(digest, auth::password::digest("qwerty"));
/// ```
pub fn digest(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

/// Whether `value` has the shape of a digest produced by [`digest`].
pub fn is_digest(value: &str) -> bool {
    value.len() == DIGEST_HEX_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Recompute the digest of `plaintext` and compare it to `stored`.
pub fn verify(plaintext: &str, stored: &str) -> bool {
    constant_time_eq(digest(plaintext).as_bytes(), stored.as_bytes())
}

/// Compare two byte slices in constant time.
///
/// Slices of different length compare unequal.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
