use std::collections::HashMap;

use thiserror::Error;

/// Error type for signing secrets that fail the strength policy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SecretError {
    #[error("Signing secret is empty")]
    Empty,

    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Signing secret entropy too low: minimum {min:.1} bits, got {actual:.1}")]
    LowEntropy { min: f64, actual: f64 },
}

/// Minimum strength requirements for an HMAC signing secret.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretPolicy {
    /// Minimum secret length in bytes
    pub min_length: usize,
    /// Minimum total Shannon entropy in bits
    pub min_entropy_bits: f64,
}

impl SecretPolicy {
    /// 256 bits of key material, matching the HS256 output size.
    pub const DEFAULT_MIN_LENGTH: usize = 32;
    pub const DEFAULT_MIN_ENTROPY_BITS: f64 = 64.0;

    /// Check a secret against the policy.
    ///
    /// # Errors
    /// * `Empty` - Secret has no bytes
    /// * `TooShort` - Secret is shorter than `min_length`
    /// * `LowEntropy` - Secret is long enough but too repetitive
    pub fn validate(&self, secret: &[u8]) -> Result<(), SecretError> {
        if secret.is_empty() {
            return Err(SecretError::Empty);
        }

        if secret.len() < self.min_length {
            return Err(SecretError::TooShort {
                min: self.min_length,
                actual: secret.len(),
            });
        }

        let entropy = shannon_entropy_bits(secret);
        if entropy < self.min_entropy_bits {
            return Err(SecretError::LowEntropy {
                min: self.min_entropy_bits,
                actual: entropy,
            });
        }

        Ok(())
    }
}

impl Default for SecretPolicy {
    fn default() -> Self {
        Self {
            min_length: Self::DEFAULT_MIN_LENGTH,
            min_entropy_bits: Self::DEFAULT_MIN_ENTROPY_BITS,
        }
    }
}

/// Total Shannon entropy of `data` in bits (per-byte entropy times length).
pub fn shannon_entropy_bits(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<u8, usize> = HashMap::new();
    for byte in data {
        *counts.entry(*byte).or_insert(0) += 1;
    }

    let len = data.len() as f64;
    let per_byte: f64 = counts
        .values()
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum();

    per_byte * len
}
