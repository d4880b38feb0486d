//! One-time code generation.

use rand::Rng;

use crate::errors::{DomainError, DomainResult};

/// Shortest code length the generator will produce
pub const MIN_CODE_LENGTH: usize = 4;

/// Generates fixed-length decimal one-time codes
pub struct CodeGenerator;

impl CodeGenerator {
    /// Produce a random decimal code of `length` digits.
    ///
    /// Digits are drawn independently, so the output is uniform over the
    /// whole code space. Lengths under [`MIN_CODE_LENGTH`] are rejected.
    pub fn generate(length: usize) -> DomainResult<String> {
        if length < MIN_CODE_LENGTH {
            return Err(DomainError::Validation {
                message: format!(
                    "Code length must be at least {}, got {}",
                    MIN_CODE_LENGTH, length
                ),
            });
        }

        let mut rng = rand::thread_rng();
        Ok((0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect())
    }
}
