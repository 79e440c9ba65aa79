//! Shareable quiz codes.
//!
//! Codes are six symbols drawn from an alphabet without the lookalikes
//! `I`, `O`, `0` and `1`, so they survive being read aloud or retyped.

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

/// Symbols a code may contain.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of every code.
pub const CODE_LENGTH: usize = 6;

/// Draws allowed before giving up on finding an unused code.
pub const MAX_CODE_ATTEMPTS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("no unused quiz code found after {0} attempts")]
    Exhausted(usize),
}

/// Draw a random code that is not in `existing`.
pub fn generate_code<R>(existing: &HashSet<&str>, rng: &mut R) -> Result<String, CodeError>
where
    R: Rng + ?Sized,
{
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = random_code(rng);
        if !existing.contains(code.as_str()) {
            return Ok(code);
        }
    }

    Err(CodeError::Exhausted(MAX_CODE_ATTEMPTS))
}

fn random_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Upper-case a user supplied code for lookup.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Whether `code` could have been produced by [`generate_code`], ignoring case.
pub fn is_valid_code(code: &str) -> bool {
    let code = normalize_code(code);
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}
