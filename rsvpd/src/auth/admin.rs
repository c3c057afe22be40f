use tracing::debug;

use crate::errors::{Error, Result};

/// Check a caller-supplied secret against the configured one.
///
/// A missing or empty secret on either side is a rejection.
pub fn require_secret(provided: Option<&str>, expected: Option<&str>) -> Result<()> {
    match (provided, expected) {
        (Some(provided), Some(expected)) if !expected.is_empty() && constant_time_eq(provided.as_bytes(), expected.as_bytes()) => {
            Ok(())
        }
        (provided, _) => {
            debug!(secret_present = provided.is_some_and(|p| !p.is_empty()), "Admin secret rejected");
            Err(Error::Unauthenticated)
        }
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
