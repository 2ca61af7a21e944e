//! Account validation codes.

use rand::{RngCore, rngs::OsRng};

/// Length of a validation code.
pub const VALIDATION_CODE_LEN: usize = 4;

/// Generates a random upper-case hexadecimal validation code.
#[must_use]
pub fn generate_validation_code() -> String {
    format!("{:04X}", OsRng.next_u32() & 0xFFFF)
}

/// Canonical form of a code typed by a user.
#[must_use]
pub fn normalize_validation_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
