//! Short code generation and validation.

use rand::{distr::Alphanumeric, Rng};

/// Length of generated codes
pub const CODE_LEN: usize = 6;

/// Longest code accepted, generated or custom
pub const MAX_CODE_LEN: usize = 32;

/// Random alphanumeric code of `CODE_LEN` characters.
pub fn gen_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LEN)
        .map(char::from)
        .collect()
}

/// Whether `code` may be used as a short code: 1 to `MAX_CODE_LEN` characters
/// of ASCII letters, digits, `-` and `_`.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
