//! Ticket code generation.
//!
//! Codes are uniform random 5-digit integers (`10000`..=`99999`).
//! Uniqueness is not enforced by construction; collision probability is
//! roughly 1/90000 per draw. See DESIGN.md for the open question on
//! settlement-gated issuance and code uniqueness.

use rand::Rng;

/// Generate a random 5-digit ticket code.
pub fn generate() -> String {
    rand::rng().random_range(10_000..=99_999).to_string()
}

/// Whether a string is a well-formed ticket code (exactly 5 ASCII digits,
/// no leading zero).
pub fn is_valid(code: &str) -> bool {
    code.len() == 5 && code.chars().all(|c| c.is_ascii_digit()) && !code.starts_with('0')
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
