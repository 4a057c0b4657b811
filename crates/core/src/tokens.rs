//! Bearer token generation and hashing.
//!
//! Principals authenticate with an opaque random token. Only its SHA-256
//! digest is persisted; the plaintext is handed out once.

use rand::Rng;

/// Length of a generated token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 48;

/// A freshly generated token.
pub struct GeneratedToken {
    /// The plaintext token. Never persisted.
    pub plaintext: String,
    /// SHA-256 hex digest of the plaintext, stored on the principal record.
    pub hash: String,
}

/// Generate a new random bearer token.
pub fn generate_token() -> GeneratedToken {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_token(&plaintext);
    GeneratedToken { plaintext, hash }
}

/// Digest used both when storing a token and when looking one up.
pub fn hash_token(token: &str) -> String {
    crate::hashing::sha256_hex(token.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_has_expected_shape() {
        let token = generate_token();
        assert_eq!(token.plaintext.len(), TOKEN_LENGTH);
        assert!(token.plaintext.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(token.hash, hash_token(&token.plaintext));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_token().plaintext, generate_token().plaintext);
    }

    #[test]
    fn hash_differs_from_plaintext() {
        let token = generate_token();
        assert_ne!(token.hash, token.plaintext);
        assert_eq!(token.hash.len(), 64);
    }
}
