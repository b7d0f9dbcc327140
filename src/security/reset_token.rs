use chrono::Duration;
use rand::Rng;
use sha2::{Digest, Sha256};

/// How long a password reset token stays valid.
pub fn reset_token_ttl() -> Duration {
    Duration::hours(1)
}

/// Eight random decimal digits.
pub fn generate_reset_token() -> String {
    rand::thread_rng()
        .gen_range(10_000_000u32..100_000_000)
        .to_string()
}

/// Hex SHA-256 of the token; this is the form kept on the user row.
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_eight_digits() {
        for _ in 0..50 {
            let token = generate_reset_token();
            assert_eq!(token.len(), 8);
            assert!(token.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn hash_is_stable_hex() {
        let a = hash_reset_token("12345678");
        assert_eq!(a, hash_reset_token("12345678"));
        assert_ne!(a, hash_reset_token("12345679"));
        assert_eq!(a.len(), 64);
    }
}
