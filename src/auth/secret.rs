use rand::{distributions::Alphanumeric, rngs::OsRng, Rng, RngCore};

pub const DEFAULT_SECRET_BYTES: usize = 64;

/// `len` random bytes from the OS RNG, hex-encoded (`2 * len` chars).
pub fn hex_secret(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// `len` characters from `[A-Za-z0-9]`, safe to paste anywhere.
pub fn alphanumeric_secret(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_secret_length_and_alphabet() {
        let secret = hex_secret(DEFAULT_SECRET_BYTES);
        assert_eq!(secret.len(), DEFAULT_SECRET_BYTES * 2);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_alphanumeric_secret_length_and_alphabet() {
        let secret = alphanumeric_secret(48);
        assert_eq!(secret.len(), 48);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_secrets_differ() {
        assert_ne!(hex_secret(32), hex_secret(32));
    }
}
