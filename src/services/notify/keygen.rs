use rand::RngCore;

/// Number of random bytes behind an API key; the hex form is twice as long.
pub const API_KEY_BYTES: usize = 32;

/// Generates a new API key: 64 lowercase hex characters from 32 random bytes.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_shape() {
        let key = generate_api_key();
        assert_eq!(key.len(), 64);
        assert!(
            key.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_api_key_decodes_to_key_bytes() {
        let bytes = hex::decode(generate_api_key()).unwrap();
        assert_eq!(bytes.len(), API_KEY_BYTES);
    }

    #[test]
    fn test_api_keys_differ() {
        assert_ne!(generate_api_key(), generate_api_key());
    }
}
